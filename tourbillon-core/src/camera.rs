//! Camera pose derivation
//!
//! The camera always looks at the origin from a viewpoint on a sphere of
//! fixed radius. Outside the steady mode the viewpoint follows the
//! smoothed gravity vector (so the clock appears to hang in place as the
//! device tilts) rotated about Z by the current spin rotation; the steady
//! mode pins it to one canonical pose.

use crate::config::{WorldConfig, SPIN_ROTATION_STEADY};
use crate::math::{Fixed32, R3};
use crate::sampler::TriAxisSampler;

/// Distance of the camera from the origin, in cube-size units
pub const CAM_DISTANCE: Fixed32 = Fixed32::from_scaled_100(220);

/// Unrotated viewpoint of the steady display
pub const STEADY_VIEWPOINT: R3 = R3::new(
    Fixed32::from_scaled_100(-10),
    Fixed32::from_scaled_100(100),
    Fixed32::from_scaled_100(70),
);

/// Everything the renderer needs to place its camera
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CameraPose {
    /// Camera position in world space
    pub position: R3,
    /// Spin rotation baked into the position, exposed for renderers that
    /// orient billboards by it
    pub rotation_z: Fixed32,
    /// Zoom factor
    pub zoom: Fixed32,
}

impl CameraPose {
    /// Place the camera at `viewpoint` scaled out to the fixed distance
    /// and rotated about the vertical axis
    pub fn look_from(viewpoint: R3, rotation_z: Fixed32, zoom: Fixed32) -> Self {
        Self {
            position: viewpoint.scale(CAM_DISTANCE).rotate_z(rotation_z),
            rotation_z,
            zoom,
        }
    }

    /// The canonical steady pose
    pub fn steady(config: &WorldConfig) -> Self {
        Self::look_from(STEADY_VIEWPOINT, SPIN_ROTATION_STEADY, config.zoom)
    }
}

/// Viewpoint direction from the smoothed motion averages
///
/// Averages are in milli-g and become viewpoint coordinates in g; the Y
/// and Z axes flip sign to map sensor coordinates onto display
/// coordinates.
pub fn viewpoint_from_motion(samplers: &TriAxisSampler) -> R3 {
    R3::new(
        Fixed32::from_scaled_1000(samplers.x.average()),
        -Fixed32::from_scaled_1000(samplers.y.average()),
        -Fixed32::from_scaled_1000(samplers.z.average()),
    )
}
