//! Motion-sample smoothing
//!
//! Each axis keeps a fixed-capacity ring of the most recent raw readings
//! with an incrementally maintained sum, so pushing a sample and taking
//! the moving average are both O(1). The ring is pre-filled with the
//! steady-attractor reading at construction, so the very first average is
//! already meaningful and the camera never sees a warm-up transient.

/// Ring capacity per axis in the reference configuration
pub const ACCEL_SAMPLER_CAPACITY: usize = 8;

/// Resting reading that attracts the camera toward the steady viewpoint
pub const STEADY_READING: MotionReading = MotionReading {
    x: -81,
    y: -816,
    z: -571,
};

/// One raw accelerometer sample in milli-g
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionReading {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl MotionReading {
    /// Sensor backends emit this exact triple when no real signal is
    /// present (e.g. an emulator with sensors off); it is treated the same
    /// as an unavailable sensor.
    pub const NO_SIGNAL: Self = Self {
        x: 0,
        y: 0,
        z: -1000,
    };

    /// Check for the no-signal sentinel
    pub fn is_no_signal(&self) -> bool {
        *self == Self::NO_SIGNAL
    }
}

/// Fixed-capacity moving-average window over one axis
///
/// `N` must be non-zero; `sum` always equals the sum of the `N` values
/// currently in the ring.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sampler<const N: usize> {
    samples: [i16; N],
    head: usize,
    sum: i32,
}

impl<const N: usize> Sampler<N> {
    /// Create a sampler with every slot holding `fill`
    pub fn new(fill: i16) -> Self {
        Self {
            samples: [fill; N],
            head: 0,
            sum: fill as i32 * N as i32,
        }
    }

    /// Insert a reading, evicting the oldest
    pub fn push(&mut self, value: i16) {
        self.sum += value as i32 - self.samples[self.head] as i32;
        self.samples[self.head] = value;
        self.head = (self.head + 1) % N;
    }

    /// Sum of the values currently in the ring
    pub fn sum(&self) -> i32 {
        self.sum
    }

    /// Moving average (truncating integer division)
    pub fn average(&self) -> i32 {
        self.sum / N as i32
    }
}

/// One sampler per motion axis
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TriAxisSampler {
    pub x: Sampler<ACCEL_SAMPLER_CAPACITY>,
    pub y: Sampler<ACCEL_SAMPLER_CAPACITY>,
    pub z: Sampler<ACCEL_SAMPLER_CAPACITY>,
}

impl TriAxisSampler {
    /// Create with every axis resting at the steady attractor
    pub fn new() -> Self {
        Self {
            x: Sampler::new(STEADY_READING.x),
            y: Sampler::new(STEADY_READING.y),
            z: Sampler::new(STEADY_READING.z),
        }
    }

    /// Push a whole reading, one value per axis
    pub fn push(&mut self, reading: MotionReading) {
        self.x.push(reading.x);
        self.y.push(reading.y);
        self.z.push(reading.z);
    }
}

impl Default for TriAxisSampler {
    fn default() -> Self {
        Self::new()
    }
}
