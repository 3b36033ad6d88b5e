//! The world: mode transitions, per-frame animation and scene assembly
//!
//! `World` owns every piece of animated state and advances it purely in
//! response to dispatched events. It never touches timers or sensors
//! itself; everything it wants from the host comes back as directives,
//! which makes the full mode cycle drivable from tests.

use crate::camera::{viewpoint_from_motion, CameraPose};
use crate::clock::{ClockFace, DigitStyle, FlipProgress, TimeOfDay, DIGIT_COUNT};
use crate::config::{
    Transparency, WorldConfig, LAUNCH_SPIN_RANGE, SPIN_ROTATION_QUANTA, SPIN_ROTATION_STEADY,
};
use crate::easing::{CurveKind, CurveTable};
use crate::math::{normalize_angle, Fixed32};
use crate::sampler::{MotionReading, TriAxisSampler, ACCEL_SAMPLER_CAPACITY, STEADY_READING};
use crate::scheduler::FrameScheduler;
use crate::state::events::{Directive, Directives, Event, TapAxis, TickGranularity};
use crate::state::mode::{Mode, ModeKind, SpinState};

/// One digit cell as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitView {
    pub value: u8,
    /// Flip fractions while the cell is animating, `None` at rest
    pub flip: Option<FlipProgress>,
}

/// Snapshot of everything the renderer needs for one draw
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Scene {
    pub camera: CameraPose,
    pub transparency: Transparency,
    pub time: TimeOfDay,
    pub style: DigitStyle,
    pub digits: [DigitView; DIGIT_COUNT],
}

/// Top-level animated state machine
pub struct World {
    config: WorldConfig,
    mode: Mode,
    spin: SpinState,
    samplers: TriAxisSampler,
    spin_curve: CurveTable,
    flip_rotation_curve: CurveTable,
    flip_translation_curve: CurveTable,
    face: ClockFace,
    camera: CameraPose,
    frames: FrameScheduler,
    seconds_inactive: u32,
}

impl World {
    /// Build a world in the `Undefined` mode; call [`World::start`] to
    /// enter the configured initial mode
    ///
    /// Step counts beyond the i16 animation countdown range are clamped.
    pub fn new(mut config: WorldConfig) -> Self {
        config.spin_steps = config.spin_steps.min(i16::MAX as u16);
        config.flip_steps = config.flip_steps.min(i16::MAX as u16);
        Self {
            mode: Mode::Undefined,
            spin: SpinState::new(),
            samplers: TriAxisSampler::new(),
            spin_curve: CurveTable::build(CurveKind::EaseInOut, config.spin_steps),
            flip_rotation_curve: CurveTable::build(CurveKind::EaseInOut, config.flip_steps),
            flip_translation_curve: CurveTable::build(CurveKind::YoYo, config.flip_steps),
            face: ClockFace::new(config.flip_steps),
            camera: CameraPose::steady(&config),
            frames: FrameScheduler::new(config.frame_interval_ms),
            seconds_inactive: 0,
            config,
        }
    }

    /// Leave `Undefined` for the configured initial mode and request the
    /// current wall time
    pub fn start(&mut self) -> Directives {
        let mut out = Directives::new();
        self.set_mode(self.config.initial_mode, &mut out);
        let _ = out.push(Directive::RefreshTime);
        out
    }

    /// Release every host resource; the world is quiescent afterwards
    pub fn stop(&mut self) -> Directives {
        let mut out = Directives::new();
        self.frames.cancel(&mut out);
        let _ = out.push(Directive::UnsubscribeTicks);
        let _ = out.push(Directive::StopMotionSampling);
        out
    }

    /// Feed one host event through the state machine
    pub fn dispatch(&mut self, event: Event) -> Directives {
        let mut out = Directives::new();
        match event {
            Event::Frame { motion } => self.on_frame(motion, &mut out),
            Event::Tick { time } => self.on_tick(time, &mut out),
            Event::Tap { axis } => self.on_tap(axis, &mut out),
        }
        out
    }

    /// Request a mode directly; a request for the current mode is a
    /// complete no-op
    pub fn request_mode(&mut self, kind: ModeKind) -> Directives {
        let mut out = Directives::new();
        self.set_mode(kind, &mut out);
        out
    }

    /// Active mode
    pub fn mode(&self) -> ModeKind {
        self.mode.kind()
    }

    /// Current spin rotation and speed
    pub fn spin(&self) -> SpinState {
        self.spin
    }

    /// Camera pose of the last advanced frame
    pub fn camera(&self) -> CameraPose {
        self.camera
    }

    /// Whether a frame timer is outstanding
    pub fn frame_pending(&self) -> bool {
        self.frames.is_pending()
    }

    /// Snapshot the renderable state
    pub fn scene(&self) -> Scene {
        let mut digits = [DigitView {
            value: 0,
            flip: None,
        }; DIGIT_COUNT];
        for (index, digit) in digits.iter_mut().enumerate() {
            digit.value = self.face.digit_value(index);
            digit.flip = self.face.flip_progress(
                index,
                &self.flip_rotation_curve,
                &self.flip_translation_curve,
            );
        }

        Scene {
            camera: self.camera,
            transparency: self.config.transparency,
            time: self.face.time(),
            style: self.face.style(),
            digits,
        }
    }

    fn set_mode(&mut self, kind: ModeKind, out: &mut Directives) {
        if self.mode.kind() == kind {
            return;
        }

        match kind {
            // Never re-entered after startup.
            ModeKind::Undefined => {}
            ModeKind::Launch => {
                self.mode = Mode::Launch {
                    step: self.config.spin_steps as i16,
                };
                let _ = out.push(Directive::StartMotionSampling);
                let _ = out.push(Directive::SubscribeTicks(TickGranularity::Second));
                let _ = out.push(Directive::RefreshTime);
            }
            ModeKind::Dynamic => {
                self.mode = Mode::Dynamic;
                self.seconds_inactive = 0;
            }
            ModeKind::Park => {
                self.mode = Mode::Park {
                    step: self.config.spin_steps as i16,
                    range: self.spin.rotation - SPIN_ROTATION_STEADY,
                };
            }
            ModeKind::Steady => {
                self.mode = Mode::Steady;
                self.spin = SpinState::new();
                self.camera = CameraPose::steady(&self.config);
                let _ = out.push(Directive::UnsubscribeTicks);
                let _ = out.push(Directive::StopMotionSampling);
                let _ = out.push(Directive::SubscribeTicks(TickGranularity::Minute));
                self.frames.cancel(out);
            }
        }
    }

    fn on_frame(&mut self, motion: Option<MotionReading>, out: &mut Directives) {
        self.frames.on_fired();
        self.face.update_animation();

        if !self.mode.is_steady() {
            self.feed_samplers(motion);
            let rotation = self.advance_mode(out);
            // advance_mode may have parked into steady, which pins the
            // camera itself.
            if !self.mode.is_steady() {
                self.camera = CameraPose::look_from(
                    viewpoint_from_motion(&self.samplers),
                    rotation,
                    self.config.zoom,
                );
            }
        }

        let _ = out.push(Directive::RequestRedraw);

        if !self.mode.is_steady() || self.face.is_animated() {
            self.frames.arm(out);
        }
    }

    fn on_tick(&mut self, time: TimeOfDay, out: &mut Directives) {
        self.face.set_time(time);

        if matches!(self.mode, Mode::Dynamic) {
            if self.spin.speed == 0 {
                self.seconds_inactive += 1;
            }
            if self.seconds_inactive > self.config.inactivity_max_s {
                self.set_mode(ModeKind::Park, out);
            }
        }

        self.frames.arm_now(out);
    }

    fn on_tap(&mut self, axis: TapAxis, out: &mut Directives) {
        self.seconds_inactive = 0;

        if self.mode.is_steady() {
            match axis {
                TapAxis::X => {
                    self.face.cycle_style();
                    let _ = out.push(Directive::RefreshTime);
                }
                TapAxis::Y => self.set_mode(ModeKind::Launch, out),
                TapAxis::Z => {}
            }
        } else {
            match axis {
                TapAxis::X => self.face.animate_all(),
                TapAxis::Y => self.spin.speed = self.config.spin_speed_after_twist,
                TapAxis::Z => {}
            }
        }
    }

    /// Push one reading per frame; the steady attractor stands in when
    /// the sensor has nothing, and during the park tail so the window is
    /// fully settled by the time steady pins the camera
    fn feed_samplers(&mut self, motion: Option<MotionReading>) {
        let park_tail = matches!(
            self.mode,
            Mode::Park { step, .. } if step < ACCEL_SAMPLER_CAPACITY as i16
        );
        let reading = match motion {
            Some(r) if !r.is_no_signal() && !park_tail => r,
            _ => STEADY_READING,
        };
        self.samplers.push(reading);
    }

    /// Advance the mode animation by one frame and return the rotation to
    /// render with
    fn advance_mode(&mut self, out: &mut Directives) -> Fixed32 {
        match self.mode {
            Mode::Launch { step } => {
                if step >= 0 {
                    let swept = Fixed32::ONE - self.spin_curve.value_at(step as u16);
                    self.spin.rotation =
                        normalize_angle(SPIN_ROTATION_STEADY + swept.mul(LAUNCH_SPIN_RANGE));
                    self.mode = Mode::Launch { step: step - 1 };
                } else {
                    self.spin.rotation =
                        normalize_angle(SPIN_ROTATION_STEADY + LAUNCH_SPIN_RANGE);
                    self.set_mode(ModeKind::Dynamic, out);
                }
                self.spin.rotation
            }
            Mode::Dynamic => {
                self.spin.apply_friction();
                if self.spin.speed != 0 {
                    self.spin.rotation = normalize_angle(
                        self.spin.rotation + SPIN_ROTATION_QUANTA.mul_int(self.spin.speed),
                    );
                }
                self.spin.rotation
            }
            Mode::Park { step, range } => {
                if step >= 0 {
                    let remaining = self.spin_curve.value_at(step as u16);
                    self.spin.rotation =
                        normalize_angle(SPIN_ROTATION_STEADY + remaining.mul(range));
                    self.mode = Mode::Park {
                        step: step - 1,
                        range,
                    };
                } else {
                    self.set_mode(ModeKind::Steady, out);
                }
                self.spin.rotation
            }
            Mode::Steady | Mode::Undefined => SPIN_ROTATION_STEADY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started_world() -> World {
        let mut world = World::new(WorldConfig::default());
        let _ = world.start();
        world
    }

    fn frame(world: &mut World) -> Directives {
        world.dispatch(Event::Frame { motion: None })
    }

    fn tick(world: &mut World, second: u8) -> Directives {
        world.dispatch(Event::Tick {
            time: TimeOfDay {
                day: 14,
                hour: 12,
                minute: 30,
                second,
            },
        })
    }

    #[test]
    fn test_start_enters_steady_and_subscribes_minutes() {
        let mut world = World::new(WorldConfig::default());
        let out = world.start();
        assert_eq!(world.mode(), ModeKind::Steady);
        assert!(out.contains(&Directive::SubscribeTicks(TickGranularity::Minute)));
        assert!(out.contains(&Directive::RefreshTime));
        assert!(!world.frame_pending());
    }

    #[test]
    fn test_twist_in_steady_launches() {
        let mut world = started_world();
        let out = world.dispatch(Event::Tap { axis: TapAxis::Y });

        assert_eq!(world.mode(), ModeKind::Launch);
        assert!(out.contains(&Directive::StartMotionSampling));
        assert!(out.contains(&Directive::SubscribeTicks(TickGranularity::Second)));
        assert!(out.contains(&Directive::RefreshTime));
    }

    #[test]
    fn test_launch_sweeps_into_dynamic() {
        let mut world = started_world();
        let _ = world.dispatch(Event::Tap { axis: TapAxis::Y });
        let _ = tick(&mut world, 0);

        // spin_steps + 1 frames walk the curve, one more finishes.
        for _ in 0..=75 {
            assert_eq!(world.mode(), ModeKind::Launch);
            let _ = frame(&mut world);
        }
        let _ = frame(&mut world);

        assert_eq!(world.mode(), ModeKind::Dynamic);
        let expected = SPIN_ROTATION_STEADY + LAUNCH_SPIN_RANGE;
        assert_eq!(world.spin().rotation, expected);
    }

    #[test]
    fn test_launch_rotation_is_monotone() {
        let mut world = started_world();
        let _ = world.dispatch(Event::Tap { axis: TapAxis::Y });

        let mut last = SPIN_ROTATION_STEADY;
        for _ in 0..=75 {
            let _ = frame(&mut world);
            let rotation = world.spin().rotation;
            assert!(rotation >= last);
            last = rotation;
        }
    }

    fn dynamic_world() -> World {
        let mut world = started_world();
        let _ = world.dispatch(Event::Tap { axis: TapAxis::Y });
        for _ in 0..=76 {
            let _ = frame(&mut world);
        }
        assert_eq!(world.mode(), ModeKind::Dynamic);
        world
    }

    #[test]
    fn test_twist_in_dynamic_spins() {
        let mut world = dynamic_world();
        assert_eq!(world.spin().speed, 0);

        let _ = world.dispatch(Event::Tap { axis: TapAxis::Y });
        assert_eq!(world.spin().speed, 400);

        let before = world.spin().rotation;
        let _ = frame(&mut world);
        // One friction step, then 399 quanta of rotation.
        assert_eq!(world.spin().speed, 399);
        assert_eq!(
            world.spin().rotation,
            normalize_angle(before + SPIN_ROTATION_QUANTA.mul_int(399))
        );
    }

    #[test]
    fn test_punch_in_dynamic_flips_all_digits() {
        let mut world = dynamic_world();
        let _ = world.dispatch(Event::Tap { axis: TapAxis::X });
        let scene = world.scene();
        assert!(scene.digits.iter().all(|d| d.flip.is_some()));
    }

    #[test]
    fn test_inactivity_parks() {
        let mut world = dynamic_world();
        for second in 0..5u8 {
            let _ = tick(&mut world, second);
            assert_eq!(world.mode(), ModeKind::Dynamic);
        }
        let _ = tick(&mut world, 5);
        assert_eq!(world.mode(), ModeKind::Park);
    }

    #[test]
    fn test_taps_reset_inactivity() {
        let mut world = dynamic_world();
        for second in 0..5u8 {
            let _ = tick(&mut world, second);
        }
        let _ = world.dispatch(Event::Tap { axis: TapAxis::Z });
        for second in 5..10u8 {
            let _ = tick(&mut world, second);
            assert_eq!(world.mode(), ModeKind::Dynamic);
        }
    }

    #[test]
    fn test_spinning_defers_parking() {
        let mut world = dynamic_world();
        let _ = world.dispatch(Event::Tap { axis: TapAxis::Y });
        for second in 0..30u8 {
            let _ = tick(&mut world, second);
            let _ = frame(&mut world);
            assert_eq!(world.mode(), ModeKind::Dynamic);
        }
        assert!(world.spin().speed < 400);
    }

    fn parked_world() -> World {
        let mut world = dynamic_world();
        for second in 0..6u8 {
            let _ = tick(&mut world, second);
        }
        assert_eq!(world.mode(), ModeKind::Park);
        world
    }

    #[test]
    fn test_park_settles_into_steady() {
        let mut world = parked_world();
        for _ in 0..=75 {
            assert_eq!(world.mode(), ModeKind::Park);
            let _ = frame(&mut world);
        }
        let out = frame(&mut world);

        assert_eq!(world.mode(), ModeKind::Steady);
        assert_eq!(world.spin().rotation, SPIN_ROTATION_STEADY);
        assert_eq!(world.camera(), CameraPose::steady(&WorldConfig::default()));
        assert!(out.contains(&Directive::UnsubscribeTicks));
        assert!(out.contains(&Directive::StopMotionSampling));
        assert!(out.contains(&Directive::SubscribeTicks(TickGranularity::Minute)));
    }

    #[test]
    fn test_park_tail_forces_attractor() {
        let mut world = parked_world();
        let loud = MotionReading {
            x: 900,
            y: 900,
            z: 900,
        };
        for _ in 0..=76 {
            let _ = world.dispatch(Event::Frame { motion: Some(loud) });
        }

        // The last ACCEL_SAMPLER_CAPACITY frames of the park ignored the
        // sensor, so the window sits exactly on the attractor.
        assert_eq!(world.samplers_average(), (-81, -816, -571));
    }

    #[test]
    fn test_steady_frames_stop_once_quiet() {
        let mut world = started_world();
        // A minute tick flips digits and arms the frame timer.
        let out = tick(&mut world, 0);
        assert!(out.contains(&Directive::ScheduleFrame { delay_ms: 0 }));

        // Frames keep rearming until every flip drains, then stop.
        for _ in 0..50 {
            let out = frame(&mut world);
            assert!(out.contains(&Directive::ScheduleFrame { delay_ms: 40 }));
        }
        let out = frame(&mut world);
        assert!(out.contains(&Directive::RequestRedraw));
        assert!(!out.iter().any(|d| matches!(d, Directive::ScheduleFrame { .. })));
        assert!(!world.frame_pending());
    }

    #[test]
    fn test_tick_with_pending_frame_reschedules() {
        let mut world = dynamic_world();
        let _ = tick(&mut world, 0);
        assert!(world.frame_pending());

        let out = tick(&mut world, 1);
        assert!(out.contains(&Directive::RescheduleFrameNow));
        assert!(!out.iter().any(|d| matches!(d, Directive::ScheduleFrame { .. })));
    }

    #[test]
    fn test_oversized_spin_steps_clamp() {
        let mut config = WorldConfig::default();
        config.spin_steps = u16::MAX;
        let mut world = World::new(config);
        let _ = world.start();
        let _ = world.dispatch(Event::Tap { axis: TapAxis::Y });

        // The countdown starts at the clamped step; an unclamped config
        // would wrap negative and fall straight through to Dynamic.
        let _ = frame(&mut world);
        assert_eq!(world.mode(), ModeKind::Launch);
    }

    #[test]
    fn test_mode_request_is_idempotent() {
        let mut world = started_world();
        let out = world.request_mode(ModeKind::Steady);
        assert!(out.is_empty());

        let _ = world.request_mode(ModeKind::Launch);
        let out = world.request_mode(ModeKind::Launch);
        assert!(out.is_empty());
        assert_eq!(world.mode(), ModeKind::Launch);
    }

    #[test]
    fn test_punch_in_steady_cycles_style() {
        let mut world = started_world();
        let before = world.scene().style;
        let out = world.dispatch(Event::Tap { axis: TapAxis::X });
        assert_ne!(world.scene().style, before);
        assert!(out.contains(&Directive::RefreshTime));
        assert_eq!(world.mode(), ModeKind::Steady);
    }

    #[test]
    fn test_stop_releases_everything() {
        let mut world = dynamic_world();
        let _ = tick(&mut world, 0);
        let out = world.stop();

        assert!(out.contains(&Directive::CancelFrame));
        assert!(out.contains(&Directive::UnsubscribeTicks));
        assert!(out.contains(&Directive::StopMotionSampling));
        assert!(!world.frame_pending());
    }

    #[test]
    fn test_scene_reflects_time() {
        let mut world = started_world();
        let _ = tick(&mut world, 42);
        let scene = world.scene();
        assert_eq!(scene.time.second, 42);
        assert_eq!(scene.digits[6].value, 4);
        assert_eq!(scene.digits[7].value, 2);
        assert_eq!(scene.transparency, Transparency::Solid);
    }
}

#[cfg(test)]
impl World {
    /// Test-only view of the smoothed motion window
    fn samplers_average(&self) -> (i32, i32, i32) {
        (
            self.samplers.x.average(),
            self.samplers.y.average(),
            self.samplers.z.average(),
        )
    }
}
