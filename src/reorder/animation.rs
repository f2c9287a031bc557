use std::time::Duration;

/// Where an [`AnimationDriver`] is in its `0..=1` run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnimationStatus {
    /// Stopped at `0`.
    #[default]
    Dismissed,
    /// Running towards `1`.
    Forward,
    /// Running towards `0`.
    Reverse,
    /// Stopped at `1`.
    Completed,
}

/// An opaque progress source in `0..=1`.
///
/// The drag session never animates anything itself: it starts the driver, samples
/// [`AnimationDriver::value`] on every tick and reacts to [`AnimationDriver::status`] changes.
pub trait AnimationDriver {
    /// Run towards `1` from the current value.
    fn forward(&mut self);

    /// Run towards `0` from the current value.
    fn reverse(&mut self);

    fn value(&self) -> f32;

    fn status(&self) -> AnimationStatus;

    fn is_animating(&self) -> bool {
        matches!(
            self.status(),
            AnimationStatus::Forward | AnimationStatus::Reverse
        )
    }

    fn is_dismissed(&self) -> bool {
        self.status() == AnimationStatus::Dismissed
    }
}

/// A driver that is advanced explicitly by the host's frame loop.
pub trait FrameDriver: AnimationDriver {
    /// Advance by `dt` seconds.
    fn advance(&mut self, dt: f32);
}

/// Linear, duration-based [`FrameDriver`].
#[derive(Clone, Debug)]
pub struct LinearAnimationDriver {
    duration: Duration,
    value: f32,
    status: AnimationStatus,
}

impl LinearAnimationDriver {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            value: 0.0,
            status: AnimationStatus::Dismissed,
        }
    }
}

impl Default for LinearAnimationDriver {
    fn default() -> Self {
        Self::new(super::options::DEFAULT_ANIMATION_DURATION)
    }
}

impl AnimationDriver for LinearAnimationDriver {
    fn forward(&mut self) {
        self.status = if self.value >= 1.0 {
            self.value = 1.0;
            AnimationStatus::Completed
        } else {
            AnimationStatus::Forward
        };
    }

    fn reverse(&mut self) {
        self.status = if self.value <= 0.0 {
            self.value = 0.0;
            AnimationStatus::Dismissed
        } else {
            AnimationStatus::Reverse
        };
    }

    fn value(&self) -> f32 {
        self.value
    }

    fn status(&self) -> AnimationStatus {
        self.status
    }
}

impl FrameDriver for LinearAnimationDriver {
    fn advance(&mut self, dt: f32) {
        let secs = self.duration.as_secs_f32();
        let step = if secs > 0.0 { dt.max(0.0) / secs } else { 1.0 };

        match self.status {
            AnimationStatus::Forward => {
                self.value = (self.value + step).min(1.0);
                if self.value >= 1.0 {
                    self.status = AnimationStatus::Completed;
                }
            }
            AnimationStatus::Reverse => {
                self.value = (self.value - step).max(0.0);
                if self.value <= 0.0 {
                    self.status = AnimationStatus::Dismissed;
                }
            }
            AnimationStatus::Dismissed | AnimationStatus::Completed => {}
        }
    }
}

/// Linear interpolation between two values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tween {
    pub begin: f32,
    pub end: f32,
}

impl Tween {
    pub const ZERO: Self = Self {
        begin: 0.0,
        end: 0.0,
    };

    pub fn new(begin: f32, end: f32) -> Self {
        Self { begin, end }
    }

    #[inline]
    pub fn lerp(self, t: f32) -> f32 {
        self.begin + (self.end - self.begin) * t
    }
}

/// How a drop animation begins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DropStart {
    /// The driver is running in reverse; increments arrive through ticks.
    Animated,

    /// The driver already rests at `0`: apply this delta now and settle.
    Immediate(f32),
}

/// Turns driver progress into the synthetic deltas of the raise and drop animations.
///
/// The driver reports absolute progress; this converts it into increments so animated
/// motion can be fed through the same accumulation path as pointer motion.
#[derive(Clone, Debug, Default)]
pub struct RaiseDropAnimator {
    delta_track: Tween,
    elevation_track: Tween,
    last_applied: f32,
}

impl RaiseDropAnimator {
    /// Start the pick-up animation.
    ///
    /// `clip_amount` is how far the item's resting position lies outside the viewport;
    /// the floating item starts clipped into view and eases out to its exact position.
    pub fn begin_raise(
        &mut self,
        driver: &mut dyn AnimationDriver,
        clip_amount: f32,
        max_elevation: f32,
    ) {
        self.delta_track = Tween::new(0.0, clip_amount);
        self.elevation_track = Tween::new(0.0, max_elevation);
        self.last_applied = self.delta_track.lerp(driver.value());
        driver.forward();
    }

    /// Start the drop animation, `remaining` being the delta still needed to reach the
    /// hover slot's rest position.
    ///
    /// The driver reverses from wherever it currently is; the track's far end is scaled by
    /// that progress so the delta reaches exactly `remaining` when the driver reaches `0`.
    pub fn begin_drop(&mut self, driver: &mut dyn AnimationDriver, remaining: f32) -> DropStart {
        let from = driver.value();
        if from.is_nan() || from <= 0.0 {
            self.delta_track = Tween::ZERO;
            self.last_applied = 0.0;
            driver.reverse();
            return DropStart::Immediate(remaining);
        }

        self.delta_track = Tween::new(0.0, -remaining / from);
        self.last_applied = self.delta_track.lerp(from);
        driver.reverse();
        DropStart::Animated
    }

    /// The part of the delta track not yet applied.
    pub fn take_increment(&mut self, driver: &dyn AnimationDriver) -> f32 {
        let current = self.delta_track.lerp(driver.value());
        let increment = current - self.last_applied;
        self.last_applied = current;
        increment
    }

    /// Forget the delta track once the raise has completed.
    pub fn reset_increments(&mut self) {
        self.delta_track = Tween::ZERO;
        self.last_applied = 0.0;
    }

    pub fn last_applied(&self) -> f32 {
        self.last_applied
    }

    pub fn elevation(&self, driver: &dyn AnimationDriver) -> f32 {
        self.elevation_track.lerp(driver.value())
    }

    /// How far the painted item is pulled back inside the viewport edges.
    ///
    /// Fully applied once lifted, faded out again during the drop.
    pub fn edge_translation(
        &self,
        driver: &dyn AnimationDriver,
        leading: f32,
        item_extent: f32,
        viewport_extent: f32,
    ) -> f32 {
        let max_elevation = self.elevation_track.end;
        let lift = if max_elevation > 0.0 {
            (self.elevation(driver) / max_elevation).clamp(0.0, 1.0)
        } else {
            driver.value().clamp(0.0, 1.0)
        };
        let max = (viewport_extent - item_extent).max(0.0);
        (leading.clamp(0.0, max) - leading) * lift
    }
}
