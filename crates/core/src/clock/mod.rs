use std::time::{Duration, Instant};

/// Degrees the cube caption advances per second.
const DEGREES_PER_SECOND: f64 = 50.0;

/// Time source for cosmetic animation.
pub trait Clock {
    /// Time elapsed since the clock's origin.
    fn elapsed(&self) -> Duration;
}

/// Monotonic wall clock started when the session begins.
#[derive(Debug, Clone, Copy)]
pub struct PlaybackClock {
    origin: Instant,
}

impl PlaybackClock {
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::start()
    }
}

impl Clock for PlaybackClock {
    fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock frozen at a given offset, used to render deterministic frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedClock(pub Duration);

impl FixedClock {
    /// Negative and NaN offsets clamp to zero, overflowing ones to
    /// [`Duration::MAX`].
    pub fn at_secs_f64(seconds: f64) -> Self {
        Self(Duration::try_from_secs_f64(seconds.max(0.0)).unwrap_or(Duration::MAX))
    }
}

impl Clock for FixedClock {
    fn elapsed(&self) -> Duration {
        self.0
    }
}

/// Rotation angle shown next to the cube: `floor(seconds * 50) mod 360`.
pub fn rotation_angle(elapsed: Duration) -> u32 {
    let steps = (elapsed.as_secs_f64() * DEGREES_PER_SECOND).floor() as u64;
    (steps % 360) as u32
}
