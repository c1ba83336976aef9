use std::{
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

use crate::animation::ease::Ease;

/// Duration plus curve of one animated change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationTiming {
    pub duration: Duration,
    pub ease: Ease,
}

impl AnimationTiming {
    /// Changes apply immediately.
    pub const NO_ANIMATION: Self = Self::new(Duration::ZERO, Ease::Linear);
    pub const FAST: Self = Self::new(Duration::from_millis(200), Ease::Smooth);
    pub const SMOOTH: Self = Self::new(Duration::from_millis(500), Ease::Smooth);
    pub const SLOW: Self = Self::new(Duration::from_millis(1000), Ease::Smooth);

    pub const fn new(duration: Duration, ease: Ease) -> Self {
        Self { duration, ease }
    }

    pub fn is_instant(&self) -> bool {
        self.duration.is_zero()
    }

    /// Eased progress in `[0, 1]` after `elapsed`.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.is_instant() || elapsed >= self.duration {
            return 1.0;
        }
        self.ease
            .apply(elapsed.as_secs_f64() / self.duration.as_secs_f64())
    }
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self::SMOOTH
    }
}

/// Time source sampled at draw/access time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timing.rs"]
mod tests;
