//! Time-boxed interpolation of a value toward a target.
//!
//! Progress is evaluated lazily from the instant handed to [`Animated::get`];
//! there is no background timer. Each animatable owns at most one pending
//! completion callback. Starting a new animation swaps the callback slot and
//! fires whatever it displaced, so callbacks are never dropped and never run
//! twice. Callbacks always run after every internal lock is released, which
//! lets them start new animations on the same value.

use std::{
    sync::{Mutex, MutexGuard, PoisonError},
    time::Instant,
};

use crate::{
    animation::timing::AnimationTiming,
    foundation::core::{Point, Vec2},
    foundation::slot::Slot,
};

/// Callback fired once when an animation completes or is superseded.
pub type AnimationAction = Box<dyn FnOnce() + Send + 'static>;

/// Values that can be blended linearly.
pub trait Interpolate: Copy + Send + 'static {
    fn interpolate(from: Self, to: Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(from: Self, to: Self, t: f64) -> Self {
        from + (to - from) * t
    }
}

impl Interpolate for Point {
    fn interpolate(from: Self, to: Self, t: f64) -> Self {
        from.lerp(to, t)
    }
}

impl Interpolate for Vec2 {
    fn interpolate(from: Self, to: Self, t: f64) -> Self {
        from.lerp(to, t)
    }
}

#[derive(Clone, Copy, Debug)]
struct Transition<T> {
    from: T,
    to: T,
    start: Instant,
    timing: AnimationTiming,
}

#[derive(Debug)]
struct State<T> {
    current: T,
    transition: Option<Transition<T>>,
}

impl<T: Interpolate> State<T> {
    /// Move `current` to its value at `now`; true when the transition just ended.
    fn advance(&mut self, now: Instant) -> bool {
        let Some(tr) = self.transition else {
            return false;
        };
        let elapsed = now.saturating_duration_since(tr.start);
        if elapsed >= tr.timing.duration {
            self.current = tr.to;
            self.transition = None;
            return true;
        }
        self.current = T::interpolate(tr.from, tr.to, tr.timing.progress(elapsed));
        false
    }
}

pub struct Animated<T> {
    state: Mutex<State<T>>,
    on_finish: Slot<AnimationAction>,
}

impl<T: Interpolate> Animated<T> {
    pub fn new(value: T) -> Self {
        Self {
            state: Mutex::new(State {
                current: value,
                transition: None,
            }),
            on_finish: Slot::empty(),
        }
    }

    /// The value at `now`. Completes (and fires the pending callback of) an
    /// animation whose duration has elapsed.
    pub fn get(&self, now: Instant) -> T {
        let (value, finished) = {
            let mut state = self.lock();
            let done = state.advance(now);
            // Take under the state lock so a concurrent start cannot slip its
            // own callback in between.
            let finished = if done { self.on_finish.take() } else { None };
            (state.current, finished)
        };
        if let Some(action) = finished {
            action();
        }
        value
    }

    /// The value the animation converges to.
    pub fn get_predict(&self) -> T {
        let state = self.lock();
        state.transition.map_or(state.current, |tr| tr.to)
    }

    pub fn in_animation(&self, now: Instant) -> bool {
        self.get(now);
        self.lock().transition.is_some()
    }

    /// Jump to `value` immediately. A pending callback fires.
    pub fn set(&self, value: T) {
        let displaced = {
            let mut state = self.lock();
            state.current = value;
            state.transition = None;
            self.on_finish.take()
        };
        if let Some(action) = displaced {
            action();
        }
    }

    /// Animate from the value at `now` to `target`.
    ///
    /// A callback still pending from an earlier call fires before this returns.
    /// With an instant timing the value is set right away and `on_finish` fires
    /// right away as well.
    pub fn start_animation_to(
        &self,
        target: T,
        timing: AnimationTiming,
        on_finish: Option<AnimationAction>,
        now: Instant,
    ) {
        let (displaced, immediate) = {
            let mut state = self.lock();
            state.advance(now);
            if timing.is_instant() {
                state.current = target;
                state.transition = None;
                (self.on_finish.take(), on_finish)
            } else {
                state.transition = Some(Transition {
                    from: state.current,
                    to: target,
                    start: now,
                    timing,
                });
                (self.on_finish.replace(on_finish), None)
            }
        };
        if let Some(action) = displaced {
            action();
        }
        if let Some(action) = immediate {
            action();
        }
    }

    pub fn has_pending_callback(&self) -> bool {
        self.on_finish.is_occupied()
    }

    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Interpolate + std::fmt::Debug> std::fmt::Debug for Animated<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("Animated")
            .field("current", &state.current)
            .field("target", &state.transition.map(|tr| tr.to))
            .field("on_finish", &self.on_finish)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/animated.rs"]
mod tests;
