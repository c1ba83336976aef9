//! Single-slot exchange primitive.
//!
//! A [`Slot`] holds at most one value and only supports whole-value exchange:
//! `replace` installs a new value and hands back the previous one in a single
//! critical section. Completion callbacks, one-shot layout finish actions and
//! cached rasters all live in slots, so a caller that wins the exchange is the
//! only one that can observe (and fire, or drop) the displaced value.

use std::sync::{Mutex, MutexGuard, PoisonError};

pub struct Slot<T> {
    inner: Mutex<Option<T>>,
}

impl<T> Slot<T> {
    pub const fn empty() -> Self {
        Self {
            inner: Mutex::new(None),
        }
    }

    pub fn new(value: Option<T>) -> Self {
        Self {
            inner: Mutex::new(value),
        }
    }

    /// Install `value` and return whatever was there before.
    pub fn replace(&self, value: Option<T>) -> Option<T> {
        std::mem::replace(&mut *self.lock(), value)
    }

    pub fn take(&self) -> Option<T> {
        self.lock().take()
    }

    pub fn is_occupied(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Option<T>> {
        // A panicking callback never runs under this lock, so the data is intact.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> Slot<T> {
    pub fn get_cloned(&self) -> Option<T> {
        self.lock().clone()
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> std::fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slot")
            .field("occupied", &self.is_occupied())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/slot.rs"]
mod tests;
