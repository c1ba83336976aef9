use super::*;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn replace_returns_previous_value() {
    let slot = Slot::new(Some(1));
    assert_eq!(slot.replace(Some(2)), Some(1));
    assert_eq!(slot.replace(None), Some(2));
    assert!(!slot.is_occupied());
}

#[test]
fn take_empties_the_slot() {
    let slot = Slot::new(Some("a"));
    assert_eq!(slot.take(), Some("a"));
    assert_eq!(slot.take(), None);
}

#[test]
fn concurrent_replacers_see_every_value_exactly_once() {
    let slot = Arc::new(Slot::<usize>::empty());
    let seen = Arc::new(AtomicUsize::new(0));
    let handles: Vec<_> = (1..=8)
        .map(|i| {
            let slot = Arc::clone(&slot);
            let seen = Arc::clone(&seen);
            std::thread::spawn(move || {
                if let Some(prev) = slot.replace(Some(i)) {
                    seen.fetch_add(prev, Ordering::SeqCst);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    let last = slot.take().unwrap();
    assert_eq!(seen.load(Ordering::SeqCst) + last, (1..=8).sum::<usize>());
}
