use super::*;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::animation::ease::Ease;

fn linear(ms: u64) -> AnimationTiming {
    AnimationTiming::new(Duration::from_millis(ms), Ease::Linear)
}

fn recorder() -> (Arc<Mutex<Vec<usize>>>, impl Fn(usize) -> AnimationAction) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let make = {
        let log = Arc::clone(&log);
        move |n: usize| -> AnimationAction {
            let log = Arc::clone(&log);
            Box::new(move || log.lock().unwrap().push(n))
        }
    };
    (log, make)
}

#[test]
fn interpolates_between_start_and_target() {
    let t0 = Instant::now();
    let v = Animated::new(0.0);
    v.start_animation_to(10.0, linear(100), None, t0);
    assert_eq!(v.get(t0), 0.0);
    assert!((v.get(t0 + Duration::from_millis(50)) - 5.0).abs() < 1e-9);
    assert_eq!(v.get_predict(), 10.0);
    assert_eq!(v.get(t0 + Duration::from_millis(100)), 10.0);
    assert!(!v.in_animation(t0 + Duration::from_millis(101)));
}

#[test]
fn completion_fires_once_on_lazy_access() {
    let t0 = Instant::now();
    let (log, make) = recorder();
    let v = Animated::new(Point::ZERO);
    v.start_animation_to(Point::new(4.0, 8.0), linear(10), Some(make(1)), t0);
    assert!(log.lock().unwrap().is_empty());
    assert_eq!(v.get(t0 + Duration::from_millis(20)), Point::new(4.0, 8.0));
    v.get(t0 + Duration::from_millis(30));
    v.get(t0 + Duration::from_millis(40));
    assert_eq!(*log.lock().unwrap(), vec![1]);
}

#[test]
fn superseding_start_fires_previous_callback_first() {
    let t0 = Instant::now();
    let (log, make) = recorder();
    let v = Animated::new(0.0);
    v.start_animation_to(1.0, linear(100), Some(make(1)), t0);
    v.start_animation_to(2.0, linear(100), Some(make(2)), t0 + Duration::from_millis(10));
    assert_eq!(*log.lock().unwrap(), vec![1]);
    v.get(t0 + Duration::from_millis(500));
    assert_eq!(*log.lock().unwrap(), vec![1, 2]);
}

#[test]
fn every_supplied_callback_fires_exactly_once_in_call_order() {
    let t0 = Instant::now();
    let (log, make) = recorder();
    let v = Animated::new(0.0);
    let mut expected = Vec::new();
    for i in 0..12 {
        let cb = if i % 3 == 1 {
            None
        } else {
            expected.push(i);
            Some(make(i))
        };
        let timing = if i % 4 == 0 {
            AnimationTiming::NO_ANIMATION
        } else {
            linear(30)
        };
        v.start_animation_to(i as f64, timing, cb, t0 + Duration::from_millis(i as u64 * 7));
    }
    v.get(t0 + Duration::from_secs(1));
    v.get(t0 + Duration::from_secs(2));
    assert_eq!(*log.lock().unwrap(), expected);
}

#[test]
fn new_animation_starts_from_the_transient_value() {
    let t0 = Instant::now();
    let v = Animated::new(0.0);
    v.start_animation_to(100.0, linear(100), None, t0);
    v.start_animation_to(0.0, linear(100), None, t0 + Duration::from_millis(50));
    assert!((v.get(t0 + Duration::from_millis(50)) - 50.0).abs() < 1e-9);
    assert!((v.get(t0 + Duration::from_millis(100)) - 25.0).abs() < 1e-9);
}

#[test]
fn instant_timing_sets_value_and_fires_immediately() {
    let t0 = Instant::now();
    let (log, make) = recorder();
    let v = Animated::new(1.0);
    v.start_animation_to(3.0, AnimationTiming::NO_ANIMATION, Some(make(9)), t0);
    assert_eq!(*log.lock().unwrap(), vec![9]);
    assert_eq!(v.get(t0), 3.0);
    assert!(!v.has_pending_callback());
}

#[test]
fn set_fires_pending_callback() {
    let t0 = Instant::now();
    let (log, make) = recorder();
    let v = Animated::new(0.0);
    v.start_animation_to(5.0, linear(1000), Some(make(3)), t0);
    v.set(-1.0);
    assert_eq!(*log.lock().unwrap(), vec![3]);
    assert_eq!(v.get(t0 + Duration::from_secs(5)), -1.0);
}

#[test]
fn callback_may_restart_the_same_animatable() {
    let t0 = Instant::now();
    let v = Arc::new(Animated::new(0.0));
    let fired = Arc::new(Mutex::new(0));
    let chained: AnimationAction = {
        let v = Arc::clone(&v);
        let fired = Arc::clone(&fired);
        Box::new(move || {
            *fired.lock().unwrap() += 1;
            v.start_animation_to(0.0, linear(10), None, t0 + Duration::from_millis(10));
        })
    };
    v.start_animation_to(1.0, linear(10), Some(chained), t0);
    assert_eq!(v.get(t0 + Duration::from_millis(10)), 1.0);
    assert_eq!(*fired.lock().unwrap(), 1);
    assert_eq!(v.get_predict(), 0.0);
}
