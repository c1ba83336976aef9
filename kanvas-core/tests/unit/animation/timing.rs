use super::*;

#[test]
fn instant_timing_is_always_complete() {
    assert!(AnimationTiming::NO_ANIMATION.is_instant());
    assert_eq!(AnimationTiming::NO_ANIMATION.progress(Duration::ZERO), 1.0);
}

#[test]
fn progress_follows_the_curve_and_saturates() {
    let t = AnimationTiming::new(Duration::from_millis(100), Ease::Linear);
    assert_eq!(t.progress(Duration::ZERO), 0.0);
    assert!((t.progress(Duration::from_millis(25)) - 0.25).abs() < 1e-9);
    assert_eq!(t.progress(Duration::from_millis(100)), 1.0);
    assert_eq!(t.progress(Duration::from_secs(9)), 1.0);
}

#[test]
fn manual_clock_clones_share_time() {
    let a = ManualClock::new();
    let b = a.clone();
    let start = a.now();
    b.advance(Duration::from_millis(40));
    assert_eq!(a.now() - start, Duration::from_millis(40));
}
