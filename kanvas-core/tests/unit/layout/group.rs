use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::layout::linear::LinearLayout;

fn counting_hook() -> (FinishHook, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&count);
    (
        Arc::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }),
        count,
    )
}

#[test]
fn free_layout_leaves_members_in_place() {
    let extents = [
        MemberExtent {
            bbox: Some(Rect::new(0.0, 0.0, 1.0, 1.0)),
            visible: true,
        },
        MemberExtent {
            bbox: None,
            visible: false,
        },
    ];
    assert_eq!(FreeLayout.arrange(&extents).unwrap(), vec![None, None]);
}

#[test]
fn new_groups_need_a_layout_but_have_no_finish_action() {
    let mut g = GroupPass::new(Box::new(FreeLayout));
    assert!(g.needs_layout());
    assert!(!g.has_pending_finish());
    assert!(g.complete_layout().is_none());
    assert!(!g.needs_layout());
}

#[test]
fn invalidate_arms_the_hook_once() {
    let (hook, count) = counting_hook();
    let mut g = GroupPass::new(Box::new(FreeLayout));
    g.set_on_finish(Some(hook));
    g.invalidate();
    assert!(g.has_pending_finish());
    assert_eq!(count.load(Ordering::SeqCst), 0);

    let action = g.complete_layout().unwrap();
    action();
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(g.complete_layout().is_none());
}

#[test]
fn re_arming_fires_the_displaced_action() {
    let (hook, count) = counting_hook();
    let mut g = GroupPass::new(Box::new(FreeLayout));
    g.set_on_finish(Some(hook));
    g.invalidate();
    g.invalidate();
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(g.has_pending_finish());
}

#[test]
fn layout_downcasts_to_the_concrete_type() {
    let mut g = GroupPass::new(Box::new(LinearLayout::horizontal(4.0).unwrap()));
    assert!(g.layout::<FreeLayout>().is_none());
    assert_eq!(g.layout::<LinearLayout>().map(|l| l.spacing()), Some(4.0));
    g.layout_mut::<LinearLayout>()
        .unwrap()
        .set_spacing(8.0)
        .unwrap();
    assert_eq!(g.layout::<LinearLayout>().map(|l| l.spacing()), Some(8.0));
}
