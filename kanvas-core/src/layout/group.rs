//! Groups: a render pass that owns an ordered member list and a layout.

use std::{any::Any, sync::Arc};

use crate::{
    animation::{animated::AnimationAction, timing::AnimationTiming},
    foundation::core::{Point, Rect},
    foundation::error::KanvasResult,
    foundation::slot::Slot,
    render::pass::PassId,
};

/// Reusable hook run after each completed layout.
pub type FinishHook = Arc<dyn Fn() + Send + Sync + 'static>;

/// What a layout sees of one member.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MemberExtent {
    pub bbox: Option<Rect>,
    pub visible: bool,
}

/// Placement policy of a group.
///
/// `arrange` returns one entry per member: the destination offset, or `None`
/// to leave the member where it is.
pub trait GroupLayout: Any + Send {
    fn arrange(&self, members: &[MemberExtent]) -> KanvasResult<Vec<Option<Point>>>;
}

/// Plain composite list: members keep whatever position they are given.
#[derive(Clone, Copy, Debug, Default)]
pub struct FreeLayout;

impl GroupLayout for FreeLayout {
    fn arrange(&self, members: &[MemberExtent]) -> KanvasResult<Vec<Option<Point>>> {
        Ok(vec![None; members.len()])
    }
}

pub struct GroupPass {
    pub(crate) members: Vec<PassId>,
    layout: Box<dyn GroupLayout>,
    timing: AnimationTiming,
    on_finish: Option<FinishHook>,
    pending_finish: Slot<AnimationAction>,
    needs_layout: bool,
}

impl GroupPass {
    pub(crate) fn new(layout: Box<dyn GroupLayout>) -> Self {
        Self {
            members: Vec::new(),
            layout,
            timing: AnimationTiming::default(),
            on_finish: None,
            pending_finish: Slot::empty(),
            needs_layout: true,
        }
    }

    pub fn members(&self) -> &[PassId] {
        &self.members
    }

    pub fn timing(&self) -> AnimationTiming {
        self.timing
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    pub fn has_pending_finish(&self) -> bool {
        self.pending_finish.is_occupied()
    }

    /// The layout, if it is an `L`.
    pub fn layout<L: GroupLayout>(&self) -> Option<&L> {
        let any: &dyn Any = &*self.layout;
        any.downcast_ref()
    }

    pub(crate) fn layout_mut<L: GroupLayout>(&mut self) -> Option<&mut L> {
        let any: &mut dyn Any = &mut *self.layout;
        any.downcast_mut()
    }

    pub(crate) fn set_timing(&mut self, timing: AnimationTiming) {
        self.timing = timing;
    }

    pub(crate) fn set_on_finish(&mut self, hook: Option<FinishHook>) {
        self.on_finish = hook;
    }

    /// Mark the layout dirty and arm the finish slot from the hook.
    ///
    /// An action still pending from an earlier invalidation is fired.
    pub(crate) fn invalidate(&mut self) {
        self.needs_layout = true;
        let Some(hook) = self.on_finish.as_ref().map(Arc::clone) else {
            return;
        };
        let armed: AnimationAction = Box::new(move || hook());
        if let Some(displaced) = self.pending_finish.replace(Some(armed)) {
            displaced();
        }
    }

    pub(crate) fn arrange(&self, extents: &[MemberExtent]) -> KanvasResult<Vec<Option<Point>>> {
        self.layout.arrange(extents)
    }

    /// Record a successful layout and hand out the one-shot finish action.
    pub(crate) fn complete_layout(&mut self) -> Option<AnimationAction> {
        self.needs_layout = false;
        self.pending_finish.take()
    }
}

impl std::fmt::Debug for GroupPass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupPass")
            .field("members", &self.members)
            .field("timing", &self.timing)
            .field("needs_layout", &self.needs_layout)
            .field("pending_finish", &self.pending_finish.is_occupied())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/group.rs"]
mod tests;
