use std::{any::Any, collections::BTreeSet};

use crate::{
    animation::animated::Animated,
    foundation::core::{Point, Rect, Vec2},
    layout::group::GroupPass,
    render::{cache::CachedPass, context::TransformContext, surface::Surface},
};

/// Handle of a render pass inside its [`Scene`](crate::Scene).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PassId(u32);

impl PassId {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Drawable, interactive leaf content.
///
/// Coordinates are in the content's own frame: the scene has already applied
/// every ancestor offset to both the surface and the context.
pub trait Content: Any + Send {
    /// Untranslated bounds; `None` when the content has no defined extent.
    fn bounding_box(&self) -> Option<Rect>;

    fn draw(&self, surface: &mut dyn Surface, ctx: &TransformContext);

    /// Whether the content may look different on the next draw.
    fn is_changing(&self) -> bool {
        false
    }

    fn click(&mut self, _p: Point, _ctx: &TransformContext) -> bool {
        false
    }

    fn accept_drag(&mut self, _p: Point, _ctx: &TransformContext) -> bool {
        false
    }

    fn drag(&mut self, _start: Point, _current: Point, _delta: Vec2) {}

    fn end_drag(&mut self, _start: Point, _end: Point, _delta: Vec2) {}
}

/// The closed set of render pass variants.
pub enum PassKind {
    Leaf(Box<dyn Content>),
    Cached(CachedPass),
    Group(GroupPass),
}

impl PassKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Leaf(_) => "leaf",
            Self::Cached(_) => "cached",
            Self::Group(_) => "group",
        }
    }
}

/// One arena slot.
pub(crate) struct PassNode {
    pub(crate) visible: bool,
    /// Offset applied by the parent, in the parent's canvas frame.
    pub(crate) position: Animated<Point>,
    pub(crate) force_cache: bool,
    pub(crate) ids: BTreeSet<String>,
    pub(crate) parent: Option<PassId>,
    pub(crate) kind: PassKind,
}

impl PassNode {
    pub(crate) fn new(kind: PassKind) -> Self {
        Self {
            visible: true,
            position: Animated::new(Point::ZERO),
            force_cache: false,
            ids: BTreeSet::new(),
            parent: None,
            kind,
        }
    }
}

/// Split a space separated tag list.
pub(crate) fn parse_ids(ids: &str) -> BTreeSet<String> {
    ids.split_whitespace().map(str::to_owned).collect()
}
