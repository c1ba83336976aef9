//! The composition engine.
//!
//! A [`Scene`] owns every render pass in an arena and addresses them by
//! [`PassId`]. Roots are drawn back-to-front in insertion order; pointer
//! events walk the same lists front-to-back. Each pass sits at an animated
//! offset inside its parent, and drawing or hit testing applies that offset to
//! both the surface and the [`TransformContext`] before descending.
//!
//! The scene samples its [`Clock`] once per top-level call, so every
//! animated value observed during one draw agrees on the current instant.

use std::{
    any::{Any, type_name},
    collections::BTreeSet,
    sync::Arc,
    time::Instant,
};

use crate::{
    animation::{
        animated::AnimationAction,
        timing::{AnimationTiming, Clock, SystemClock},
    },
    foundation::config::RenderConfig,
    foundation::core::{Point, Rect, Vec2},
    foundation::error::{KanvasError, KanvasResult},
    layout::{
        group::{FinishHook, GroupLayout, GroupPass, MemberExtent},
        linear::LinearLayout,
    },
    render::{
        cache::{self, CacheDecision, CachedPass},
        context::TransformContext,
        pass::{Content, PassId, PassKind, PassNode, parse_ids},
        surface::Surface,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pointer {
    Click,
    AcceptDrag,
}

/// Pass that accepted the current drag, plus the offset of its frame.
#[derive(Clone, Copy, Debug)]
struct DragTarget {
    id: PassId,
    origin: Vec2,
}

pub struct Scene {
    nodes: Vec<PassNode>,
    roots: Vec<PassId>,
    config: RenderConfig,
    clock: Arc<dyn Clock>,
    drag: Option<DragTarget>,
}

impl Scene {
    pub fn new(config: RenderConfig) -> KanvasResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: RenderConfig, clock: Arc<dyn Clock>) -> KanvasResult<Self> {
        config.validate()?;
        Ok(Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            config,
            clock,
            drag: None,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Replace the configuration. Every cached raster is dropped.
    pub fn set_config(&mut self, config: RenderConfig) -> KanvasResult<()> {
        config.validate()?;
        self.config = config;
        for node in &self.nodes {
            if let PassKind::Cached(c) = &node.kind {
                c.invalidate();
            }
        }
        Ok(())
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[PassId] {
        &self.roots
    }

    pub fn kind(&self, id: PassId) -> KanvasResult<&PassKind> {
        Ok(&self.node(id)?.kind)
    }

    pub fn parent(&self, id: PassId) -> KanvasResult<Option<PassId>> {
        Ok(self.node(id)?.parent)
    }

    pub fn is_visible(&self, id: PassId) -> KanvasResult<bool> {
        Ok(self.node(id)?.visible)
    }

    pub fn group(&self, id: PassId) -> KanvasResult<&GroupPass> {
        match &self.node(id)?.kind {
            PassKind::Group(g) => Ok(g),
            other => Err(wrong_kind(id, "group", other)),
        }
    }

    pub fn cached(&self, id: PassId) -> KanvasResult<&CachedPass> {
        match &self.node(id)?.kind {
            PassKind::Cached(c) => Ok(c),
            other => Err(wrong_kind(id, "cached", other)),
        }
    }

    /// Leaf content of type `C`.
    pub fn content<C: Content>(&self, id: PassId) -> KanvasResult<&C> {
        let PassKind::Leaf(content) = &self.node(id)?.kind else {
            return Err(KanvasError::validation(format!("{id:?} is not a leaf")));
        };
        let any: &dyn Any = &**content;
        any.downcast_ref().ok_or_else(|| {
            KanvasError::validation(format!("{id:?} does not hold a {}", type_name::<C>()))
        })
    }

    // ---- construction -------------------------------------------------------

    pub fn add_leaf(&mut self, content: impl Content) -> PassId {
        self.insert(PassKind::Leaf(Box::new(content)))
    }

    /// Wrap the detached pass `inner` in a cache decorator.
    pub fn add_cached(&mut self, inner: PassId) -> KanvasResult<PassId> {
        self.check_detached(inner)?;
        let id = self.insert(PassKind::Cached(CachedPass::new(inner)));
        self.node_mut(inner)?.parent = Some(id);
        Ok(id)
    }

    pub fn add_group(&mut self, layout: impl GroupLayout) -> PassId {
        self.insert(PassKind::Group(GroupPass::new(Box::new(layout))))
    }

    pub fn add_linear_group(&mut self, layout: LinearLayout) -> PassId {
        self.add_group(layout)
    }

    pub fn push_root(&mut self, id: PassId) -> KanvasResult<()> {
        self.check_detached(id)?;
        self.roots.push(id);
        Ok(())
    }

    /// Append the detached pass `member` to `group` (drawn on top of the
    /// existing members).
    pub fn add_member(&mut self, group: PassId, member: PassId) -> KanvasResult<()> {
        self.group(group)?;
        if member == group || self.is_ancestor(member, group) {
            return Err(KanvasError::validation(format!(
                "adding {member:?} to {group:?} would create a cycle"
            )));
        }
        self.check_detached(member)?;
        self.group_mut(group)?.members.push(member);
        self.node_mut(member)?.parent = Some(group);
        self.invalidate_chain(group, true);
        Ok(())
    }

    /// Detach `member` from `group`; false when it was not a member.
    pub fn remove_member(&mut self, group: PassId, member: PassId) -> KanvasResult<bool> {
        let g = self.group_mut(group)?;
        let Some(index) = g.members.iter().position(|&m| m == member) else {
            return Ok(false);
        };
        g.members.remove(index);
        self.node_mut(member)?.parent = None;
        self.settle(member);
        if self.drag.is_some_and(|d| d.id == member) {
            self.drag = None;
        }
        self.invalidate_chain(group, true);
        Ok(true)
    }

    // ---- per-pass state -----------------------------------------------------

    pub fn set_visible(&mut self, id: PassId, visible: bool) -> KanvasResult<()> {
        let node = self.node_mut(id)?;
        if node.visible == visible {
            return Ok(());
        }
        node.visible = visible;
        if !visible {
            self.settle(id);
        }
        self.invalidate_above(id, true);
        Ok(())
    }

    /// Complete running moves in the subtree of `id`, firing their pending
    /// actions. Hidden and detached passes are not sampled by drawing.
    fn settle(&self, id: PassId) {
        let Some(node) = self.nodes.get(id.index()) else {
            return;
        };
        node.position.set(node.position.get_predict());
        match &node.kind {
            PassKind::Leaf(_) => {}
            PassKind::Cached(c) => self.settle(c.inner),
            PassKind::Group(g) => {
                for &m in &g.members {
                    self.settle(m);
                }
            }
        }
    }

    /// Cache `id` regardless of its on-screen size or changes (unless caching
    /// is disabled). Only meaningful for cached passes.
    pub fn set_force_cache(&mut self, id: PassId, force: bool) -> KanvasResult<()> {
        self.node_mut(id)?.force_cache = force;
        Ok(())
    }

    /// Replace the tags of `id` with the space separated list `ids`.
    pub fn set_ids(&mut self, id: PassId, ids: &str) -> KanvasResult<()> {
        self.node_mut(id)?.ids = parse_ids(ids);
        Ok(())
    }

    pub fn ids(&self, id: PassId) -> KanvasResult<&BTreeSet<String>> {
        Ok(&self.node(id)?.ids)
    }

    /// First pass carrying `tag`, in draw order.
    pub fn find_by_id(&self, tag: &str) -> Option<PassId> {
        self.roots.iter().find_map(|&root| self.find_in(root, tag))
    }

    fn find_in(&self, id: PassId, tag: &str) -> Option<PassId> {
        let node = self.nodes.get(id.index())?;
        if node.ids.contains(tag) {
            return Some(id);
        }
        match &node.kind {
            PassKind::Leaf(_) => None,
            PassKind::Cached(c) => self.find_in(c.inner, tag),
            PassKind::Group(g) => g.members.iter().find_map(|&m| self.find_in(m, tag)),
        }
    }

    /// Jump to `offset`, cancelling (and completing) any running move.
    pub fn set_position(&mut self, id: PassId, offset: Point) -> KanvasResult<()> {
        self.node(id)?.position.set(offset);
        self.invalidate_above(id, false);
        Ok(())
    }

    /// Animate the offset of `id` to `offset`.
    pub fn move_to(
        &mut self,
        id: PassId,
        offset: Point,
        timing: AnimationTiming,
        on_finish: Option<AnimationAction>,
    ) -> KanvasResult<()> {
        let now = self.clock.now();
        self.node(id)?
            .position
            .start_animation_to(offset, timing, on_finish, now);
        self.invalidate_above(id, false);
        Ok(())
    }

    pub fn position(&self, id: PassId) -> KanvasResult<Point> {
        Ok(self.node(id)?.position.get(self.clock.now()))
    }

    pub fn predicted_position(&self, id: PassId) -> KanvasResult<Point> {
        Ok(self.node(id)?.position.get_predict())
    }

    /// Mutate the leaf content of `id`; caches and layouts above it are
    /// invalidated afterwards.
    pub fn with_content_mut<C: Content, R>(
        &mut self,
        id: PassId,
        f: impl FnOnce(&mut C) -> R,
    ) -> KanvasResult<R> {
        let PassKind::Leaf(content) = &mut self.node_mut(id)?.kind else {
            return Err(KanvasError::validation(format!("{id:?} is not a leaf")));
        };
        let any: &mut dyn Any = &mut **content;
        let content = any.downcast_mut::<C>().ok_or_else(|| {
            KanvasError::validation(format!("{id:?} does not hold a {}", type_name::<C>()))
        })?;
        let out = f(content);
        self.invalidate_above(id, true);
        Ok(out)
    }

    /// Forced invalidation: drop the cache of `id` (if any), schedule a new
    /// layout of `id` (if a group), and do the same for everything above it.
    pub fn invalidate(&mut self, id: PassId) -> KanvasResult<()> {
        self.node(id)?;
        self.invalidate_chain(id, true);
        Ok(())
    }

    // ---- layout -------------------------------------------------------------

    /// Mutate the layout of `group` as an `L`, then schedule a new layout.
    pub fn update_layout<L: GroupLayout, R>(
        &mut self,
        group: PassId,
        f: impl FnOnce(&mut L) -> KanvasResult<R>,
    ) -> KanvasResult<R> {
        let layout = self.group_mut(group)?.layout_mut::<L>().ok_or_else(|| {
            KanvasError::validation(format!("{group:?} is not laid out by {}", type_name::<L>()))
        })?;
        let out = f(layout)?;
        self.invalidate_chain(group, true);
        Ok(out)
    }

    pub fn set_layout_timing(
        &mut self,
        group: PassId,
        timing: AnimationTiming,
    ) -> KanvasResult<()> {
        self.group_mut(group)?.set_timing(timing);
        Ok(())
    }

    /// Hook run once after every layout triggered by an invalidation.
    pub fn set_layout_on_finish(
        &mut self,
        group: PassId,
        hook: Option<FinishHook>,
    ) -> KanvasResult<()> {
        self.group_mut(group)?.set_on_finish(hook);
        Ok(())
    }

    /// Run pending layouts of `id` and everything below it.
    #[tracing::instrument(skip(self))]
    pub fn ensure_layout(&mut self, id: PassId) -> KanvasResult<()> {
        let now = self.clock.now();
        self.layout_at(id, now)
    }

    fn layout_at(&mut self, id: PassId, now: Instant) -> KanvasResult<()> {
        let members = match &self.node(id)?.kind {
            PassKind::Leaf(_) => return Ok(()),
            PassKind::Cached(c) => {
                let inner = c.inner;
                return self.layout_at(inner, now);
            }
            PassKind::Group(g) => g.members.clone(),
        };
        for &m in &members {
            self.layout_at(m, now)?;
        }
        if !self.group(id)?.needs_layout() {
            return Ok(());
        }

        let extents = members
            .iter()
            .map(|&m| {
                Ok(MemberExtent {
                    bbox: self.bounding_box(m)?,
                    visible: self.node(m)?.visible,
                })
            })
            .collect::<KanvasResult<Vec<_>>>()?;
        let placements = self.group(id)?.arrange(&extents)?;

        let group = self.group_mut(id)?;
        let timing = group.timing();
        let mut finish = group.complete_layout();
        let mut moved = 0usize;
        for (&m, dest) in members.iter().zip(placements) {
            let Some(dest) = dest else {
                continue;
            };
            self.node(m)?
                .position
                .start_animation_to(dest, timing, finish.take(), now);
            moved += 1;
        }
        if let Some(action) = finish {
            action();
        }
        tracing::debug!(group = id.raw(), members = members.len(), moved, "layout applied");
        self.invalidate_chain(id, false);
        Ok(())
    }

    // ---- geometry -----------------------------------------------------------

    /// Bounds of `id` in its own frame (its offset not applied).
    ///
    /// Groups union their visible members at the members' destination
    /// offsets; an empty group is the zero rectangle at the origin.
    pub fn bounding_box(&self, id: PassId) -> KanvasResult<Option<Rect>> {
        match &self.node(id)?.kind {
            PassKind::Leaf(content) => Ok(content.bounding_box()),
            PassKind::Cached(c) => self.placed_box(c.inner),
            PassKind::Group(g) => {
                let mut acc: Option<Rect> = None;
                for &m in &g.members {
                    if !self.node(m)?.visible {
                        continue;
                    }
                    if let Some(r) = self.placed_box(m)? {
                        acc = Some(acc.map_or(r, |a| a.union(r)));
                    }
                }
                Ok(Some(acc.unwrap_or(Rect::ZERO)))
            }
        }
    }

    fn placed_box(&self, id: PassId) -> KanvasResult<Option<Rect>> {
        let offset = self.node(id)?.position.get_predict().to_vec2();
        Ok(self.bounding_box(id)?.map(|r| r + offset))
    }

    /// Bounds of `id` in scene canvas space: its own offset and the offsets of
    /// all its ancestors applied.
    pub fn top_level_bounds(&self, id: PassId) -> KanvasResult<Option<Rect>> {
        let now = self.clock.now();
        let Some(mut rect) = self.bounding_box(id)? else {
            return Ok(None);
        };
        let mut cur = Some(id);
        while let Some(c) = cur {
            let node = self.node(c)?;
            rect = rect + node.position.get(now).to_vec2();
            cur = node.parent;
        }
        Ok(Some(rect))
    }

    /// Union of the top-level bounds of all visible roots.
    pub fn scene_bounds(&self) -> KanvasResult<Option<Rect>> {
        let mut acc: Option<Rect> = None;
        for &root in &self.roots {
            if !self.node(root)?.visible {
                continue;
            }
            if let Some(r) = self.top_level_bounds(root)? {
                acc = Some(acc.map_or(r, |a| a.union(r)));
            }
        }
        Ok(acc)
    }

    pub fn is_changing(&self, id: PassId) -> KanvasResult<bool> {
        self.is_changing_at(id, self.clock.now())
    }

    fn is_changing_at(&self, id: PassId, now: Instant) -> KanvasResult<bool> {
        match &self.node(id)?.kind {
            PassKind::Leaf(content) => Ok(content.is_changing()),
            PassKind::Cached(c) => self.member_changing(c.inner, now),
            PassKind::Group(g) => {
                if g.needs_layout() {
                    return Ok(true);
                }
                for &m in &g.members {
                    if self.node(m)?.visible && self.member_changing(m, now)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    fn member_changing(&self, id: PassId, now: Instant) -> KanvasResult<bool> {
        Ok(self.node(id)?.position.in_animation(now) || self.is_changing_at(id, now)?)
    }

    // ---- drawing ------------------------------------------------------------

    /// Draw all roots. Pending layouts run first.
    #[tracing::instrument(skip(self, surface, ctx))]
    pub fn draw(&mut self, surface: &mut dyn Surface, ctx: &TransformContext) -> KanvasResult<()> {
        let now = self.clock.now();
        let roots = self.roots.clone();
        for &root in &roots {
            self.layout_at(root, now)?;
        }
        for root in roots {
            self.draw_node(root, surface, ctx, now, true)?;
        }
        Ok(())
    }

    /// Draw `id` in its own frame, ignoring its offset and ancestors.
    pub fn draw_pass_local(
        &mut self,
        id: PassId,
        surface: &mut dyn Surface,
        ctx: &TransformContext,
    ) -> KanvasResult<()> {
        let now = self.clock.now();
        self.layout_at(id, now)?;
        self.draw_node(id, surface, ctx, now, false)
    }

    fn draw_node(
        &mut self,
        id: PassId,
        surface: &mut dyn Surface,
        ctx: &TransformContext,
        now: Instant,
        apply_offset: bool,
    ) -> KanvasResult<()> {
        let node = self.node(id)?;
        if !node.visible {
            return Ok(());
        }
        let offset = if apply_offset {
            node.position.get(now).to_vec2()
        } else {
            Vec2::ZERO
        };
        surface.save();
        surface.translate(offset);
        let ctx = ctx.translated(offset);
        let out = self.draw_kind(id, surface, &ctx, now);
        surface.restore();
        out
    }

    fn draw_kind(
        &mut self,
        id: PassId,
        surface: &mut dyn Surface,
        ctx: &TransformContext,
        now: Instant,
    ) -> KanvasResult<()> {
        match &self.node(id)?.kind {
            PassKind::Leaf(content) => {
                content.draw(surface, ctx);
                Ok(())
            }
            PassKind::Cached(c) => {
                let inner = c.inner;
                self.draw_cached(id, inner, surface, ctx, now)
            }
            PassKind::Group(g) => {
                let members = g.members.clone();
                for m in members {
                    self.draw_node(m, surface, ctx, now, true)?;
                }
                Ok(())
            }
        }
    }

    fn draw_cached(
        &mut self,
        id: PassId,
        inner: PassId,
        surface: &mut dyn Surface,
        ctx: &TransformContext,
        now: Instant,
    ) -> KanvasResult<()> {
        let Some(bbox) = self.bounding_box(id)? else {
            return self.draw_node(inner, surface, ctx, now, true);
        };
        let changing = self.is_changing_at(id, now)?;
        let on_screen = ctx.to_component(bbox).size();
        let force = self.node(id)?.force_cache;
        let config = self.config.clone();
        let decision = self
            .cached_mut(id)?
            .decide(changing, on_screen, force, &config);

        if decision == CacheDecision::Live {
            self.cached(id)?.invalidate();
            return self.draw_node(inner, surface, ctx, now, true);
        }

        let entry = match self.cached(id)?.cache_entry() {
            Some(entry) => entry,
            None => {
                let built = cache::build_entry(bbox, &config, &*surface, |s, c| {
                    self.draw_node(inner, s, c, now, true)
                });
                match built {
                    Ok(entry) => {
                        self.cached(id)?.store(entry.clone());
                        entry
                    }
                    Err(err) => {
                        tracing::warn!(
                            %err,
                            pass = id.raw(),
                            "cache construction failed, drawing live"
                        );
                        return self.draw_node(inner, surface, ctx, now, true);
                    }
                }
            }
        };
        cache::blit(&entry, bbox, surface, config.debug_cache);
        Ok(())
    }

    // ---- pointer routing ----------------------------------------------------

    /// Deliver a click at canvas point `p`; returns the pass that consumed it.
    pub fn click(&mut self, p: Point, ctx: &TransformContext) -> Option<PassId> {
        let (id, _) = self.route(Pointer::Click, p, ctx)?;
        Some(id)
    }

    /// Offer a drag starting at `p`. On success, later `drag`/`end_drag`
    /// calls go to the accepting pass only.
    pub fn accept_drag(&mut self, p: Point, ctx: &TransformContext) -> bool {
        self.drag = self
            .route(Pointer::AcceptDrag, p, ctx)
            .map(|(id, origin)| DragTarget { id, origin });
        self.drag.is_some()
    }

    /// Forward a drag step; false when no drag is active.
    pub fn drag(&mut self, start: Point, current: Point, delta: Vec2) -> bool {
        let Some(target) = self.drag else {
            return false;
        };
        if let Some(PassKind::Leaf(content)) = self
            .nodes
            .get_mut(target.id.index())
            .map(|n| &mut n.kind)
        {
            content.drag(start - target.origin, current - target.origin, delta);
        }
        self.invalidate_above(target.id, false);
        true
    }

    pub fn end_drag(&mut self, start: Point, end: Point, delta: Vec2) -> bool {
        let Some(target) = self.drag.take() else {
            return false;
        };
        if let Some(PassKind::Leaf(content)) = self
            .nodes
            .get_mut(target.id.index())
            .map(|n| &mut n.kind)
        {
            content.end_drag(start - target.origin, end - target.origin, delta);
        }
        self.invalidate_above(target.id, false);
        true
    }

    fn route(&mut self, op: Pointer, p: Point, ctx: &TransformContext) -> Option<(PassId, Vec2)> {
        let now = self.clock.now();
        let roots = self.roots.clone();
        let hit = roots
            .into_iter()
            .rev()
            .find_map(|root| self.pointer_at(root, op, p, ctx, now, Vec2::ZERO))?;
        self.invalidate_above(hit.0, false);
        Some(hit)
    }

    fn pointer_at(
        &mut self,
        id: PassId,
        op: Pointer,
        p: Point,
        ctx: &TransformContext,
        now: Instant,
        origin: Vec2,
    ) -> Option<(PassId, Vec2)> {
        let node = self.nodes.get(id.index())?;
        if !node.visible {
            return None;
        }
        let offset = node.position.get(now).to_vec2();
        let local = p - offset;
        let origin = origin + offset;
        let ctx = ctx.translated(offset);

        // Container bounds use predicted member offsets; only leaves are
        // prefiltered so animating members stay hittable where they are drawn.
        match &mut self.nodes.get_mut(id.index())?.kind {
            PassKind::Leaf(content) => {
                if content.bounding_box().is_some_and(|b| !b.contains(local)) {
                    return None;
                }
                let consumed = match op {
                    Pointer::Click => content.click(local, &ctx),
                    Pointer::AcceptDrag => content.accept_drag(local, &ctx),
                };
                consumed.then_some((id, origin))
            }
            PassKind::Cached(c) => {
                let inner = c.inner;
                self.pointer_at(inner, op, local, &ctx, now, origin)
            }
            PassKind::Group(g) => {
                let members = g.members.clone();
                members
                    .into_iter()
                    .rev()
                    .find_map(|m| self.pointer_at(m, op, local, &ctx, now, origin))
            }
        }
    }

    // ---- internals ----------------------------------------------------------

    fn insert(&mut self, kind: PassKind) -> PassId {
        let id = PassId::from_raw(self.nodes.len() as u32);
        self.nodes.push(PassNode::new(kind));
        id
    }

    fn node(&self, id: PassId) -> KanvasResult<&PassNode> {
        self.nodes.get(id.index()).ok_or(KanvasError::UnknownPass(id))
    }

    fn node_mut(&mut self, id: PassId) -> KanvasResult<&mut PassNode> {
        self.nodes
            .get_mut(id.index())
            .ok_or(KanvasError::UnknownPass(id))
    }

    fn group_mut(&mut self, id: PassId) -> KanvasResult<&mut GroupPass> {
        match &mut self.node_mut(id)?.kind {
            PassKind::Group(g) => Ok(g),
            other => Err(wrong_kind(id, "group", other)),
        }
    }

    fn cached_mut(&mut self, id: PassId) -> KanvasResult<&mut CachedPass> {
        match &mut self.node_mut(id)?.kind {
            PassKind::Cached(c) => Ok(c),
            other => Err(wrong_kind(id, "cached", other)),
        }
    }

    fn check_detached(&self, id: PassId) -> KanvasResult<()> {
        let node = self.node(id)?;
        if node.parent.is_some() || self.roots.contains(&id) {
            return Err(KanvasError::validation(format!("{id:?} is already attached")));
        }
        Ok(())
    }

    /// Whether `candidate` is `id` or one of its ancestors.
    fn is_ancestor(&self, candidate: PassId, id: PassId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            if c == candidate {
                return true;
            }
            cur = self.nodes.get(c.index()).and_then(|n| n.parent);
        }
        false
    }

    /// Invalidate `start` and its ancestors: caches are dropped, and with
    /// `relayout` groups are scheduled for a new layout.
    fn invalidate_chain(&mut self, start: PassId, relayout: bool) {
        let mut cur = Some(start);
        while let Some(id) = cur {
            let Some(node) = self.nodes.get_mut(id.index()) else {
                break;
            };
            match &mut node.kind {
                PassKind::Cached(c) => c.invalidate(),
                PassKind::Group(g) if relayout => g.invalidate(),
                _ => {}
            }
            cur = node.parent;
        }
    }

    fn invalidate_above(&mut self, id: PassId, relayout: bool) {
        if let Some(parent) = self.nodes.get(id.index()).and_then(|n| n.parent) {
            self.invalidate_chain(parent, relayout);
        }
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("passes", &self.nodes.len())
            .field("roots", &self.roots)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn wrong_kind(id: PassId, expected: &str, found: &PassKind) -> KanvasError {
    KanvasError::validation(format!("{id:?} is a {} pass, not {expected}", found.name()))
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
