//! Overview (minimap) of one render pass, drawn in HUD space.
//!
//! The target is shown scaled to fit the HUD, with the part the camera
//! currently sees outlined in red. Pressing inside the outline pans the camera
//! by the dragged distance; pressing elsewhere in the overview centers the
//! camera on the pressed point and keeps it there while dragging.

use std::time::Instant;

use crate::{
    animation::{animated::Animated, timing::AnimationTiming},
    foundation::core::{Point, Rect, Rgba8Premul, Size, Vec2},
    foundation::error::{KanvasError, KanvasResult},
    render::{context::TransformContext, pass::PassId, scene::Scene, surface::Surface},
};

const HIGHLIGHT: Rgba8Premul = Rgba8Premul {
    r: 255,
    g: 0,
    b: 0,
    a: 255,
};

/// The viewport the overview steers.
pub trait Camera {
    /// Canvas rectangle currently on screen.
    fn visible_rectangle(&self) -> Rect;

    /// Size of the main view in component pixels.
    fn viewport_size(&self) -> Size;

    /// Pan by component pixels.
    fn move_by(&mut self, dx: f64, dy: f64);

    /// Zoom and pan so that exactly `rect` (canvas space) is visible.
    fn show_only(&mut self, rect: Rect);

    fn set_user_zoomable(&mut self, zoomable: bool);
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum Gesture {
    #[default]
    Idle,
    /// Press inside the highlight: incremental camera moves.
    Pan { last: Vec2 },
    /// Press elsewhere: the camera follows the pointer.
    Jump { press: Point },
}

#[derive(Debug)]
pub struct Overview {
    target: PassId,
    alpha: Animated<f64>,
    gesture: Gesture,
}

impl Overview {
    pub fn new(target: PassId) -> Self {
        Self {
            target,
            alpha: Animated::new(1.0),
            gesture: Gesture::Idle,
        }
    }

    pub fn target(&self) -> PassId {
        self.target
    }

    pub fn current_alpha(&self, now: Instant) -> f64 {
        self.alpha.get(now)
    }

    pub fn predicted_alpha(&self) -> f64 {
        self.alpha.get_predict()
    }

    pub fn set_alpha(&self, alpha: f64, timing: AnimationTiming, now: Instant) {
        self.alpha
            .start_animation_to(alpha.clamp(0.0, 1.0), timing, None, now);
    }

    /// Target bounds in its own frame, plus the offset of that frame in the
    /// scene.
    fn target_frame(&self, scene: &Scene) -> KanvasResult<(Rect, Vec2)> {
        let bbox = scene.bounding_box(self.target)?;
        let top = scene.top_level_bounds(self.target)?;
        match (bbox, top) {
            (Some(bbox), Some(top)) if bbox.area() > 0.0 => {
                Ok((bbox, top.origin() - bbox.origin()))
            }
            _ => Err(KanvasError::configuration(format!(
                "overview target {:?} has no visible extent",
                self.target
            ))),
        }
    }

    /// Largest scale at which the target fits the HUD.
    pub fn fit_scale(&self, scene: &Scene, hud: &TransformContext) -> KanvasResult<f64> {
        let (bbox, _) = self.target_frame(scene)?;
        let view = hud.visible_component();
        Ok((view.width() / bbox.width()).min(view.height() / bbox.height()))
    }

    /// The whole target in HUD coordinates.
    pub fn full_frame(&self, scene: &Scene, hud: &TransformContext) -> KanvasResult<Rect> {
        let (bbox, _) = self.target_frame(scene)?;
        let s = self.fit_scale(scene, hud)?;
        Ok(scale_rect(bbox, s))
    }

    /// The part of the target the camera sees, in HUD coordinates.
    pub fn view_frame(
        &self,
        scene: &Scene,
        camera: &dyn Camera,
        hud: &TransformContext,
    ) -> KanvasResult<Rect> {
        let (bbox, offset) = self.target_frame(scene)?;
        let s = self.fit_scale(scene, hud)?;
        let visible = camera.visible_rectangle() - offset;
        Ok(scale_rect(visible.intersect(bbox), s))
    }

    pub fn draw(
        &self,
        scene: &mut Scene,
        camera: &dyn Camera,
        surface: &mut dyn Surface,
        hud: &TransformContext,
    ) -> KanvasResult<()> {
        let s = self.fit_scale(scene, hud)?;
        let alpha = self.alpha.get(scene.now());
        surface.save();
        surface.push_opacity(alpha);
        surface.scale(s);
        let drawn = scene.draw_pass_local(self.target, surface, &hud.scaled(s));
        surface.restore();
        drawn?;
        let frame = self.view_frame(scene, camera, hud)?;
        surface.stroke_rect(frame, 1.0, HIGHLIGHT);
        Ok(())
    }

    /// Center the camera on HUD point `p`, keeping its visible size.
    pub fn jump_to(
        &self,
        scene: &Scene,
        camera: &mut dyn Camera,
        p: Point,
        hud: &TransformContext,
    ) -> KanvasResult<()> {
        let (_, offset) = self.target_frame(scene)?;
        let s = self.fit_scale(scene, hud)?;
        let center = Point::new(p.x / s, p.y / s) + offset;
        let size = camera.visible_rectangle().size();
        camera.show_only(Rect::from_center_size(center, size));
        Ok(())
    }

    /// A click outside the highlight jumps there. Clicks inside the highlight
    /// are left to dragging.
    pub fn click(
        &mut self,
        scene: &Scene,
        camera: &mut dyn Camera,
        p: Point,
        hud: &TransformContext,
    ) -> KanvasResult<bool> {
        if self.view_frame(scene, camera, hud)?.contains(p) {
            return Ok(false);
        }
        if !self.full_frame(scene, hud)?.contains(p) {
            return Ok(false);
        }
        self.jump_to(scene, camera, p, hud)?;
        self.gesture = Gesture::Jump { press: p };
        Ok(true)
    }

    pub fn accept_drag(
        &mut self,
        scene: &Scene,
        camera: &mut dyn Camera,
        p: Point,
        hud: &TransformContext,
    ) -> KanvasResult<bool> {
        if !self.full_frame(scene, hud)?.contains(p) {
            return Ok(false);
        }
        if self.view_frame(scene, camera, hud)?.contains(p) {
            self.gesture = Gesture::Pan { last: Vec2::ZERO };
        } else {
            self.jump_to(scene, camera, p, hud)?;
            self.gesture = Gesture::Jump { press: p };
        }
        Ok(true)
    }

    /// `delta` is the total pointer movement since the press.
    pub fn drag(
        &mut self,
        scene: &Scene,
        camera: &mut dyn Camera,
        delta: Vec2,
        hud: &TransformContext,
    ) -> KanvasResult<()> {
        match self.gesture {
            Gesture::Idle => Ok(()),
            Gesture::Pan { last } => {
                // The highlight stands for the whole main view, so one HUD
                // pixel of drag is viewport/highlight component pixels.
                let view = self.view_frame(scene, camera, hud)?;
                let viewport = camera.viewport_size();
                let step = delta - last;
                if view.width() > 0.0 && view.height() > 0.0 {
                    camera.move_by(
                        step.x * viewport.width / view.width(),
                        step.y * viewport.height / view.height(),
                    );
                }
                self.gesture = Gesture::Pan { last: delta };
                Ok(())
            }
            Gesture::Jump { press } => self.jump_to(scene, camera, press + delta, hud),
        }
    }

    pub fn end_drag(
        &mut self,
        scene: &Scene,
        camera: &mut dyn Camera,
        delta: Vec2,
        hud: &TransformContext,
    ) -> KanvasResult<()> {
        let out = self.drag(scene, camera, delta, hud);
        self.gesture = Gesture::Idle;
        out
    }

    /// Show the whole target; call again whenever the component is resized.
    pub fn fit_viewport(&self, scene: &Scene, camera: &mut dyn Camera) -> KanvasResult<()> {
        let bounds = scene.top_level_bounds(self.target)?.ok_or_else(|| {
            KanvasError::configuration(format!(
                "overview target {:?} has no bounding box",
                self.target
            ))
        })?;
        camera.show_only(bounds);
        Ok(())
    }

    /// Point the camera at the target, optionally locking the zoom.
    pub fn install(
        &self,
        scene: &Scene,
        camera: &mut dyn Camera,
        prevent_user_zoom: bool,
    ) -> KanvasResult<()> {
        if prevent_user_zoom {
            camera.set_user_zoomable(false);
        }
        self.fit_viewport(scene, camera)
    }
}

fn scale_rect(r: Rect, s: f64) -> Rect {
    Rect::new(r.x0 * s, r.y0 * s, r.x1 * s, r.y1 * s)
}

#[cfg(test)]
#[path = "../../tests/unit/overview/hud.rs"]
mod tests;
