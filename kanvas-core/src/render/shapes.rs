use crate::{
    foundation::core::{Point, Rect, Rgba8Premul},
    render::{context::TransformContext, pass::Content, surface::Surface},
};

/// Filled rectangle with an optional border.
#[derive(Clone, Debug, PartialEq)]
pub struct RectPass {
    rect: Rect,
    fill: Rgba8Premul,
    border: Option<(f64, Rgba8Premul)>,
    changing: bool,
    clicks: u32,
}

impl RectPass {
    pub fn new(rect: Rect, fill: Rgba8Premul) -> Self {
        Self {
            rect,
            fill,
            border: None,
            changing: false,
            clicks: 0,
        }
    }

    pub fn with_border(mut self, width: f64, color: Rgba8Premul) -> Self {
        self.border = Some((width, color));
        self
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub fn fill(&self) -> Rgba8Premul {
        self.fill
    }

    pub fn set_fill(&mut self, fill: Rgba8Premul) {
        self.fill = fill;
    }

    pub fn set_changing(&mut self, changing: bool) {
        self.changing = changing;
    }

    /// Clicks received so far.
    pub fn clicks(&self) -> u32 {
        self.clicks
    }
}

impl Content for RectPass {
    fn bounding_box(&self) -> Option<Rect> {
        Some(self.rect)
    }

    fn draw(&self, surface: &mut dyn Surface, ctx: &TransformContext) {
        let visible = ctx.visible_canvas();
        if visible.intersect(self.rect).is_zero_area() && !self.rect.is_zero_area() {
            return;
        }
        surface.fill_rect(self.rect, self.fill);
        if let Some((width, color)) = self.border {
            surface.stroke_rect(self.rect, width, color);
        }
    }

    fn is_changing(&self) -> bool {
        self.changing
    }

    fn click(&mut self, p: Point, _ctx: &TransformContext) -> bool {
        if !self.rect.contains(p) {
            return false;
        }
        self.clicks += 1;
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/shapes.rs"]
mod tests;
