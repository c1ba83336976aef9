use crate::foundation::core::{Affine, Point, Rect, Vec2};

/// Active canvas-to-component mapping plus the visible output area.
///
/// Canvas space is the scene's own coordinate system; component space is the
/// pixel grid of the surface being drawn. Contexts are cheap values: every
/// draw or hit-test call derives the ones it needs with [`translated`] and
/// [`scaled`] instead of mutating a shared instance.
///
/// [`translated`]: TransformContext::translated
/// [`scaled`]: TransformContext::scaled
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformContext {
    transform: Affine,
    visible_component: Rect,
}

impl TransformContext {
    /// Identity mapping over `visible_component`.
    pub fn new(visible_component: Rect) -> Self {
        Self {
            transform: Affine::IDENTITY,
            visible_component,
        }
    }

    /// A view translated by `offset` (component pixels) and zoomed by `zoom`.
    pub fn from_view(visible_component: Rect, offset: Vec2, zoom: f64) -> Self {
        Self {
            transform: Affine::translate(offset) * Affine::scale(zoom),
            visible_component,
        }
    }

    /// Context for rendering `bbox` into an offscreen raster at scale `s`.
    ///
    /// Canvas point `p` lands on raster pixel `(p - bbox.origin) * s`, and the
    /// visible canvas is exactly `bbox`.
    pub fn for_cache(bbox: Rect, s: f64) -> Self {
        let transform = Affine::scale(s) * Affine::translate(-bbox.origin().to_vec2());
        Self {
            transform,
            visible_component: Rect::new(0.0, 0.0, bbox.width() * s, bbox.height() * s),
        }
    }

    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Uniform zoom factor of the mapping.
    pub fn zoom(&self) -> f64 {
        self.transform.as_coeffs()[0]
    }

    pub fn visible_component(&self) -> Rect {
        self.visible_component
    }

    pub fn visible_canvas(&self) -> Rect {
        self.to_canvas(self.visible_component)
    }

    pub fn to_component(&self, rect: Rect) -> Rect {
        self.transform.transform_rect_bbox(rect)
    }

    pub fn to_canvas(&self, rect: Rect) -> Rect {
        self.transform.inverse().transform_rect_bbox(rect)
    }

    pub fn to_component_point(&self, p: Point) -> Point {
        self.transform * p
    }

    pub fn to_canvas_point(&self, p: Point) -> Point {
        self.transform.inverse() * p
    }

    /// Context for content drawn at canvas offset `by`.
    pub fn translated(&self, by: Vec2) -> Self {
        Self {
            transform: self.transform * Affine::translate(by),
            visible_component: self.visible_component,
        }
    }

    /// Context for content drawn at canvas scale `s`.
    pub fn scaled(&self, s: f64) -> Self {
        Self {
            transform: self.transform * Affine::scale(s),
            visible_component: self.visible_component,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/context.rs"]
mod tests;
