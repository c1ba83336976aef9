use std::sync::Arc;

use crate::{
    foundation::core::{Affine, Rect, Rgba8Premul, Vec2},
    foundation::error::{KanvasError, KanvasResult},
};

/// Immutable block of premultiplied RGBA8 pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Arc<[u8]>,
}

impl Raster {
    pub fn new(width: u32, height: u32, rgba8_premul: Vec<u8>) -> KanvasResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(4))
            .ok_or_else(|| KanvasError::raster("raster dimensions overflow"))?;
        if rgba8_premul.len() != expected {
            return Err(KanvasError::raster(format!(
                "raster byte length {} does not match {width}x{height}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data: rgba8_premul.into(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    /// Straight-alpha copy, e.g. for PNG export.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            let c = Rgba8Premul {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            };
            out.extend_from_slice(&c.to_straight_rgba());
        }
        out
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some(Rgba8Premul {
            r: self.data[i],
            g: self.data[i + 1],
            b: self.data[i + 2],
            a: self.data[i + 3],
        })
    }
}

impl std::fmt::Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// 2D drawing target.
///
/// Geometry is given in the current user space: the surface maps it through
/// [`Surface::transform`]. `save`/`restore` bracket transform, clip and opacity
/// changes.
pub trait Surface {
    fn transform(&self) -> Affine;

    fn set_transform(&mut self, transform: Affine);

    fn save(&mut self);

    fn restore(&mut self);

    fn push_clip(&mut self, rect: Rect);

    /// Multiply the opacity of everything drawn until the matching `restore`.
    fn push_opacity(&mut self, opacity: f64);

    fn fill_rect(&mut self, rect: Rect, color: Rgba8Premul);

    fn stroke_rect(&mut self, rect: Rect, width: f64, color: Rgba8Premul);

    /// Draw `raster` with its top-left pixel at the user-space origin, one
    /// raster pixel per user unit.
    fn draw_raster(&mut self, raster: &Raster);

    /// A compatible offscreen target of `width` x `height` pixels.
    fn create_offscreen(&self, width: u32, height: u32)
    -> KanvasResult<Box<dyn OffscreenSurface>>;

    fn translate(&mut self, by: Vec2) {
        let t = self.transform();
        self.set_transform(t * Affine::translate(by));
    }

    fn scale(&mut self, s: f64) {
        let t = self.transform();
        self.set_transform(t * Affine::scale(s));
    }
}

/// Offscreen target whose pixels can be captured once drawing is done.
pub trait OffscreenSurface: Surface {
    fn finish(self: Box<Self>) -> KanvasResult<Raster>;
}


#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
