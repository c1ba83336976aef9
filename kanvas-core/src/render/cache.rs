//! Raster caching decorator.
//!
//! A cached pass is drawn from an offscreen snapshot while it is stable and
//! small on screen, and live otherwise. The decorator exclusively owns its
//! snapshot; anything that changes the wrapped content must invalidate it
//! (the scene does this for every mutation it routes).

use crate::{
    foundation::config::RenderConfig,
    foundation::core::{Rect, Rgba8Premul, Size},
    foundation::error::{KanvasError, KanvasResult},
    foundation::slot::Slot,
    render::{
        context::TransformContext,
        pass::PassId,
        surface::{Raster, Surface},
    },
};

const DEBUG_TINT: Rgba8Premul = Rgba8Premul {
    r: 77,
    g: 0,
    b: 77,
    a: 77,
};

/// Snapshot plus the factor mapping raster pixels back to canvas units.
#[derive(Clone, Debug)]
pub struct CacheEntry {
    pub raster: Raster,
    pub scale: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheDecision {
    Live,
    Cached,
}

/// Decorator state wrapping one inner pass.
pub struct CachedPass {
    pub(crate) inner: PassId,
    entry: Slot<CacheEntry>,
    last_changing: bool,
}

impl CachedPass {
    pub(crate) fn new(inner: PassId) -> Self {
        Self {
            inner,
            entry: Slot::empty(),
            last_changing: false,
        }
    }

    pub fn inner(&self) -> PassId {
        self.inner
    }

    pub fn has_cache(&self) -> bool {
        self.entry.is_occupied()
    }

    pub fn cache_entry(&self) -> Option<CacheEntry> {
        self.entry.get_cloned()
    }

    /// Drop the snapshot, releasing its pixels.
    pub fn invalidate(&self) {
        if let Some(old) = self.entry.take() {
            tracing::debug!(
                inner = self.inner.raw(),
                width = old.raster.width(),
                height = old.raster.height(),
                "cache invalidated"
            );
        }
    }

    pub(crate) fn store(&self, entry: CacheEntry) {
        // A concurrent build may have raced us; the newer snapshot wins.
        drop(self.entry.replace(Some(entry)));
    }

    /// Choose between live and cached drawing for this frame.
    ///
    /// A pass that changed on the previous draw is still drawn live once more.
    /// `force_cache` overrides everything except `disable_caching`.
    pub(crate) fn decide(
        &mut self,
        changing: bool,
        on_screen: Size,
        force_cache: bool,
        config: &RenderConfig,
    ) -> CacheDecision {
        let no_cache = changing || self.last_changing;
        self.last_changing = changing;
        let draw_self = no_cache
            || (on_screen.width >= config.cache_visible
                && on_screen.height >= config.cache_visible);
        if (!force_cache && draw_self) || config.disable_caching {
            CacheDecision::Live
        } else {
            CacheDecision::Cached
        }
    }
}

/// Uniform scale mapping the larger side of `bbox` to `cache_size` pixels.
pub fn cache_scale(bbox: Rect, cache_size: f64) -> KanvasResult<f64> {
    let longest = bbox.width().max(bbox.height());
    let s = cache_size / longest;
    if !(longest > 0.0) || !s.is_finite() || s <= 0.0 {
        return Err(KanvasError::raster(format!(
            "cannot cache a degenerate bounding box {bbox:?}"
        )));
    }
    Ok(s)
}

/// Pixel size of the snapshot of `bbox` at scale `s`.
pub fn raster_size(bbox: Rect, s: f64) -> KanvasResult<(u32, u32)> {
    let dim = |v: f64| -> KanvasResult<u32> {
        // Absorb rounding noise so the longest side lands on `cache_size`.
        let px = (v * s - 1e-9).ceil();
        if !px.is_finite() || px < 1.0 || px > f64::from(u32::MAX) {
            return Err(KanvasError::raster(format!(
                "raster dimension {px} out of range"
            )));
        }
        Ok(px as u32)
    };
    Ok((dim(bbox.width())?, dim(bbox.height())?))
}

/// Render a snapshot of `bbox` with `draw`.
pub(crate) fn build_entry(
    bbox: Rect,
    config: &RenderConfig,
    target: &dyn Surface,
    draw: impl FnOnce(&mut dyn Surface, &TransformContext) -> KanvasResult<()>,
) -> KanvasResult<CacheEntry> {
    let s = cache_scale(bbox, config.cache_size)?;
    let (w, h) = raster_size(bbox, s)?;
    let mut offscreen = target.create_offscreen(w, h)?;
    let ctx = TransformContext::for_cache(bbox, s);
    offscreen.set_transform(ctx.transform());
    offscreen.push_clip(bbox);
    draw(offscreen.as_mut(), &ctx)?;
    let raster = offscreen.finish()?;
    tracing::debug!(width = w, height = h, scale = s, "cache built");
    Ok(CacheEntry {
        raster,
        scale: 1.0 / s,
    })
}

/// Draw `entry` where the live pass would have covered `bbox`.
pub(crate) fn blit(entry: &CacheEntry, bbox: Rect, surface: &mut dyn Surface, debug: bool) {
    surface.save();
    surface.translate(bbox.origin().to_vec2());
    surface.scale(entry.scale);
    surface.draw_raster(&entry.raster);
    if debug {
        surface.fill_rect(
            Rect::new(
                0.0,
                0.0,
                f64::from(entry.raster.width()),
                f64::from(entry.raster.height()),
            ),
            DEBUG_TINT,
        );
    }
    surface.restore();
}

#[cfg(test)]
#[path = "../../tests/unit/render/cache.rs"]
mod tests;
