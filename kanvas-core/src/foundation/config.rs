use crate::foundation::error::{KanvasError, KanvasResult};

/// Scene-wide rendering knobs.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// On-screen size (component pixels) from which a cached pass is drawn live
    /// again. Both dimensions must reach it.
    pub cache_visible: f64,
    /// Raster size of the larger bounding-box dimension when building a cache.
    pub cache_size: f64,
    /// Always draw live.
    pub disable_caching: bool,
    /// Tint cached blits so they can be told apart from live drawing.
    pub debug_cache: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cache_visible: 256.0,
            cache_size: 512.0,
            disable_caching: false,
            debug_cache: false,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> KanvasResult<()> {
        if !self.cache_visible.is_finite() || self.cache_visible < 0.0 {
            return Err(KanvasError::validation(
                "cache_visible must be finite and >= 0",
            ));
        }
        if !self.cache_size.is_finite() || self.cache_size <= 0.0 {
            return Err(KanvasError::validation("cache_size must be finite and > 0"));
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> KanvasResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| KanvasError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply `KANVAS_*` environment overrides; unparsable values are ignored.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub(crate) fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let float = |key: &str| {
            lookup(key)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite() && *v >= 0.0)
        };
        let flag = |key: &str| {
            lookup(key).and_then(|v| match v.trim() {
                "1" | "true" | "yes" | "on" => Some(true),
                "0" | "false" | "no" | "off" => Some(false),
                _ => None,
            })
        };

        if let Some(v) = float("KANVAS_CACHE_VISIBLE") {
            self.cache_visible = v;
        }
        if let Some(v) = float("KANVAS_CACHE_SIZE").filter(|v| *v > 0.0) {
            self.cache_size = v;
        }
        if let Some(v) = flag("KANVAS_DISABLE_CACHING") {
            self.disable_caching = v;
        }
        if let Some(v) = flag("KANVAS_DEBUG_CACHE") {
            self.debug_cache = v;
        }
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
