//! Kanvas is a 2D scene-graph rendering and animation engine.
//!
//! A [`Scene`] holds a tree of render passes: leaves with drawable
//! [`Content`], groups that place their members through a [`GroupLayout`],
//! and cache decorators that replace a stable subtree by a raster snapshot.
//! Every pass sits at an animated offset inside its parent; positions, layout
//! moves and overview fades are [`Animated`] values sampled from the scene's
//! [`Clock`] at draw time.
//!
//! # Drawing
//!
//! Drawing goes through the [`Surface`] trait. [`CpuSurface`] implements it on
//! top of `vello_cpu` and produces premultiplied RGBA8 [`Raster`]s; a
//! [`TransformContext`] carries the canvas-to-component mapping and the
//! visible area alongside each call.
//!
//! # Interaction
//!
//! Pointer events are routed front-to-back through [`Scene::click`] and the
//! drag calls. The [`Overview`] minimap steers an external [`Camera`].
#![forbid(unsafe_code)]

mod animation;
mod foundation;
mod layout;
mod overview;
mod render;

pub use animation::animated::{AnimationAction, Animated, Interpolate};
pub use animation::ease::Ease;
pub use animation::timing::{AnimationTiming, Clock, ManualClock, SystemClock};
pub use foundation::config::RenderConfig;
pub use foundation::core::{Affine, Point, Rect, Rgba8Premul, Size, Vec2};
pub use foundation::error::{KanvasError, KanvasResult};
pub use foundation::slot::Slot;
pub use layout::group::{FinishHook, FreeLayout, GroupLayout, GroupPass, MemberExtent};
pub use layout::linear::{Alignment, LinearLayout, Orientation};
pub use overview::hud::{Camera, Overview};
pub use render::cache::{CacheEntry, CachedPass, cache_scale, raster_size};
pub use render::context::TransformContext;
pub use render::cpu::CpuSurface;
pub use render::pass::{Content, PassId, PassKind};
pub use render::scene::Scene;
pub use render::shapes::RectPass;
pub use render::surface::{OffscreenSurface, Raster, Surface};
