//! Core library for rendering musical scores.
//!
//! [`ScoreRenderer`] turns a selection of tracks into a drawing by combining
//! two kinds of pluggable engines looked up in an [`EngineRegistry`]: a
//! [`Canvas`] backend that knows how to draw and a [`ScoreLayout`] that knows
//! how to arrange. The renderer owns the render lifecycle (full
//! invalidation, optimized resize, resource rebuilds on scale changes) and
//! reports progress through the [`RenderEvents`] subscriber lists.

pub mod bounds;
pub mod canvas;
pub mod config;
pub mod error;
pub mod events;
pub mod layout;
pub mod model;
pub mod registry;
pub mod renderer;
pub mod resources;

#[cfg(test)]
mod testing;

pub use bounds::{Bounds, BoundsLookup, ElementBounds};
pub use canvas::{Canvas, RenderResult};
pub use config::{LayoutSettings, Settings, DEFAULT_ENGINE};
pub use error::{RenderError, Result};
pub use events::{RenderEvents, RenderFinishedArgs, SubscriptionId};
pub use layout::{RenderContext, ScoreLayout};
pub use model::{Score, Track};
pub use registry::{CanvasFactory, EngineRegistry, LayoutFactory};
pub use renderer::ScoreRenderer;
pub use resources::{Color, Font, FontStyle, RenderingResources};
