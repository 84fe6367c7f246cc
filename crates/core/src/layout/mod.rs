use std::rc::Rc;

use crate::{
    bounds::BoundsLookup,
    canvas::Canvas,
    events::{RenderEvents, RenderFinishedArgs},
    model::{Score, Track},
    resources::RenderingResources,
    Result, Settings,
};

/// Arranges the selected tracks into measured regions and draws them onto
/// the canvas. Built by a [`LayoutFactory`](crate::registry::LayoutFactory)
/// for one `layout.mode` key and owned by the renderer.
pub trait ScoreLayout {
    fn name(&self) -> &str;

    /// Total width measured by the last run.
    fn width(&self) -> f32;

    /// Total height measured by the last run.
    fn height(&self) -> f32;

    /// Whether [`resize`](Self::resize) can recompute width dependent
    /// geometry without a full measurement.
    fn supports_resize(&self) -> bool;

    /// Full measurement and drawing pass.
    fn layout_and_render(&mut self, ctx: &mut RenderContext<'_>) -> Result<()>;

    /// Annotation overlay, always run after the main pass.
    fn render_annotation(&mut self, ctx: &mut RenderContext<'_>) -> Result<()>;

    /// Width-only recompute. Only called when `supports_resize` is true.
    fn resize(&mut self, ctx: &mut RenderContext<'_>) -> Result<()>;
}

/// Everything a layout may use during a single call.
///
/// `bounds_lookup` is only present during a full pass; an optimized resize
/// does not recompute it.
pub struct RenderContext<'a> {
    pub settings: &'a Settings,
    pub score: Option<&'a Rc<Score>>,
    pub tracks: &'a [Rc<Track>],
    pub canvas: &'a mut dyn Canvas,
    pub resources: &'a RenderingResources,
    pub bounds_lookup: Option<&'a mut BoundsLookup>,
    pub(crate) events: &'a mut RenderEvents,
}

impl RenderContext<'_> {
    /// Reports a completed page or segment to PartialRenderFinished
    /// subscribers.
    pub fn partial_render_finished(&mut self, args: &RenderFinishedArgs) {
        self.events.emit_partial_render_finished(args);
    }
}
