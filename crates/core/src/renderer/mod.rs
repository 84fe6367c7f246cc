use std::rc::Rc;

use crate::{
    bounds::BoundsLookup,
    canvas::Canvas,
    events::{RenderEvents, RenderFinishedArgs, SubscriptionId},
    layout::{RenderContext, ScoreLayout},
    model::{Score, Track},
    registry::EngineRegistry,
    resources::RenderingResources,
    Result, Settings,
};

/// Renders a selection of tracks by driving one canvas backend and one
/// layout engine, both resolved through an [`EngineRegistry`].
///
/// All operations run to completion on the calling thread. Event handlers
/// only receive the event payload, so they cannot call back into the
/// renderer while a cycle is in flight.
pub struct ScoreRenderer {
    registry: Rc<EngineRegistry>,
    settings: Settings,
    canvas: Box<dyn Canvas>,
    canvas_engine: String,
    layout: Box<dyn ScoreLayout>,
    layout_mode: String,
    resources: Rc<RenderingResources>,
    bounds_lookup: Option<BoundsLookup>,
    score: Option<Rc<Score>>,
    tracks: Vec<Rc<Track>>,
    events: RenderEvents,
}

impl ScoreRenderer {
    pub fn new(registry: Rc<EngineRegistry>, settings: Settings) -> Self {
        let canvas = registry.create_canvas(&settings.engine);
        let layout = registry.create_layout(&settings.layout.mode);
        Self {
            canvas_engine: settings.engine.clone(),
            layout_mode: settings.layout.mode.clone(),
            registry,
            settings,
            canvas,
            layout,
            resources: Rc::new(RenderingResources::new(1.0)),
            bounds_lookup: None,
            score: None,
            tracks: Vec::new(),
            events: RenderEvents::new(),
        }
    }

    /// Renders a single track.
    pub fn render(&mut self, track: Rc<Track>) -> Result<()> {
        self.score = Some(Rc::clone(track.score()));
        self.tracks = vec![track];
        self.invalidate()
    }

    /// Renders several tracks of the same score. The first track elects the
    /// score; the others are assumed to belong to it as well.
    pub fn render_multiple(&mut self, tracks: Vec<Rc<Track>>) -> Result<()> {
        self.score = tracks.first().map(|track| Rc::clone(track.score()));
        tracing::info!(target: "rendering", count = tracks.len(), "rendering tracks");
        for (position, track) in tracks.iter().enumerate() {
            tracing::info!(
                target: "rendering",
                position,
                index = track.index,
                name = %track.name,
                "track"
            );
        }
        self.tracks = tracks;
        self.invalidate()
    }

    /// Replaces the settings. Takes effect on the next invalidation or
    /// resize; nothing is rendered here.
    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Runs a complete layout and draw pass for the current selection.
    pub fn invalidate(&mut self) -> Result<()> {
        if self.settings.width == 0 {
            tracing::warn!(
                target: "rendering",
                "skipped rendering because of width=0 (element invisible)"
            );
            return Ok(());
        }

        self.bounds_lookup = Some(BoundsLookup::new());
        if self.tracks.is_empty() {
            return Ok(());
        }

        let canvas_replaced = self.recreate_canvas();
        if self.resources.scale() != self.settings.scale {
            self.resources = Rc::new(RenderingResources::new(self.settings.scale));
            self.canvas.set_line_width(self.settings.scale);
        } else if canvas_replaced {
            self.canvas.set_line_width(self.resources.scale());
        }
        self.canvas.set_resources(Rc::clone(&self.resources));

        self.on_pre_render();
        self.recreate_layout();
        self.layout_and_render()?;
        tracing::info!(target: "rendering", "rendering finished");
        Ok(())
    }

    /// Re-renders for a new container width, reusing the current layout
    /// measurement when the layout engine supports it.
    pub fn resize(&mut self, width: u32) -> Result<()> {
        if self.recreate_layout() {
            tracing::info!(target: "rendering", "starting full rerendering due to layout change");
            self.invalidate()?;
        } else if self.layout.supports_resize() {
            tracing::info!(target: "rendering", width, "starting optimized rerendering for resize");
            self.on_pre_render();
            self.settings.width = width;

            let mut ctx = RenderContext {
                settings: &self.settings,
                score: self.score.as_ref(),
                tracks: &self.tracks,
                canvas: self.canvas.as_mut(),
                resources: &self.resources,
                bounds_lookup: None,
                events: &mut self.events,
            };
            self.layout.resize(&mut ctx)?;
            self.layout.render_annotation(&mut ctx)?;

            self.on_render_finished();
            self.on_post_render();
        } else {
            tracing::warn!(
                target: "rendering",
                layout = self.layout.name(),
                "current layout does not support dynamic resizing, nothing was done"
            );
        }
        tracing::info!(target: "rendering", "resize finished");
        Ok(())
    }

    /// Forwards a page or segment completion reported by a layout engine to
    /// PartialRenderFinished subscribers.
    pub fn partial_render_finished(&mut self, args: &RenderFinishedArgs) {
        self.events.emit_partial_render_finished(args);
    }

    pub fn on_pre_render_event(
        &mut self,
        handler: impl FnMut(&RenderFinishedArgs) + 'static,
    ) -> SubscriptionId {
        self.events.on_pre_render(handler)
    }

    pub fn on_partial_render_finished(
        &mut self,
        handler: impl FnMut(&RenderFinishedArgs) + 'static,
    ) -> SubscriptionId {
        self.events.on_partial_render_finished(handler)
    }

    pub fn on_render_finished_event(
        &mut self,
        handler: impl FnMut(&RenderFinishedArgs) + 'static,
    ) -> SubscriptionId {
        self.events.on_render_finished(handler)
    }

    pub fn on_post_render_finished(&mut self, handler: impl FnMut() + 'static) -> SubscriptionId {
        self.events.on_post_render_finished(handler)
    }

    pub fn events_mut(&mut self) -> &mut RenderEvents {
        &mut self.events
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn score(&self) -> Option<&Rc<Score>> {
        self.score.as_ref()
    }

    pub fn tracks(&self) -> &[Rc<Track>] {
        &self.tracks
    }

    pub fn canvas(&self) -> &dyn Canvas {
        self.canvas.as_ref()
    }

    pub fn layout(&self) -> &dyn ScoreLayout {
        self.layout.as_ref()
    }

    pub fn resources(&self) -> &RenderingResources {
        &self.resources
    }

    /// Element regions recorded by the last full pass. `None` until the
    /// first non-skipped invalidation.
    pub fn bounds_lookup(&self) -> Option<&BoundsLookup> {
        self.bounds_lookup.as_ref()
    }

    /// Swaps the layout when `settings.layout.mode` changed since it was
    /// built. Returns whether a new layout was bound.
    fn recreate_layout(&mut self) -> bool {
        if self.layout_mode == self.settings.layout.mode {
            return false;
        }
        self.layout = self.registry.create_layout(&self.settings.layout.mode);
        self.layout_mode = self.settings.layout.mode.clone();
        true
    }

    fn recreate_canvas(&mut self) -> bool {
        if self.canvas_engine == self.settings.engine {
            return false;
        }
        self.canvas = self.registry.create_canvas(&self.settings.engine);
        self.canvas_engine = self.settings.engine.clone();
        true
    }

    fn layout_and_render(&mut self) -> Result<()> {
        tracing::info!(
            target: "rendering",
            scale = self.settings.scale,
            layout = self.layout.name(),
            "rendering"
        );

        let mut ctx = RenderContext {
            settings: &self.settings,
            score: self.score.as_ref(),
            tracks: &self.tracks,
            canvas: self.canvas.as_mut(),
            resources: &self.resources,
            bounds_lookup: self.bounds_lookup.as_mut(),
            events: &mut self.events,
        };
        self.layout.layout_and_render(&mut ctx)?;
        self.layout.render_annotation(&mut ctx)?;

        if let Some(lookup) = self.bounds_lookup.as_mut() {
            lookup.finish();
        }
        self.on_render_finished();
        self.on_post_render();
        Ok(())
    }

    fn on_pre_render(&mut self) {
        let render_result = self.canvas.on_pre_render();
        self.events.emit_pre_render(&RenderFinishedArgs {
            render_result,
            ..Default::default()
        });
    }

    fn on_render_finished(&mut self) {
        let render_result = self.canvas.on_render_finished();
        self.events.emit_render_finished(&RenderFinishedArgs {
            total_width: self.layout.width(),
            total_height: self.layout.height(),
            render_result,
            ..Default::default()
        });
    }

    fn on_post_render(&mut self) {
        self.events.emit_post_render_finished();
    }
}

impl std::fmt::Debug for ScoreRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreRenderer")
            .field("registry", &self.registry)
            .field("settings", &self.settings)
            .field("canvas_engine", &self.canvas_engine)
            .field("layout_mode", &self.layout_mode)
            .field("scale", &self.resources.scale())
            .field("tracks", &self.tracks.len())
            .field("events", &self.events)
            .finish()
    }
}
