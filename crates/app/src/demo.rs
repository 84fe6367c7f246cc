//! Demonstration engines registered by the command line host.

use std::rc::Rc;

use score_render_core::{
    Bounds, Canvas, Color, ElementBounds, EngineRegistry, RenderContext, RenderFinishedArgs,
    RenderResult, RenderingResources, Result, ScoreLayout,
};
use serde::Serialize;

const STAFF_LINES: usize = 5;
const DEFAULT_ROW_HEIGHT: f32 = 80.0;
const ANNOTATION: &str = "rendered with score-render";

/// Builds the registry used by the CLI. `summary` and `rows` are also
/// registered as the defaults.
pub fn registry() -> EngineRegistry {
    let mut registry = EngineRegistry::new(
        || Box::new(SummaryCanvas::new("default")),
        |name| Box::new(RowLayout::new(name)),
    );
    registry
        .register_canvas("summary", || Box::new(SummaryCanvas::new("summary")))
        .register_layout("rows", |name| Box::new(RowLayout::new(name)));
    registry
}

/// What a [`SummaryCanvas`] hands back at the end of a pass.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasSummary {
    pub engine: String,
    pub line_width: f32,
    pub scale: f32,
    pub operations: usize,
    pub texts: Vec<String>,
}

/// Canvas that draws nothing and only counts the operations it receives.
#[derive(Debug)]
pub struct SummaryCanvas {
    engine: String,
    line_width: f32,
    resources: Option<Rc<RenderingResources>>,
    operations: usize,
    texts: Vec<String>,
}

impl SummaryCanvas {
    pub fn new(engine: &str) -> Self {
        Self {
            engine: engine.to_string(),
            line_width: 1.0,
            resources: None,
            operations: 0,
            texts: Vec::new(),
        }
    }

    fn summary(&self) -> CanvasSummary {
        CanvasSummary {
            engine: self.engine.clone(),
            line_width: self.line_width,
            scale: self.resources.as_ref().map(|r| r.scale()).unwrap_or(1.0),
            operations: self.operations,
            texts: self.texts.clone(),
        }
    }
}

impl Canvas for SummaryCanvas {
    fn line_width(&self) -> f32 {
        self.line_width
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn resources(&self) -> Option<&Rc<RenderingResources>> {
        self.resources.as_ref()
    }

    fn set_resources(&mut self, resources: Rc<RenderingResources>) {
        self.resources = Some(resources);
    }

    fn on_pre_render(&mut self) -> RenderResult {
        self.operations = 0;
        self.texts.clear();
        RenderResult::empty()
    }

    fn on_render_finished(&mut self) -> RenderResult {
        RenderResult::new(self.summary())
    }

    fn set_color(&mut self, _color: Color) {}

    fn fill_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32) {
        self.operations += 1;
    }

    fn stroke_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32) {
        self.operations += 1;
    }

    fn move_to(&mut self, _x: f32, _y: f32) {}

    fn line_to(&mut self, _x: f32, _y: f32) {}

    fn stroke(&mut self) {
        self.operations += 1;
    }

    fn fill_text(&mut self, text: &str, _x: f32, _y: f32) {
        self.operations += 1;
        self.texts.push(text.to_string());
    }
}

/// Stacks one labelled five-line staff per track. Row height comes from the
/// `rowHeight` layout option and is multiplied by the scale.
#[derive(Debug)]
pub struct RowLayout {
    name: String,
    width: f32,
    height: f32,
    row_height: f32,
}

impl RowLayout {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            width: 0.0,
            height: 0.0,
            row_height: DEFAULT_ROW_HEIGHT,
        }
    }

    /// Draws the title and every row at the current width. Bounds and
    /// partial results are only reported during a full pass.
    fn draw_rows(&mut self, ctx: &mut RenderContext<'_>, full_pass: bool) {
        let row = self.row_height;
        self.height = 0.0;

        if let Some(score) = ctx.score {
            let title_size = ctx.resources.title_font.size;
            let center = self.width / 2.0;
            ctx.canvas.set_color(ctx.resources.score_info_color);
            ctx.canvas.fill_text(&score.title, center, title_size);
            self.height += title_size * 1.5;
        }

        for track in ctx.tracks {
            let top = self.height;
            draw_staff(ctx.canvas, ctx.resources, top, self.width, row);
            ctx.canvas.set_color(ctx.resources.main_glyph_color);
            ctx.canvas.fill_text(&track.name, 0.0, top);
            self.height += row;

            if !full_pass {
                continue;
            }
            let area = Bounds::new(0.0, top, self.width, row);
            if let Some(lookup) = ctx.bounds_lookup.as_deref_mut() {
                lookup.add(ElementBounds {
                    element: track.name.clone(),
                    track_index: Some(track.index),
                    visual: area,
                    real: area,
                });
            }
            ctx.partial_render_finished(&RenderFinishedArgs {
                total_width: self.width,
                total_height: self.height,
                width: self.width,
                height: row,
                ..Default::default()
            });
        }
    }
}

fn draw_staff(
    canvas: &mut dyn Canvas,
    resources: &RenderingResources,
    y: f32,
    width: f32,
    row: f32,
) {
    canvas.set_color(resources.staff_line_color);
    let spacing = row / (STAFF_LINES as f32 + 1.0);
    for line in 1..=STAFF_LINES {
        let line_y = y + spacing * line as f32;
        canvas.move_to(0.0, line_y);
        canvas.line_to(width, line_y);
    }
    canvas.stroke();
}

impl ScoreLayout for RowLayout {
    fn name(&self) -> &str {
        &self.name
    }

    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn supports_resize(&self) -> bool {
        true
    }

    fn layout_and_render(&mut self, ctx: &mut RenderContext<'_>) -> Result<()> {
        let row_height = ctx.settings.layout.get("rowHeight", DEFAULT_ROW_HEIGHT);
        self.row_height = row_height * ctx.settings.scale;
        self.width = ctx.settings.width as f32;
        self.draw_rows(ctx, true);
        Ok(())
    }

    fn render_annotation(&mut self, ctx: &mut RenderContext<'_>) -> Result<()> {
        ctx.canvas.set_color(ctx.resources.secondary_glyph_color);
        ctx.canvas.fill_text(ANNOTATION, 0.0, self.height);
        Ok(())
    }

    /// Repaints at the new width, keeping the row height measured by the
    /// last full pass.
    fn resize(&mut self, ctx: &mut RenderContext<'_>) -> Result<()> {
        self.width = ctx.settings.width as f32;
        self.draw_rows(ctx, false);
        Ok(())
    }
}
