//! Recording doubles shared by the unit tests. Every call is appended to a
//! [`Journal`] so tests can assert on exact call sequences.

use std::{cell::RefCell, rc::Rc};

use crate::{
    bounds::{Bounds, ElementBounds},
    canvas::{Canvas, RenderResult},
    events::RenderFinishedArgs,
    layout::{RenderContext, ScoreLayout},
    resources::{Color, RenderingResources},
    RenderError, Result,
};

#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    /// Entries starting with `prefix`, in order.
    pub fn matching(&self, prefix: &str) -> Vec<String> {
        self.0
            .borrow()
            .iter()
            .filter(|entry| entry.starts_with(prefix))
            .cloned()
            .collect()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.0.borrow().iter().filter(|e| *e == entry).count()
    }

    pub fn position(&self, entry: &str) -> Option<usize> {
        self.0.borrow().iter().position(|e| e == entry)
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

pub struct RecordingCanvas {
    name: String,
    journal: Journal,
    line_width: f32,
    resources: Option<Rc<RenderingResources>>,
}

impl RecordingCanvas {
    pub fn new(name: &str, journal: &Journal) -> Self {
        journal.push(format!("canvas[{name}].new"));
        Self {
            name: name.to_string(),
            journal: journal.clone(),
            line_width: 1.0,
            resources: None,
        }
    }

    fn log(&self, call: &str) {
        self.journal.push(format!("canvas[{}].{call}", self.name));
    }
}

impl Canvas for RecordingCanvas {
    fn line_width(&self) -> f32 {
        self.line_width
    }

    fn set_line_width(&mut self, width: f32) {
        self.log(&format!("line_width={width}"));
        self.line_width = width;
    }

    fn resources(&self) -> Option<&Rc<RenderingResources>> {
        self.resources.as_ref()
    }

    fn set_resources(&mut self, resources: Rc<RenderingResources>) {
        self.log(&format!("resources@{}", resources.scale()));
        self.resources = Some(resources);
    }

    fn on_pre_render(&mut self) -> RenderResult {
        self.log("pre_render");
        RenderResult::new(format!("{}:partial", self.name))
    }

    fn on_render_finished(&mut self) -> RenderResult {
        self.log("render_finished");
        RenderResult::new(format!("{}:final", self.name))
    }

    fn set_color(&mut self, _color: Color) {
        self.log("set_color");
    }

    fn fill_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32) {
        self.log("fill_rect");
    }

    fn stroke_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32) {
        self.log("stroke_rect");
    }

    fn move_to(&mut self, _x: f32, _y: f32) {
        self.log("move_to");
    }

    fn line_to(&mut self, _x: f32, _y: f32) {
        self.log("line_to");
    }

    fn stroke(&mut self) {
        self.log("stroke");
    }

    fn fill_text(&mut self, text: &str, _x: f32, _y: f32) {
        self.log(&format!("fill_text({text})"));
    }
}

pub const ROW_HEIGHT: f32 = 100.0;

/// Stacks one row per track, drawing a single rectangle for each.
pub struct RecordingLayout {
    name: String,
    supports_resize: bool,
    fail_on_layout: bool,
    journal: Journal,
    width: f32,
    height: f32,
}

impl RecordingLayout {
    pub fn new(name: &str, supports_resize: bool, journal: &Journal) -> Self {
        journal.push(format!("layout[{name}].new"));
        Self {
            name: name.to_string(),
            supports_resize,
            fail_on_layout: false,
            journal: journal.clone(),
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn failing(name: &str, journal: &Journal) -> Self {
        Self {
            fail_on_layout: true,
            ..Self::new(name, false, journal)
        }
    }

    fn log(&self, call: &str) {
        self.journal.push(format!("layout[{}].{call}", self.name));
    }
}

impl ScoreLayout for RecordingLayout {
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
        self.supports_resize
    }

    fn layout_and_render(&mut self, ctx: &mut RenderContext<'_>) -> Result<()> {
        self.log("layout_and_render");
        if self.fail_on_layout {
            return Err(RenderError::layout(&self.name, "measurement failed"));
        }

        self.width = ctx.settings.width as f32;
        self.height = 0.0;
        for track in ctx.tracks {
            let row = Bounds::new(0.0, self.height, self.width, ROW_HEIGHT);
            ctx.canvas.fill_rect(row.x, row.y, row.w, row.h);
            if let Some(lookup) = ctx.bounds_lookup.as_deref_mut() {
                lookup.add(ElementBounds {
                    element: track.name.clone(),
                    track_index: Some(track.index),
                    visual: row,
                    real: row,
                });
            }
            self.height += ROW_HEIGHT;
            ctx.partial_render_finished(&RenderFinishedArgs {
                total_width: self.width,
                total_height: self.height,
                width: self.width,
                height: ROW_HEIGHT,
                ..Default::default()
            });
        }
        Ok(())
    }

    fn render_annotation(&mut self, ctx: &mut RenderContext<'_>) -> Result<()> {
        self.log("render_annotation");
        ctx.canvas.fill_text("annotation", 0.0, self.height);
        Ok(())
    }

    fn resize(&mut self, ctx: &mut RenderContext<'_>) -> Result<()> {
        self.log(&format!("resize@{}", ctx.settings.width));
        self.width = ctx.settings.width as f32;
        Ok(())
    }
}
