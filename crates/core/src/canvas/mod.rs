use std::{any::Any, fmt, rc::Rc};

use crate::resources::{Color, RenderingResources};

/// Opaque, backend specific outcome of a render pass (a document, a bitmap,
/// a list of DOM nodes, ...). Hosts downcast it to the type their canvas
/// produces.
#[derive(Clone, Default)]
pub struct RenderResult(Option<Rc<dyn Any>>);

impl RenderResult {
    pub fn new<T: Any>(value: T) -> Self {
        Self(Some(Rc::new(value)))
    }

    pub fn empty() -> Self {
        Self(None)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_deref().and_then(|value| value.downcast_ref())
    }
}

impl fmt::Debug for RenderResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(_) => f.write_str("RenderResult(..)"),
            None => f.write_str("RenderResult(empty)"),
        }
    }
}

/// Drawing surface backend. Instances are built by a
/// [`CanvasFactory`](crate::registry::CanvasFactory) and exclusively owned
/// by the renderer; switching backend means building a new canvas.
pub trait Canvas {
    fn line_width(&self) -> f32;

    fn set_line_width(&mut self, width: f32);

    fn resources(&self) -> Option<&Rc<RenderingResources>>;

    /// Binds the resource bundle used by subsequent draw calls.
    fn set_resources(&mut self, resources: Rc<RenderingResources>);

    /// Called before any layout work; returns the backend's partial result.
    fn on_pre_render(&mut self) -> RenderResult;

    /// Called once a layout pass completed; returns the final result.
    fn on_render_finished(&mut self) -> RenderResult;

    fn set_color(&mut self, color: Color);

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32);

    fn move_to(&mut self, x: f32, y: f32);

    fn line_to(&mut self, x: f32, y: f32);

    fn stroke(&mut self);

    fn fill_text(&mut self, text: &str, x: f32, y: f32);
}
