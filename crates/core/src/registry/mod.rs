use std::{collections::HashMap, fmt, rc::Rc};

use crate::{canvas::Canvas, config::DEFAULT_ENGINE, layout::ScoreLayout};

/// Builds a fresh canvas backend.
pub type CanvasFactory = Rc<dyn Fn() -> Box<dyn Canvas>>;

/// Builds a fresh layout engine. Receives the requested `layout.mode` key.
pub type LayoutFactory = Rc<dyn Fn(&str) -> Box<dyn ScoreLayout>>;

/// Name to factory mappings for canvas backends and layout engines.
///
/// Both maps always hold a `"default"` entry, supplied at construction.
/// Lookups never fail: empty or unknown names resolve to that entry.
pub struct EngineRegistry {
    canvases: HashMap<String, CanvasFactory>,
    layouts: HashMap<String, LayoutFactory>,
}

impl EngineRegistry {
    pub fn new(
        default_canvas: impl Fn() -> Box<dyn Canvas> + 'static,
        default_layout: impl Fn(&str) -> Box<dyn ScoreLayout> + 'static,
    ) -> Self {
        let mut registry = Self {
            canvases: HashMap::new(),
            layouts: HashMap::new(),
        };
        registry.register_canvas(DEFAULT_ENGINE, default_canvas);
        registry.register_layout(DEFAULT_ENGINE, default_layout);
        registry
    }

    /// Registers (or replaces) a canvas backend.
    pub fn register_canvas(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn() -> Box<dyn Canvas> + 'static,
    ) -> &mut Self {
        self.canvases.insert(name.into(), Rc::new(factory));
        self
    }

    /// Registers (or replaces) a layout engine.
    pub fn register_layout(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(&str) -> Box<dyn ScoreLayout> + 'static,
    ) -> &mut Self {
        self.layouts.insert(name.into(), Rc::new(factory));
        self
    }

    pub fn has_canvas(&self, name: &str) -> bool {
        self.canvases.contains_key(name)
    }

    pub fn has_layout(&self, name: &str) -> bool {
        self.layouts.contains_key(name)
    }

    pub fn resolve_canvas(&self, name: &str) -> CanvasFactory {
        Rc::clone(lookup(&self.canvases, name, "canvas"))
    }

    pub fn resolve_layout(&self, name: &str) -> LayoutFactory {
        Rc::clone(lookup(&self.layouts, name, "layout"))
    }

    pub fn create_canvas(&self, name: &str) -> Box<dyn Canvas> {
        (self.resolve_canvas(name))()
    }

    pub fn create_layout(&self, name: &str) -> Box<dyn ScoreLayout> {
        (self.resolve_layout(name))(name)
    }
}

fn lookup<'a, F: ?Sized>(map: &'a HashMap<String, Rc<F>>, name: &str, kind: &str) -> &'a Rc<F> {
    match map.get(name) {
        Some(factory) if !name.is_empty() => factory,
        _ => {
            if name != DEFAULT_ENGINE {
                tracing::debug!(
                    target: "rendering",
                    kind,
                    name,
                    "engine not registered, using default"
                );
            }
            &map[DEFAULT_ENGINE]
        }
    }
}

impl fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut canvases: Vec<_> = self.canvases.keys().collect();
        let mut layouts: Vec<_> = self.layouts.keys().collect();
        canvases.sort();
        layouts.sort();
        f.debug_struct("EngineRegistry")
            .field("canvases", &canvases)
            .field("layouts", &layouts)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Journal, RecordingCanvas, RecordingLayout};

    fn registry(journal: &Journal) -> EngineRegistry {
        let canvas_journal = journal.clone();
        let layout_journal = journal.clone();
        let mut registry = EngineRegistry::new(
            move || Box::new(RecordingCanvas::new("default", &canvas_journal)),
            move |name| Box::new(RecordingLayout::new(name, true, &layout_journal)),
        );
        let svg_journal = journal.clone();
        registry.register_canvas("svg", move || {
            Box::new(RecordingCanvas::new("svg", &svg_journal))
        });
        registry
    }

    #[test]
    fn resolves_registered_canvas() {
        let journal = Journal::default();
        let registry = registry(&journal);

        registry.create_canvas("svg");
        assert_eq!(journal.entries(), ["canvas[svg].new"]);
    }

    #[test]
    fn unknown_and_empty_names_fall_back_to_default() {
        let journal = Journal::default();
        let registry = registry(&journal);

        registry.create_canvas("foo");
        registry.create_canvas("");
        let layout = registry.create_layout("horizontal");

        assert_eq!(
            journal.entries(),
            [
                "canvas[default].new",
                "canvas[default].new",
                "layout[horizontal].new",
            ]
        );
        assert_eq!(layout.name(), "horizontal");
        assert!(!registry.has_layout("horizontal"));
        assert!(registry.has_layout(DEFAULT_ENGINE));
    }
}
