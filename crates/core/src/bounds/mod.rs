use serde::{Deserialize, Serialize};

use crate::Result;

/// Axis aligned rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.w && y >= self.y && y <= self.y + self.h
    }
}

/// Association between a logical element and the area it occupies.
///
/// `visual` is the area covered by drawn glyphs, `real` the full area the
/// layout reserved for the element (including padding), used for hit-testing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementBounds {
    pub element: String,
    pub track_index: Option<usize>,
    pub visual: Bounds,
    pub real: Bounds,
}

/// Element to region mapping filled by a layout during a full render pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundsLookup {
    elements: Vec<ElementBounds>,
    is_finished: bool,
}

impl BoundsLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, bounds: ElementBounds) {
        self.elements.push(bounds);
    }

    /// Marks the lookup as complete; set once a full pass has drawn
    /// everything.
    pub fn finish(&mut self) {
        self.is_finished = true;
    }

    pub fn is_finished(&self) -> bool {
        self.is_finished
    }

    pub fn elements(&self) -> &[ElementBounds] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the last registered element whose real bounds contain the
    /// point. Later registrations are drawn on top, so they win.
    pub fn find_at(&self, x: f32, y: f32) -> Option<&ElementBounds> {
        self.elements
            .iter()
            .rev()
            .find(|entry| entry.real.contains(x, y))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
