use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Root music document. The renderer only ever reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub title: String,
    pub artist: String,
}

impl Score {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: String::new(),
        }
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }
}

/// A single part of a [`Score`]. Tracks keep a shared back-reference to the
/// score they belong to.
#[derive(Debug, Clone)]
pub struct Track {
    pub index: usize,
    pub name: String,
    score: Rc<Score>,
}

impl Track {
    pub fn new(score: &Rc<Score>, index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            score: Rc::clone(score),
        }
    }

    pub fn score(&self) -> &Rc<Score> {
        &self.score
    }
}
