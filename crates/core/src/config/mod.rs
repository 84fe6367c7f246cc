use std::{collections::HashMap, path::Path};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{RenderError, Result};

/// Key under which the mandatory fallback engines are registered.
pub const DEFAULT_ENGINE: &str = "default";

/// Host-owned rendering configuration.
///
/// The renderer only ever replaces it wholesale through
/// [`ScoreRenderer::update_settings`](crate::ScoreRenderer::update_settings);
/// the one field it writes back itself is `width`, during an optimized resize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Width of the host container. Zero means the container is invisible
    /// and rendering is skipped.
    pub width: u32,
    /// Positive zoom multiplier applied to all drawing resources.
    pub scale: f32,
    /// Canvas engine key. Empty or unknown keys resolve to `"default"`.
    pub engine: String,
    pub layout: LayoutSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 950,
            scale: 1.0,
            engine: DEFAULT_ENGINE.to_string(),
            layout: LayoutSettings::default(),
        }
    }
}

impl Settings {
    /// Parses settings from a JSON document. Missing fields keep their
    /// defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads and parses a JSON settings file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects values the renderer cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(RenderError::InvalidSettings(format!(
                "scale must be a positive number, got {}",
                self.scale
            )));
        }
        Ok(())
    }
}

/// Layout engine selection plus engine specific options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutSettings {
    /// Layout engine key. Empty or unknown keys resolve to `"default"`.
    pub mode: String,
    /// Free-form options read by individual layout engines. Keys are
    /// matched case-insensitively.
    pub additional_settings: HashMap<String, serde_json::Value>,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            mode: "page".to_string(),
            additional_settings: HashMap::new(),
        }
    }
}

impl LayoutSettings {
    pub fn with_mode(mode: impl Into<String>) -> Self {
        Self {
            mode: mode.into(),
            ..Default::default()
        }
    }

    /// Reads an engine specific option, falling back to `default` when the
    /// key is missing or holds a value of another type.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.additional_settings
            .get(key)
            .or_else(|| {
                self.additional_settings
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(key))
                    .map(|(_, value)| value)
            })
            .and_then(|value| serde_json::from_value(value.clone()).ok())
            .unwrap_or(default)
    }

    pub fn set(&mut self, key: &str, value: impl Into<serde_json::Value>) {
        self.additional_settings
            .insert(key.to_string(), value.into());
    }
}
