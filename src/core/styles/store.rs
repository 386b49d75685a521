//! Style Store
//!
//! Loads the mapping of style key to [`StyleEntry`] from a structured data
//! resource. The bundled resource is compiled into the binary; a user file
//! may replace it (JSON, or YAML for `.yaml`/`.yml`).

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::errors::StyleLoadError;

const BUILTIN_STYLES: &str = include_str!("../../../assets/styles.json");
const BUILTIN_SOURCE: &str = "<builtin styles>";

/// Key of the style at the centre of the style wheel.
pub const DEFAULT_STYLE_KEY: &str = "Default";

// ============================================================================
// Types
// ============================================================================

/// On-disk representation of a single style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStyle {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub jokes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_default: bool,
}

/// A named comedic style with its example corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleEntry {
    pub key: String,
    pub display_name: String,
    pub description: String,
    pub examples: Vec<String>,
    /// Position on the style wheel in degrees, if the style sits on the rim.
    pub angle: Option<f32>,
    pub color: Option<String>,
    pub is_default: bool,
}

impl StyleEntry {
    pub fn new(
        key: impl Into<String>,
        display_name: impl Into<String>,
        examples: Vec<String>,
    ) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            description: String::new(),
            examples,
            angle: None,
            color: None,
            is_default: false,
        }
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = Some(angle);
        self
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    fn from_raw(key: String, raw: RawStyle) -> Self {
        let is_default = raw.is_default || key == DEFAULT_STYLE_KEY;
        Self {
            display_name: if raw.name.trim().is_empty() {
                key.clone()
            } else {
                raw.name
            },
            key,
            description: raw.description.unwrap_or_default(),
            examples: raw.jokes,
            angle: raw.angle,
            color: raw.color,
            is_default,
        }
    }

    fn to_raw(&self) -> RawStyle {
        RawStyle {
            name: self.display_name.clone(),
            description: (!self.description.is_empty()).then(|| self.description.clone()),
            jokes: self.examples.clone(),
            angle: self.angle,
            color: self.color.clone(),
            is_default: self.is_default,
        }
    }
}

// ============================================================================
// Store
// ============================================================================

/// Immutable, insertion-ordered collection of styles.
#[derive(Debug, Clone, Default)]
pub struct StyleStore {
    styles: IndexMap<String, StyleEntry>,
}

impl StyleStore {
    /// An empty store. Generation with it falls through to generic templates.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a store from already-constructed entries.
    pub fn from_entries(entries: impl IntoIterator<Item = StyleEntry>) -> Self {
        let styles = entries
            .into_iter()
            .map(|entry| (entry.key.clone(), entry))
            .collect();
        Self { styles }
    }

    /// Parse the style resource bundled with the crate.
    pub fn builtin() -> Result<Self, StyleLoadError> {
        Self::from_json_str(BUILTIN_STYLES, BUILTIN_SOURCE)
    }

    /// Read a style resource from disk, choosing the parser by extension.
    pub fn load_from_path(path: &Path) -> Result<Self, StyleLoadError> {
        let source = path.display().to_string();
        let is_yaml = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => false,
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                true
            }
            _ => return Err(StyleLoadError::UnsupportedFormat { path: source }),
        };

        let content =
            std::fs::read_to_string(path).map_err(|e| StyleLoadError::io(source.clone(), e))?;

        if is_yaml {
            Self::from_yaml_str(&content, &source)
        } else {
            Self::from_json_str(&content, &source)
        }
    }

    pub fn from_json_str(content: &str, source: &str) -> Result<Self, StyleLoadError> {
        let raw: IndexMap<String, RawStyle> = serde_json::from_str(content)
            .map_err(|e| StyleLoadError::parse(source, e.line(), e.to_string()))?;
        Self::from_raw(raw, source)
    }

    pub fn from_yaml_str(content: &str, source: &str) -> Result<Self, StyleLoadError> {
        let raw: IndexMap<String, RawStyle> = serde_yaml_ng::from_str(content).map_err(|e| {
            let line = e.location().map(|loc| loc.line()).unwrap_or(0);
            StyleLoadError::parse(source, line, e.to_string())
        })?;
        Self::from_raw(raw, source)
    }

    fn from_raw(raw: IndexMap<String, RawStyle>, source: &str) -> Result<Self, StyleLoadError> {
        let styles: IndexMap<String, StyleEntry> = raw
            .into_iter()
            .map(|(key, style)| (key.clone(), StyleEntry::from_raw(key, style)))
            .collect();

        if !styles.values().any(|s| s.is_default) {
            return Err(StyleLoadError::MissingDefault {
                file: source.to_string(),
            });
        }

        log::debug!("Loaded {} styles from {}", styles.len(), source);
        Ok(Self { styles })
    }

    pub fn get(&self, key: &str) -> Option<&StyleEntry> {
        self.styles.get(key)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleEntry> {
        self.styles.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    /// The style at the centre of the wheel.
    pub fn default_style(&self) -> Option<&StyleEntry> {
        self.styles.values().find(|s| s.is_default)
    }

    /// Styles placed on the rim of the wheel.
    pub fn wheel_styles(&self) -> impl Iterator<Item = &StyleEntry> {
        self.styles
            .values()
            .filter(|s| !s.is_default && s.angle.is_some())
    }

    /// Convert back to the on-disk shape, preserving order.
    pub fn to_raw(&self) -> IndexMap<String, RawStyle> {
        self.styles
            .iter()
            .map(|(key, entry)| (key.clone(), entry.to_raw()))
            .collect()
    }
}

/// Best-effort loader.
///
/// Reads `path` when given, otherwise the bundled styles. Any failure is
/// logged and yields an empty store so generation can still fall back to
/// generic templates.
pub fn load_styles(path: Option<&Path>) -> StyleStore {
    let result = match path {
        Some(p) => StyleStore::load_from_path(p),
        None => StyleStore::builtin(),
    };

    match result {
        Ok(store) => store,
        Err(e) => {
            log::warn!("Failed to load styles: {e}");
            StyleStore::empty()
        }
    }
}
