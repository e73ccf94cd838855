use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Error;

/// Text color for stamped text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl TextColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn red() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    pub const fn dark_red() -> Self {
        Self::new(0.8, 0.0, 0.0)
    }

    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub const fn blue() -> Self {
        Self::new(0.0, 0.0, 0.8)
    }

    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    fn is_valid(&self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }
}

impl Default for TextColor {
    fn default() -> Self {
        Self::red()
    }
}

/// A point on the page, top-left origin with y growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Placement of one stamp slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotConfig {
    /// Text baseline origin
    pub anchor: Point,
    /// Font size in points
    #[serde(default = "default_font_size")]
    pub font_size: f32,
}

impl SlotConfig {
    pub const fn new(anchor: Point, font_size: f32) -> Self {
        Self { anchor, font_size }
    }
}

const fn default_font_size() -> f32 {
    13.0
}

fn default_slot_a() -> SlotConfig {
    SlotConfig::new(Point::new(452.0, 125.0), default_font_size())
}

fn default_slot_b() -> SlotConfig {
    SlotConfig::new(Point::new(340.0, 419.0), default_font_size())
}

/// Text-width heuristic used to size the covering rectangle.
///
/// This is a monospace-like estimate, not real glyph metrics: wide or
/// variable-width glyphs may be under- or over-covered. `padding` widens the
/// rectangle on every side to absorb that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverMetrics {
    /// Average character width as a fraction of font size
    #[serde(default = "default_char_width_factor")]
    pub char_width_factor: f32,
    /// Text height as a multiple of font size
    #[serde(default = "default_line_height_factor")]
    pub line_height_factor: f32,
    /// Extra margin in points added around the rectangle
    #[serde(default)]
    pub padding: f32,
}

const fn default_char_width_factor() -> f32 {
    0.6
}

const fn default_line_height_factor() -> f32 {
    1.2
}

impl Default for CoverMetrics {
    fn default() -> Self {
        Self {
            char_width_factor: default_char_width_factor(),
            line_height_factor: default_line_height_factor(),
            padding: 0.0,
        }
    }
}

/// The fixed layout of the document template being stamped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// First text slot
    #[serde(default = "default_slot_a")]
    pub slot_a: SlotConfig,

    /// Second text slot
    #[serde(default = "default_slot_b")]
    pub slot_b: SlotConfig,

    /// Zero-based index of the page to stamp
    #[serde(default)]
    pub page: usize,

    /// Stamp text color
    #[serde(default)]
    pub text_color: TextColor,

    /// Covering rectangle heuristic
    #[serde(default)]
    pub cover: CoverMetrics,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            slot_a: default_slot_a(),
            slot_b: default_slot_b(),
            page: 0,
            text_color: TextColor::default(),
            cover: CoverMetrics::default(),
        }
    }
}

/// Bundled font settings
///
/// Characters are drawn with the primary font when it has a glyph for them,
/// otherwise with the first fallback that does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    /// File name of the primary bundled font, looked up with [`crate::util::resource_path`]
    #[serde(default = "default_font_file")]
    pub file: String,

    /// Explicit primary font path, bypasses resource lookup
    pub path: Option<PathBuf>,

    /// Bundled fonts consulted in order for characters the primary font lacks
    #[serde(default = "default_fallback_files")]
    pub fallback: Vec<String>,

    /// Name the primary font is registered under in the page's font resources;
    /// fallbacks get the same name with their position appended (`FStamp1`, ...)
    #[serde(default = "default_resource_name")]
    pub resource_name: String,
}

fn default_font_file() -> String {
    "NanumBarunGothic.ttf".to_string()
}

fn default_fallback_files() -> Vec<String> {
    vec!["DejaVuSans.ttf".to_string()]
}

fn default_resource_name() -> String {
    "FStamp".to_string()
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            file: default_font_file(),
            path: None,
            fallback: default_fallback_files(),
            resource_name: default_resource_name(),
        }
    }
}

impl FontConfig {
    /// Where the primary font file is expected to live.
    pub fn resolve_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| crate::util::resource_path(&self.file))
    }

    /// Primary font followed by every fallback, in lookup order.
    pub fn resolve_paths(&self) -> Vec<PathBuf> {
        std::iter::once(self.resolve_path())
            .chain(self.fallback.iter().map(crate::util::resource_path))
            .collect()
    }

    /// Page resource name for the font at `index` in [`FontConfig::resolve_paths`].
    pub fn resource_name_for(&self, index: usize) -> String {
        if index == 0 {
            self.resource_name.clone()
        } else {
            format!("{}{index}", self.resource_name)
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Template layout
    #[serde(default)]
    pub template: TemplateConfig,

    /// Font settings
    #[serde(default)]
    pub font: FontConfig,
}

impl AppConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::ConfigLoad(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::ConfigLoad(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from default locations (~/.config/pdf-stamper/config.toml, ./pdf-stamper.toml)
    pub fn load() -> Self {
        // Try user config
        if let Some(config_dir) = crate::util::config_dir() {
            let user_config = config_dir.join("pdf-stamper").join("config.toml");
            if user_config.exists() {
                match Self::from_file(&user_config) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {}", user_config.display());
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // Try local config
        let local_config = PathBuf::from("pdf-stamper.toml");
        if local_config.exists() {
            match Self::from_file(&local_config) {
                Ok(config) => {
                    tracing::debug!("Loaded config from ./pdf-stamper.toml");
                    return config;
                }
                Err(e) => {
                    tracing::warn!("Failed to load ./pdf-stamper.toml: {}", e);
                }
            }
        }

        tracing::debug!("No config file found, using defaults");
        Self::default()
    }

    /// Reject values the stamper cannot draw with.
    pub fn validate(&self) -> Result<(), Error> {
        let template = &self.template;
        for (field, slot) in [("template.slot_a", &template.slot_a), ("template.slot_b", &template.slot_b)] {
            if !(slot.font_size.is_finite() && slot.font_size > 0.0) {
                return Err(Error::ConfigInvalid {
                    field: format!("{field}.font_size"),
                    reason: format!("must be positive, got {}", slot.font_size),
                });
            }
            if !(slot.anchor.x.is_finite() && slot.anchor.y.is_finite()) {
                return Err(Error::ConfigInvalid {
                    field: format!("{field}.anchor"),
                    reason: format!("must be finite, got ({}, {})", slot.anchor.x, slot.anchor.y),
                });
            }
        }

        if !template.text_color.is_valid() {
            return Err(Error::ConfigInvalid {
                field: "template.text_color".to_string(),
                reason: "components must be within 0.0..=1.0".to_string(),
            });
        }

        let cover = &template.cover;
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !(positive(cover.char_width_factor) && positive(cover.line_height_factor)) {
            return Err(Error::ConfigInvalid {
                field: "template.cover".to_string(),
                reason: "width and height factors must be positive".to_string(),
            });
        }
        if !(cover.padding.is_finite() && cover.padding >= 0.0) {
            return Err(Error::ConfigInvalid {
                field: "template.cover.padding".to_string(),
                reason: "must not be negative".to_string(),
            });
        }

        if self.font.resource_name.is_empty()
            || self.font.resource_name.chars().any(|c| c.is_whitespace() || c == '/')
        {
            return Err(Error::ConfigInvalid {
                field: "font.resource_name".to_string(),
                reason: format!("'{}' is not a valid PDF name", self.font.resource_name),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template() {
        let config = AppConfig::default();
        assert_eq!(config.template.slot_a.anchor, Point::new(452.0, 125.0));
        assert_eq!(config.template.slot_b.anchor, Point::new(340.0, 419.0));
        assert!((config.template.slot_a.font_size - 13.0).abs() < f32::EPSILON);
        assert_eq!(config.template.page, 0);
        assert_eq!(config.template.text_color, TextColor::red());
        assert_eq!(config.font.resource_name, "FStamp");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r"
            [template.slot_b]
            anchor = { x = 100.0, y = 200.0 }

            [template.cover]
            padding = 2.0
            ",
        )
        .unwrap();

        assert_eq!(config.template.slot_b.anchor, Point::new(100.0, 200.0));
        assert!((config.template.slot_b.font_size - 13.0).abs() < f32::EPSILON);
        assert_eq!(config.template.slot_a.anchor, Point::new(452.0, 125.0));
        assert!((config.template.cover.char_width_factor - 0.6).abs() < f32::EPSILON);
        assert!((config.template.cover.padding - 2.0).abs() < f32::EPSILON);
        assert_eq!(config.font.file, "NanumBarunGothic.ttf");
        assert_eq!(config.font.fallback, vec!["DejaVuSans.ttf".to_string()]);
    }

    #[test]
    fn test_from_file_rejects_bad_font_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[template.slot_a]\nanchor = { x = 1.0, y = 1.0 }\nfont_size = 0.0\n",
        )
        .unwrap();

        let err = AppConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { ref field, .. } if field == "template.slot_a.font_size"));
    }

    #[test]
    fn test_from_file_missing() {
        let err = AppConfig::from_file("/nonexistent/pdf-stamper.toml").unwrap_err();
        assert!(matches!(err, Error::ConfigLoad(_)));
    }

    #[test]
    fn test_invalid_color_rejected() {
        let mut config = AppConfig::default();
        config.template.text_color = TextColor::new(2.0, 0.0, 0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_resource_name_rejected() {
        let mut config = AppConfig::default();
        config.font.resource_name = "F Stamp".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_cover_factor_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[template.cover]\nchar_width_factor = nan\n").unwrap();

        let err = AppConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { ref field, .. } if field == "template.cover"));
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let mut config = AppConfig::default();
        config.template.slot_b.anchor = Point::new(f32::INFINITY, 10.0);
        assert!(matches!(
            config.validate(),
            Err(Error::ConfigInvalid { ref field, .. }) if field == "template.slot_b.anchor"
        ));

        let mut config = AppConfig::default();
        config.template.cover.padding = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.template.cover.line_height_factor = f32::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fallback_fonts_follow_primary() {
        let font = FontConfig {
            path: Some(PathBuf::from("/opt/fonts/NanumGothic.ttf")),
            ..Default::default()
        };
        let paths = font.resolve_paths();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0], PathBuf::from("/opt/fonts/NanumGothic.ttf"));
        assert!(paths[1].ends_with("DejaVuSans.ttf"));

        assert_eq!(font.resource_name_for(0), "FStamp");
        assert_eq!(font.resource_name_for(1), "FStamp1");
    }

    #[test]
    fn test_explicit_font_path_wins() {
        let font = FontConfig {
            path: Some(PathBuf::from("/opt/fonts/NanumGothic.ttf")),
            ..Default::default()
        };
        assert_eq!(font.resolve_path(), PathBuf::from("/opt/fonts/NanumGothic.ttf"));
    }
}
