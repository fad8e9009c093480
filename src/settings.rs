use crate::draw::input::ShapeStyle;
use crate::draw::{Color, RenderSettings};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CanvasSettings {
    /// When enabled logging starts at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Write log output to this file instead of stderr.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Canvas background as `#rrggbb` or `#rrggbbaa`.
    #[serde(default = "default_background")]
    pub background: String,
    /// Stroke color for new shapes.
    #[serde(default = "default_color")]
    pub default_color: String,
    /// Fill color for new polygons. Polygons are left unfilled when absent.
    #[serde(default)]
    pub default_fill_color: Option<String>,
    #[serde(default = "default_thickness")]
    pub default_thickness: u32,
    #[serde(default)]
    pub anti_aliasing: bool,
    /// Draw marker squares on editable points.
    #[serde(default)]
    pub show_handles: bool,
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

fn default_background() -> String {
    Color::WHITE.to_hex()
}

fn default_color() -> String {
    Color::BLACK.to_hex()
}

fn default_thickness() -> u32 {
    1
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            log_file: None,
            width: default_width(),
            height: default_height(),
            background: default_background(),
            default_color: default_color(),
            default_fill_color: None,
            default_thickness: default_thickness(),
            anti_aliasing: false,
            show_handles: false,
        }
    }
}

fn parse_color(field: &str, value: &str, fallback: Color) -> Color {
    match Color::from_hex(value) {
        Ok(color) => color,
        Err(err) => {
            tracing::warn!("{field} '{value}' is invalid ({err}); using {}", fallback.to_hex());
            fallback
        }
    }
}

impl CanvasSettings {
    /// Missing or empty files yield the defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&content).with_context(|| format!("parse settings {}", path.display()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("write settings {}", path.display()))?;
        Ok(())
    }

    pub fn background_color(&self) -> Color {
        parse_color("background", &self.background, Color::WHITE)
    }

    pub fn stroke_color(&self) -> Color {
        parse_color("default_color", &self.default_color, Color::BLACK)
    }

    pub fn fill_color(&self) -> Option<Color> {
        self.default_fill_color
            .as_deref()
            .map(|value| parse_color("default_fill_color", value, Color::BLACK))
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            background: self.background_color(),
            show_handles: self.show_handles,
        }
    }

    /// Style for shapes created through the input controller.
    pub fn shape_style(&self) -> ShapeStyle {
        ShapeStyle {
            color: self.stroke_color(),
            thickness: self.default_thickness.max(1),
            anti_aliased: self.anti_aliasing,
            fill: self.fill_color(),
        }
    }
}
