use serde::Serialize;
use std::collections::BTreeMap;

pub const RED: &str = "#ff0000";
pub const BLUE: &str = "#0000ff";
pub const YELLOW: &str = "#ffff00";
pub const BLACK: &str = "#000000";
pub const WHITE: &str = "#ffffff";

/// Colours a subdivision step may pick instead of white.
pub const PALETTE: [&str; 4] = [RED, BLUE, YELLOW, BLACK];

pub const FILL: &str = "fill";
pub const STROKE: &str = "stroke";
pub const STROKE_WIDTH: &str = "stroke-width";

pub const DEFAULT_STROKE_WIDTH: f64 = 8.0;

/// Formats a length in px units, `8px`, `8.8px`.
pub fn format_px(value: f64) -> String {
    format!("{value}px")
}

// Cloned into every rectangle, so callers can keep editing theirs
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Style {
    properties: BTreeMap<String, String>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// The initial property set handed to the engine by a host.
    pub fn base() -> Self {
        let mut style = Style::new();
        style.set("stroke-linejoin", "miter");
        style.set(STROKE_WIDTH, format_px(DEFAULT_STROKE_WIDTH));
        style.set("stroke-opacity", "1.0");
        style.set("fill-opacity", "1.0");
        style.set(STROKE, BLACK);
        style.set("stroke-linecap", "butt");
        style.set(FILL, WHITE);
        style
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }

    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.set(STROKE_WIDTH, format_px(width));
        self
    }

    pub fn with_fill(mut self, color: &str) -> Self {
        self.set(FILL, color);
        self
    }

    pub fn fill(&self) -> Option<&str> {
        self.get(FILL)
    }

    pub fn stroke(&self) -> Option<&str> {
        self.get(STROKE)
    }

    /// Stroke width in px, if present and numeric. A bare number without the
    /// `px` suffix is accepted too.
    pub fn stroke_width(&self) -> Option<f64> {
        let raw = self.get(STROKE_WIDTH)?;
        raw.trim().trim_end_matches("px").parse().ok()
    }

    /// Opacity property as a number, `1.0` when absent or unparsable.
    pub fn opacity(&self, name: &str) -> f64 {
        self.get(name)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .map_or(1.0, |v| v.clamp(0.0, 1.0))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Inline CSS form used in a `style` attribute.
    pub fn to_css(&self) -> String {
        self.iter()
            .map(|(name, value)| format!("{name}:{value}"))
            .collect::<Vec<_>>()
            .join(";")
    }
}
