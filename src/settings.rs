//! Editor configuration.
//!
//! Settings are the only state the application persists between sessions;
//! the drawing itself is never saved.

use crate::constants;
use serde::{Deserialize, Serialize};

/// A keyboard modifier that can gate a connect gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierKey {
    /// Shift
    Shift,
    /// Alt / Option
    Alt,
    /// Control
    Control,
}

/// Tunable editor behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Minimum vertex radius for new vertices
    pub vertex_radius: f32,
    /// Click tolerance around edges
    pub edge_margin: f32,
    /// Axis distance under which dragged vertices align with others
    pub snap_tolerance: f32,
    /// Label font size
    pub font_size: f32,
    /// Held to start an undirected connect gesture
    pub undirected_modifier: ModifierKey,
    /// Held to start a directed connect gesture
    pub directed_modifier: ModifierKey,
    /// Canvas-to-TikZ coordinate multiplier
    pub tikz_scale: f32,
    /// Resolution multiplier for PNG export
    pub png_scale: f32,
    /// Whether dark mode visuals are enabled
    pub dark_mode: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            vertex_radius: constants::VERTEX_RADIUS,
            edge_margin: constants::EDGE_MARGIN,
            snap_tolerance: constants::SNAP_TOLERANCE,
            font_size: constants::FONT_SIZE,
            undirected_modifier: ModifierKey::Shift,
            directed_modifier: ModifierKey::Alt,
            tikz_scale: constants::TIKZ_SCALE,
            png_scale: 1.0,
            dark_mode: false,
        }
    }
}

impl EditorSettings {
    /// Serializes the settings to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes settings from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let json = r#"{ "snap_tolerance": 4.0, "directed_modifier": "Control" }"#;
        let settings = EditorSettings::from_json(json).expect("valid settings");
        assert_eq!(settings.snap_tolerance, 4.0);
        assert_eq!(settings.directed_modifier, ModifierKey::Control);
        assert_eq!(settings.vertex_radius, constants::VERTEX_RADIUS);
        assert_eq!(settings.undirected_modifier, ModifierKey::Shift);
    }

    #[test]
    fn json_round_trip_preserves_values() {
        let settings = EditorSettings {
            dark_mode: true,
            png_scale: 2.0,
            ..Default::default()
        };
        let json = settings.to_json().expect("serialize");
        assert_eq!(EditorSettings::from_json(&json).expect("deserialize"), settings);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(EditorSettings::from_json("{ not json").is_err());
    }
}
