//! Game settings and variants
//!
//! The two shipped variants differ only in paddle width and colors; every
//! other knob lives on `Settings` and can be overridden from a JSON file.

use std::path::Path;

use anyhow::{Context, ensure};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::platform::Color;

/// Game variant presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Wide paddle, neon palette
    #[default]
    Classic,
    /// Narrow paddle, warm palette
    Compact,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "Classic",
            Variant::Compact => "Compact",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "a" => Some(Variant::Classic),
            "compact" | "b" => Some(Variant::Compact),
            _ => None,
        }
    }

    pub fn paddle_width(&self) -> f32 {
        match self {
            Variant::Classic => 120.0,
            Variant::Compact => 80.0,
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Variant::Classic => Palette {
                background: Color::hex("#D6D1F5"),
                ball_fill: Color::hex("#FF0000"),
                ball_outline: Color::hex("#000000"),
                paddle_fill: Color::hex("#2C3E50"),
                paddle_outline: Color::hex("#00FFFF"),
                brick_outline: Color::hex("#FFFFFF"),
                bricks: [
                    Color::hex("#00D2FF"),
                    Color::hex("#FF00FF"),
                    Color::hex("#9D00FF"),
                ],
            },
            Variant::Compact => Palette {
                background: Color::hex("#FFF4E0"),
                ball_fill: Color::hex("#FFFFFF"),
                ball_outline: Color::hex("#333333"),
                paddle_fill: Color::hex("#FFB847"),
                paddle_outline: Color::hex("#8C5A00"),
                brick_outline: Color::hex("#FFFFFF"),
                bricks: [
                    Color::hex("#4D9DE0"),
                    Color::hex("#E1BC29"),
                    Color::hex("#E15554"),
                ],
            },
        }
    }
}

/// Colors used when creating shapes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub background: Color,
    pub ball_fill: Color,
    pub ball_outline: Color,
    pub paddle_fill: Color,
    pub paddle_outline: Color,
    pub brick_outline: Color,
    /// Brick fill keyed by remaining hits (index 0 = one hit left)
    pub bricks: [Color; 3],
}

impl Palette {
    /// Fill for a brick with `hits` remaining (clamped to 1..=3)
    pub fn brick(&self, hits: u8) -> &Color {
        let idx = usize::from(hits.clamp(1, BRICK_MAX_HITS)) - 1;
        &self.bricks[idx]
    }
}

/// What happens after a lost round once the reset delay has elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ResumeMode {
    /// Show the start banner and wait for Space
    #[default]
    WaitForStart,
    /// Relaunch immediately without a banner
    Auto,
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub variant: Variant,
    /// Overrides the variant palette when set
    pub palette: Option<Palette>,

    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Rules ===
    pub lives: i32,
    pub max_balls: usize,
    pub resume: ResumeMode,

    // === Timing ===
    pub tick_interval_ms: u64,
    pub reset_delay_ms: u64,

    /// Seed for extra-ball direction rolls
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::Classic,
            palette: None,

            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            lives: START_LIVES,
            max_balls: MAX_BALLS,
            resume: ResumeMode::WaitForStart,

            tick_interval_ms: TICK_INTERVAL_MS,
            reset_delay_ms: ROUND_RESET_DELAY_MS,

            seed: 0x5EED_B01A,
        }
    }
}

impl Settings {
    /// Create settings for a variant (applies variant defaults)
    pub fn from_variant(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    pub fn paddle_width(&self) -> f32 {
        self.variant.paddle_width()
    }

    /// Effective palette (explicit override or the variant's)
    pub fn palette(&self) -> Palette {
        self.palette
            .clone()
            .unwrap_or_else(|| self.variant.palette())
    }

    /// Parse and validate settings; missing keys fall back to defaults
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let settings: Self = serde_json::from_str(json).context("invalid settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the game loop cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        // A zero interval reschedules every tick at the same instant forever
        ensure!(self.tick_interval_ms > 0, "tick_interval_ms must be at least 1");
        ensure!(
            self.field_width.is_finite() && self.field_width >= self.paddle_width(),
            "field_width must be at least the paddle width ({})",
            self.paddle_width()
        );
        ensure!(
            self.field_height.is_finite() && self.field_height > PADDLE_Y + PADDLE_HEIGHT,
            "field_height must leave room below the paddle (> {})",
            PADDLE_Y + PADDLE_HEIGHT
        );
        ensure!(self.lives >= 0, "lives must not be negative");
        ensure!(self.max_balls >= 1, "max_balls must be at least 1");
        Ok(())
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize settings")
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        let settings = Self::from_json(&json)?;
        log::info!(
            "Loaded settings from {} (variant {})",
            path.display(),
            settings.variant.as_str()
        );
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_paddle_widths() {
        assert_eq!(Settings::from_variant(Variant::Classic).paddle_width(), 120.0);
        assert_eq!(Settings::from_variant(Variant::Compact).paddle_width(), 80.0);
        assert_eq!(Variant::from_str("B"), Some(Variant::Compact));
        assert_eq!(Variant::from_str("nope"), None);
    }

    #[test]
    fn test_brick_colors_keyed_by_hits() {
        let palette = Variant::Classic.palette();
        assert_eq!(palette.brick(1), &Color::hex("#00D2FF"));
        assert_eq!(palette.brick(2), &Color::hex("#FF00FF"));
        assert_eq!(palette.brick(3), &Color::hex("#9D00FF"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "variant": "Compact", "lives": 1, "resume": "Auto" }"#)
            .unwrap();
        assert_eq!(settings.variant, Variant::Compact);
        assert_eq!(settings.lives, 1);
        assert_eq!(settings.resume, ResumeMode::Auto);
        assert_eq!(settings.max_balls, MAX_BALLS);
        assert_eq!(settings.tick_interval_ms, TICK_INTERVAL_MS);
        assert_eq!(settings.palette(), Variant::Compact.palette());
    }

    #[test]
    fn test_json_roundtrip_keeps_palette_override() {
        let mut settings = Settings::default();
        let mut palette = settings.palette();
        palette.ball_fill = Color::hex("#123456");
        settings.palette = Some(palette.clone());

        let back = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(back.palette(), palette);
    }

    #[test]
    fn test_zero_tick_interval_is_rejected() {
        let err = Settings::from_json(r#"{ "tick_interval_ms": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("tick_interval_ms"));
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        for json in [
            r#"{ "lives": -1 }"#,
            r#"{ "max_balls": 0 }"#,
            r#"{ "field_width": 0.0 }"#,
            r#"{ "variant": "Classic", "field_width": 100.0 }"#,
            r#"{ "field_height": 300.0 }"#,
        ] {
            assert!(Settings::from_json(json).is_err(), "accepted {json}");
        }
        assert!(Settings::from_json(r#"{ "lives": 0, "reset_delay_ms": 0 }"#).is_ok());
        assert!(Settings::default().validate().is_ok());
        assert!(Settings::from_variant(Variant::Compact).validate().is_ok());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Settings::from_json("{ lives: ").is_err());
    }
}
