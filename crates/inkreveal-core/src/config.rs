//! Timing and presentation settings for a reveal run.

use crate::error::{RevealError, RevealResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Milliseconds of drawing time per stroke point.
pub const DEFAULT_MS_PER_POINT: f64 = 30.0;
/// Shortest time any stroke takes to draw.
pub const DEFAULT_MIN_STROKE_MS: f64 = 300.0;
/// Longest time any stroke takes to draw.
pub const DEFAULT_MAX_STROKE_MS: f64 = 2000.0;
/// Fraction of a stroke's duration after which the next stroke starts.
pub const DEFAULT_STAGGER_FRACTION: f64 = 0.3;
/// Duration of the label fade-in after the stroke phase.
pub const DEFAULT_LABEL_FADE_MS: f64 = 400.0;

/// Settings controlling reveal timing and the end-of-run fit.
///
/// Missing fields fall back to their defaults when deserialized, so a config
/// file only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub ms_per_point: f64,
    pub min_stroke_ms: f64,
    pub max_stroke_ms: f64,
    /// Next stroke starts after this fraction of the previous one.
    /// The stroke phase ends at `1 - stagger_fraction` of the last stroke.
    pub stagger_fraction: f64,
    pub label_fade_ms: f64,
    /// Frame interval used by real-time clocks (~60 Hz).
    pub frame_interval_ms: f64,
    /// Padding around the content when fitting the viewport.
    pub fit_padding: f64,
    /// Whether the end-of-run fit animates the camera.
    pub animate_fit: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            ms_per_point: DEFAULT_MS_PER_POINT,
            min_stroke_ms: DEFAULT_MIN_STROKE_MS,
            max_stroke_ms: DEFAULT_MAX_STROKE_MS,
            stagger_fraction: DEFAULT_STAGGER_FRACTION,
            label_fade_ms: DEFAULT_LABEL_FADE_MS,
            frame_interval_ms: 1000.0 / 60.0,
            fit_padding: 40.0,
            animate_fit: true,
        }
    }
}

impl RevealConfig {
    /// Parse a config from JSON and validate it.
    pub fn from_json_str(json: &str) -> RevealResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| RevealError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> RevealResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| RevealError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Check that every value is usable for timing math.
    pub fn validate(&self) -> RevealResult<()> {
        let non_negative = [
            ("ms_per_point", self.ms_per_point),
            ("min_stroke_ms", self.min_stroke_ms),
            ("max_stroke_ms", self.max_stroke_ms),
            ("label_fade_ms", self.label_fade_ms),
            ("fit_padding", self.fit_padding),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(RevealError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.min_stroke_ms > self.max_stroke_ms {
            return Err(RevealError::Config(format!(
                "min_stroke_ms ({}) exceeds max_stroke_ms ({})",
                self.min_stroke_ms, self.max_stroke_ms
            )));
        }
        if !(self.stagger_fraction > 0.0 && self.stagger_fraction <= 1.0) {
            return Err(RevealError::Config(format!(
                "stagger_fraction must be in (0, 1], got {}",
                self.stagger_fraction
            )));
        }
        if !self.frame_interval_ms.is_finite() || self.frame_interval_ms <= 0.0 {
            return Err(RevealError::Config(format!(
                "frame_interval_ms must be positive, got {}",
                self.frame_interval_ms
            )));
        }
        Ok(())
    }
}
