//! Stroke and label data supplied by the drawing agent.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Stroke width used when the agent leaves it unset.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Font size used when the agent leaves it unset.
pub const DEFAULT_FONT_SIZE: f64 = 20.0;

fn default_stroke_width() -> f64 {
    DEFAULT_STROKE_WIDTH
}

fn default_font_size() -> f64 {
    DEFAULT_FONT_SIZE
}

fn default_color() -> String {
    "#000000".to_string()
}

/// A single continuous pen path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Points in drawing order, as `[x, y]` pairs on the wire.
    #[serde(with = "point_pairs")]
    pub points: Vec<Point>,
    /// CSS-style color string (`#rgb`, `#rrggbb`, `#rrggbbaa`).
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_stroke_width")]
    pub width: f64,
    /// Whether the path closes back on its first point.
    #[serde(default)]
    pub closed: bool,
}

impl Stroke {
    pub fn new(points: Vec<Point>, color: impl Into<String>) -> Self {
        Self {
            points,
            color: color.into(),
            width: DEFAULT_STROKE_WIDTH,
            closed: false,
        }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn closed(mut self) -> Self {
        self.closed = true;
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A positioned text annotation shown after the strokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Top-left corner; flattened to `x`/`y` on the wire.
    #[serde(flatten)]
    pub position: Point,
    pub text: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_color")]
    pub color: String,
}

impl Label {
    pub fn new(position: Point, text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
            font_size: DEFAULT_FONT_SIZE,
            color: default_color(),
        }
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

/// Everything one agent response contributes to the scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawingResult {
    #[serde(default)]
    pub strokes: Vec<Stroke>,
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl DrawingResult {
    /// Parse an agent response.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// True when there is nothing to animate.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.labels.is_empty()
    }
}

/// Serde adapter for `Vec<Point>` as a list of `[x, y]` pairs.
mod point_pairs {
    use kurbo::Point;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(points: &[Point], serializer: S) -> Result<S::Ok, S::Error> {
        let pairs: Vec<[f64; 2]> = points.iter().map(|p| [p.x, p.y]).collect();
        pairs.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Point>, D::Error> {
        let pairs = Vec::<[f64; 2]>::deserialize(deserializer)?;
        Ok(pairs.into_iter().map(|[x, y]| Point::new(x, y)).collect())
    }
}
