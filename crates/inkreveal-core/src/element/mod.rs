//! Renderable scene elements.

mod label;
mod stroke;

pub use label::LabelText;
pub use stroke::{point_bounds, StrokeLine};

use kurbo::{Affine, BezPath, Point, Rect, Shape as _};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Stable element identifier (`stroke-<i>` / `label-<i>`).
pub type ElementId = String;

/// Fully opaque on the 0-100 opacity scale.
pub const FULL_OPACITY: u8 = 100;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` or `transparent`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("transparent") {
            return Some(Self::transparent());
        }
        let hex = s.strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => Some(Self::new(nibble(0)?, nibble(1)?, nibble(2)?, 255)),
            4 => Some(Self::new(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
            6 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Parse a color, falling back to black for anything unrecognized.
    pub fn parse_or_black(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            log::warn!("Unrecognized color {:?}, using black", s);
            Self::black()
        })
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// How a point sequence is rendered between its points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Roundness {
    /// Smooth curve through the interior points.
    Curved,
}

/// Visual style of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementStyle {
    pub stroke_color: SerializableColor,
    pub stroke_width: f64,
    /// Fill color (None = transparent).
    pub fill_color: Option<SerializableColor>,
    /// Opacity on a 0-100 scale.
    pub opacity: u8,
    /// Curved rendering marker (None = straight segments).
    pub roundness: Option<Roundness>,
}

impl ElementStyle {
    /// Get the stroke color with opacity applied.
    pub fn stroke_with_opacity(&self) -> Color {
        let alpha = (self.stroke_color.a as f64 * self.opacity.min(FULL_OPACITY) as f64
            / FULL_OPACITY as f64)
            .round() as u8;
        Color::from_rgba8(
            self.stroke_color.r,
            self.stroke_color.g,
            self.stroke_color.b,
            alpha,
        )
    }
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            stroke_width: crate::input::DEFAULT_STROKE_WIDTH,
            fill_color: None,
            opacity: FULL_OPACITY,
            roundness: None,
        }
    }
}

/// Kind-specific payload of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ElementKind {
    StrokeLine(StrokeLine),
    LabelText(LabelText),
}

/// A renderable unit of the scene.
///
/// `version` grows every time the element's visible content changes, so a
/// surface can tell "same element, new content" from "unchanged".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneElement {
    pub id: ElementId,
    /// Top-left corner in world coordinates.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Rotation in radians.
    pub angle: f64,
    pub style: ElementStyle,
    pub group_ids: Vec<String>,
    pub locked: bool,
    /// Hidden/removed from the visible scene.
    pub is_deleted: bool,
    pub version: u32,
    pub kind: ElementKind,
}

impl SceneElement {
    /// Id of the `index`-th stroke element.
    pub fn stroke_id(index: usize) -> ElementId {
        format!("stroke-{}", index)
    }

    /// Id of the `index`-th label element.
    pub fn label_id(index: usize) -> ElementId {
        format!("label-{}", index)
    }

    pub fn is_visible(&self) -> bool {
        !self.is_deleted
    }

    pub fn as_stroke(&self) -> Option<&StrokeLine> {
        match &self.kind {
            ElementKind::StrokeLine(line) => Some(line),
            _ => None,
        }
    }

    pub fn as_label(&self) -> Option<&LabelText> {
        match &self.kind {
            ElementKind::LabelText(text) => Some(text),
            _ => None,
        }
    }

    /// Bounding box in world coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    /// Outline in world coordinates.
    pub fn to_path(&self) -> BezPath {
        let local = match &self.kind {
            ElementKind::StrokeLine(line) => line.to_path(self.style.roundness),
            ElementKind::LabelText(_) => Rect::new(0.0, 0.0, self.width, self.height).to_path(0.1),
        };
        let mut path = local;
        path.apply_affine(Affine::translate(self.position.to_vec2()));
        path
    }

    /// Same visible content, ignoring `version`.
    pub fn same_content(&self, other: &SceneElement) -> bool {
        self.id == other.id
            && self.is_deleted == other.is_deleted
            && self.position == other.position
            && self.width == other.width
            && self.height == other.height
            && self.style == other.style
            && self.kind == other.kind
    }
}

/// Union of the bounds of all visible elements.
pub fn visible_bounds<'a>(elements: impl IntoIterator<Item = &'a SceneElement>) -> Option<Rect> {
    elements
        .into_iter()
        .filter(|e| e.is_visible())
        .map(SceneElement::bounds)
        .reduce(|acc, b| acc.union(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(points: Vec<Point>) -> SceneElement {
        SceneElement {
            id: SceneElement::stroke_id(0),
            position: Point::new(10.0, 20.0),
            width: 30.0,
            height: 40.0,
            angle: 0.0,
            style: ElementStyle::default(),
            group_ids: Vec::new(),
            locked: false,
            is_deleted: false,
            version: 1,
            kind: ElementKind::StrokeLine(StrokeLine::new(points, false)),
        }
    }

    #[test]
    fn test_parse_colors() {
        assert_eq!(SerializableColor::parse("#000"), Some(SerializableColor::black()));
        assert_eq!(
            SerializableColor::parse("#ff8000"),
            Some(SerializableColor::new(255, 128, 0, 255))
        );
        assert_eq!(
            SerializableColor::parse("#f008"),
            Some(SerializableColor::new(255, 0, 0, 136))
        );
        assert_eq!(
            SerializableColor::parse("#11223344"),
            Some(SerializableColor::new(0x11, 0x22, 0x33, 0x44))
        );
        assert_eq!(
            SerializableColor::parse("transparent"),
            Some(SerializableColor::transparent())
        );
        assert_eq!(SerializableColor::parse("red"), None);
        assert_eq!(SerializableColor::parse("#12345"), None);
        assert_eq!(SerializableColor::parse("#gg0"), None);
        assert_eq!(SerializableColor::parse_or_black("nope"), SerializableColor::black());
    }

    #[test]
    fn test_stroke_with_opacity() {
        let mut style = ElementStyle::default();
        style.opacity = 50;
        let rgba = style.stroke_with_opacity().to_rgba8();
        assert_eq!(rgba.a, 128);

        style.opacity = 0;
        assert_eq!(style.stroke_with_opacity().to_rgba8().a, 0);
    }

    #[test]
    fn test_ids() {
        assert_eq!(SceneElement::stroke_id(2), "stroke-2");
        assert_eq!(SceneElement::label_id(0), "label-0");
    }

    #[test]
    fn test_bounds_and_path_are_world_space() {
        let element = line(vec![Point::new(0.0, 0.0), Point::new(30.0, 40.0)]);
        assert_eq!(element.bounds(), Rect::new(10.0, 20.0, 40.0, 60.0));

        let path_bounds = kurbo::Shape::bounding_box(&element.to_path());
        assert!((path_bounds.x0 - 10.0).abs() < 1e-9);
        assert!((path_bounds.y1 - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_content_ignores_version() {
        let a = line(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        let mut b = a.clone();
        b.version = 7;
        assert!(a.same_content(&b));

        b.style.opacity = 10;
        assert!(!a.same_content(&b));
    }

    #[test]
    fn test_visible_bounds_skips_deleted() {
        let a = line(vec![Point::new(0.0, 0.0)]);
        let mut b = a.clone();
        b.position = Point::new(500.0, 500.0);
        b.is_deleted = true;

        assert_eq!(visible_bounds([&a, &b]), Some(a.bounds()));
        b.is_deleted = false;
        assert_eq!(visible_bounds([&a, &b]), Some(a.bounds().union(b.bounds())));

        let none: [&SceneElement; 0] = [];
        assert_eq!(visible_bounds(none), None);
    }

    #[test]
    fn test_kind_serializes_with_tag() {
        let element = line(vec![Point::new(0.0, 0.0)]);
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["kind"]["type"], "stroke-line");
    }
}
