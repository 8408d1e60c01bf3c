//! Turns agent strokes and labels into scene elements.
//!
//! Elements come out strokes first, then labels, each index-aligned with its
//! input. `stroke_count` marks the boundary between the two.

use crate::element::{
    point_bounds, ElementKind, ElementStyle, LabelText, Roundness, SceneElement,
    SerializableColor, StrokeLine, FULL_OPACITY,
};
use crate::error::{RevealError, RevealResult};
use crate::input::{Label, Stroke};
use kurbo::{Point, Vec2};

/// A stroke translated so its bounding box starts at the local origin.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedStroke {
    /// `relative[i] == original[i] - offset`.
    pub relative: Vec<Point>,
    /// Minimum x and y of the original points.
    pub offset: Vec2,
    pub width: f64,
    pub height: f64,
}

impl NormalizedStroke {
    /// Normalize a point list; `None` when it is empty.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let bounds = point_bounds(points)?;
        let offset = bounds.origin().to_vec2();
        Some(Self {
            relative: points.iter().map(|p| *p - offset).collect(),
            offset,
            width: bounds.width(),
            height: bounds.height(),
        })
    }

    pub fn len(&self) -> usize {
        self.relative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relative.is_empty()
    }
}

/// Output of [`build_scene`].
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltScene {
    /// Stroke elements followed by label elements.
    pub elements: Vec<SceneElement>,
    /// One entry per stroke, in input order.
    pub normalized: Vec<NormalizedStroke>,
    pub stroke_count: usize,
}

impl BuiltScene {
    pub fn strokes(&self) -> &[SceneElement] {
        &self.elements[..self.stroke_count]
    }

    pub fn labels(&self) -> &[SceneElement] {
        &self.elements[self.stroke_count..]
    }
}

/// Build scene elements for a set of strokes and labels.
///
/// Fails on the first stroke without points.
pub fn build_scene(strokes: &[Stroke], labels: &[Label]) -> RevealResult<BuiltScene> {
    let mut elements = Vec::with_capacity(strokes.len() + labels.len());
    let mut normalized = Vec::with_capacity(strokes.len());

    for (index, stroke) in strokes.iter().enumerate() {
        let norm = NormalizedStroke::from_points(&stroke.points)
            .ok_or(RevealError::EmptyStroke { index })?;
        elements.push(stroke_element(index, stroke, &norm));
        normalized.push(norm);
    }

    for (index, label) in labels.iter().enumerate() {
        elements.push(label_element(index, label));
    }

    log::debug!(
        "Built scene with {} strokes and {} labels",
        strokes.len(),
        labels.len()
    );

    Ok(BuiltScene {
        elements,
        normalized,
        stroke_count: strokes.len(),
    })
}

fn stroke_element(index: usize, stroke: &Stroke, norm: &NormalizedStroke) -> SceneElement {
    let roundness = (norm.len() > 2).then_some(Roundness::Curved);
    SceneElement {
        id: SceneElement::stroke_id(index),
        position: norm.offset.to_point(),
        width: norm.width,
        height: norm.height,
        angle: 0.0,
        style: ElementStyle {
            stroke_color: SerializableColor::parse_or_black(&stroke.color),
            stroke_width: stroke.width,
            fill_color: None,
            opacity: FULL_OPACITY,
            roundness,
        },
        group_ids: Vec::new(),
        locked: false,
        is_deleted: false,
        version: 1,
        kind: ElementKind::StrokeLine(StrokeLine::new(norm.relative.clone(), stroke.closed)),
    }
}

fn label_element(index: usize, label: &Label) -> SceneElement {
    let text = LabelText::new(label.text.clone(), label.font_size);
    SceneElement {
        id: SceneElement::label_id(index),
        position: label.position,
        width: text.approximate_width(),
        height: text.approximate_height(),
        angle: 0.0,
        style: ElementStyle {
            stroke_color: SerializableColor::parse_or_black(&label.color),
            opacity: FULL_OPACITY,
            ..ElementStyle::default()
        },
        group_ids: Vec::new(),
        locked: false,
        is_deleted: false,
        version: 1,
        kind: ElementKind::LabelText(text),
    }
}
