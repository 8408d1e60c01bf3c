//! Stroke line payload.

use super::Roundness;
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// Bounding box of a point list, or `None` when it is empty.
pub fn point_bounds(points: &[Point]) -> Option<Rect> {
    let (&first, rest) = points.split_first()?;
    Some(
        rest.iter()
            .fold(Rect::from_points(first, first), |bounds, p| bounds.union_pt(*p)),
    )
}

/// A pen stroke in element-local coordinates.
///
/// Points are relative to the owning element's position, so trimming the
/// point list never moves the stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeLine {
    pub points: Vec<Point>,
    /// Whether the path closes back on its first point.
    pub closed: bool,
}

impl StrokeLine {
    pub fn new(points: Vec<Point>, closed: bool) -> Self {
        Self { points, closed }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The first `count` points of this stroke (all of them if `count` is larger).
    pub fn prefix(&self, count: usize) -> StrokeLine {
        let count = count.min(self.points.len());
        StrokeLine {
            points: self.points[..count].to_vec(),
            closed: self.closed && count == self.points.len(),
        }
    }

    /// Path through the points in local coordinates.
    ///
    /// Curved strokes pass through segment midpoints with the interior
    /// points as quadratic control points.
    pub fn to_path(&self, roundness: Option<Roundness>) -> BezPath {
        let mut path = BezPath::new();

        let Some(&first) = self.points.first() else {
            return path;
        };
        path.move_to(first);

        match roundness {
            Some(Roundness::Curved) if self.points.len() > 2 => {
                let last = self.points.len() - 1;
                for i in 1..last {
                    let ctrl = self.points[i];
                    let mid = ctrl.midpoint(self.points[i + 1]);
                    if i + 1 == last {
                        path.quad_to(ctrl, self.points[last]);
                    } else {
                        path.quad_to(ctrl, mid);
                    }
                }
            }
            _ => {
                for point in self.points.iter().skip(1) {
                    path.line_to(*point);
                }
            }
        }

        if self.closed {
            path.close_path();
        }
        path
    }
}
