//! Viewport camera and animated fit-to-content.

use crate::ease::Ease;
use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Camera manages the view transform for the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan)
    pub offset: Vec2,
    /// Current zoom level (1.0 = 100%)
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// World to screen transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Camera that shows `bounds` centered in `viewport`, leaving `padding`
    /// on every side.
    pub fn fitted_to(&self, bounds: Rect, viewport: Size, padding: f64) -> Camera {
        let mut target = self.clone();

        let padded_viewport = Size::new(
            (viewport.width - padding * 2.0).max(1.0),
            (viewport.height - padding * 2.0).max(1.0),
        );

        // Degenerate content (a dot or a flat line) keeps the zoom on that axis.
        let scale_x = if bounds.width() > f64::EPSILON {
            padded_viewport.width / bounds.width()
        } else {
            f64::INFINITY
        };
        let scale_y = if bounds.height() > f64::EPSILON {
            padded_viewport.height / bounds.height()
        } else {
            f64::INFINITY
        };
        let scale = scale_x.min(scale_y);
        target.zoom = if scale.is_finite() {
            scale.clamp(self.min_zoom, self.max_zoom)
        } else {
            self.zoom
        };

        let bounds_center = bounds.center();
        let viewport_center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
        target.offset = Vec2::new(
            viewport_center.x - bounds_center.x * target.zoom,
            viewport_center.y - bounds_center.y * target.zoom,
        );
        target
    }
}

/// An eased camera move between two states.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraTransition {
    from: Camera,
    to: Camera,
    duration: f64,
    ease: Ease,
    /// Timestamp of the first update; set lazily.
    start: Option<f64>,
}

impl CameraTransition {
    pub fn new(from: Camera, to: Camera, duration: f64) -> Self {
        Self {
            from,
            to,
            duration,
            ease: Ease::OutCubic,
            start: None,
        }
    }

    /// Camera at `now` (ms). The first call anchors the transition.
    pub fn sample(&mut self, now: f64) -> Camera {
        let start = *self.start.get_or_insert(now);
        let t = if self.duration <= 0.0 {
            1.0
        } else {
            ((now - start) / self.duration).clamp(0.0, 1.0)
        };
        let k = self.ease.apply(t);

        let mut camera = self.to.clone();
        camera.offset = self.from.offset.lerp(self.to.offset, k);
        // Interpolate zoom geometrically so zooming feels uniform.
        camera.zoom = self.from.zoom * (self.to.zoom / self.from.zoom).powf(k);
        camera
    }

    /// True once `now` is past the end of the transition.
    pub fn is_done(&self, now: f64) -> bool {
        match self.start {
            Some(start) => now - start >= self.duration,
            None => self.duration <= 0.0,
        }
    }
}
