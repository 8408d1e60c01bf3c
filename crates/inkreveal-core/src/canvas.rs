//! In-memory scene surface with a camera.

use crate::camera::{Camera, CameraTransition};
use crate::element::{visible_bounds, SceneElement};
use crate::surface::{FitRequest, SceneSurface, SurfaceResult};
use kurbo::{BezPath, Size};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Settings for a [`SceneCanvas`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub viewport: Size,
    /// Duration of the animated fit, in milliseconds.
    pub transition_ms: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            viewport: Size::new(1280.0, 800.0),
            transition_ms: 500.0,
        }
    }
}

/// A render-ready element: screen-space outline plus paint.
#[derive(Debug, Clone)]
pub struct DrawItem {
    pub id: String,
    pub path: BezPath,
    pub color: Color,
    pub stroke_width: f64,
}

/// A scene surface that keeps elements in memory and tracks a camera.
///
/// Hosts that render elsewhere can mirror it; the CLI plays reveals against it
/// directly.
#[derive(Debug, Clone)]
pub struct SceneCanvas {
    elements: Vec<SceneElement>,
    camera: Camera,
    transition: Option<CameraTransition>,
    config: CanvasConfig,
    replacements: usize,
}

impl Default for SceneCanvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl SceneCanvas {
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            elements: Vec::new(),
            camera: Camera::new(),
            transition: None,
            config,
            replacements: 0,
        }
    }

    pub fn elements(&self) -> &[SceneElement] {
        &self.elements
    }

    pub fn visible_elements(&self) -> impl Iterator<Item = &SceneElement> {
        self.elements.iter().filter(|e| e.is_visible())
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> Size {
        self.config.viewport
    }

    /// Number of whole-scene replacements received.
    pub fn replacements(&self) -> usize {
        self.replacements
    }

    /// True while an animated camera move is in progress.
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Advance the camera transition to `now` (ms).
    /// Returns true while the transition still needs frames.
    pub fn update(&mut self, now: f64) -> bool {
        let Some(transition) = self.transition.as_mut() else {
            return false;
        };
        self.camera = transition.sample(now);
        if transition.is_done(now) {
            self.transition = None;
            return false;
        }
        true
    }

    /// Visible elements as screen-space paths and paint, back to front.
    pub fn draw_items(&self) -> Vec<DrawItem> {
        let transform = self.camera.transform();
        self.visible_elements()
            .map(|element| DrawItem {
                id: element.id.clone(),
                path: transform * element.to_path(),
                color: element.style.stroke_with_opacity(),
                stroke_width: element.style.stroke_width * self.camera.zoom,
            })
            .collect()
    }

    /// Serialize the current elements to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.elements)
    }
}

impl SceneSurface for SceneCanvas {
    fn replace_elements(&mut self, elements: Vec<SceneElement>) -> SurfaceResult<()> {
        self.elements = elements;
        self.replacements += 1;
        Ok(())
    }

    fn scene_elements(&self) -> Vec<SceneElement> {
        self.elements.clone()
    }

    fn scroll_to_content(&mut self, elements: &[SceneElement], fit: FitRequest) -> SurfaceResult<()> {
        let Some(bounds) = visible_bounds(elements) else {
            return Ok(());
        };
        let target = self
            .camera
            .fitted_to(bounds, self.config.viewport, fit.padding);

        if fit.animate && self.config.transition_ms > 0.0 {
            log::debug!("Animating camera to zoom {:.2}", target.zoom);
            self.transition = Some(CameraTransition::new(
                self.camera.clone(),
                target,
                self.config.transition_ms,
            ));
        } else {
            self.camera = target;
            self.transition = None;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_scene;
    use crate::input::{Label, Stroke};
    use kurbo::{Point, Shape};

    fn scene() -> Vec<SceneElement> {
        let strokes = vec![Stroke::new(
            vec![Point::new(0.0, 0.0), Point::new(100.0, 50.0), Point::new(200.0, 0.0)],
            "#f00",
        )];
        let labels = vec![Label::new(Point::new(0.0, 60.0), "Hi")];
        build_scene(&strokes, &labels).unwrap().elements
    }

    #[test]
    fn test_replace_counts() {
        let mut canvas = SceneCanvas::default();
        canvas.replace_elements(scene()).unwrap();
        canvas.replace_elements(scene()).unwrap();
        assert_eq!(canvas.replacements(), 2);
        assert_eq!(canvas.scene_elements().len(), 2);
    }

    #[test]
    fn test_immediate_fit() {
        let mut canvas = SceneCanvas::new(CanvasConfig {
            viewport: Size::new(440.0, 440.0),
            transition_ms: 500.0,
        });
        let elements = scene();
        canvas
            .scroll_to_content(&elements, FitRequest { animate: false, padding: 20.0 })
            .unwrap();
        assert!(!canvas.is_transitioning());
        assert!((canvas.camera().zoom - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_animated_fit() {
        let mut canvas = SceneCanvas::default();
        let elements = scene();
        canvas
            .scroll_to_content(&elements, FitRequest { animate: true, padding: 40.0 })
            .unwrap();
        assert!(canvas.is_transitioning());

        assert!(canvas.update(0.0));
        assert!(canvas.update(250.0));
        assert!(!canvas.update(500.0));
        assert!(!canvas.is_transitioning());
        assert!(canvas.camera().zoom > 1.0);
    }

    #[test]
    fn test_fit_ignores_hidden_only_scene() {
        let mut canvas = SceneCanvas::default();
        let mut elements = scene();
        for element in &mut elements {
            element.is_deleted = true;
        }
        canvas
            .scroll_to_content(&elements, FitRequest { animate: true, padding: 0.0 })
            .unwrap();
        assert!(!canvas.is_transitioning());
        assert_eq!(*canvas.camera(), Camera::new());
    }

    #[test]
    fn test_draw_items_skip_hidden() {
        let mut canvas = SceneCanvas::default();
        let mut elements = scene();
        elements[1].is_deleted = true;
        canvas.replace_elements(elements).unwrap();

        let items = canvas.draw_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "stroke-0");
        assert_eq!(items[0].color.to_rgba8().r, 255);
    }

    #[test]
    fn test_draw_items_follow_fitted_camera() {
        let strokes = vec![Stroke::new(
            vec![Point::new(0.0, 0.0), Point::new(200.0, 100.0)],
            "#000",
        )];
        let elements = build_scene(&strokes, &[]).unwrap().elements;
        let mut canvas = SceneCanvas::new(CanvasConfig {
            viewport: Size::new(440.0, 440.0),
            transition_ms: 0.0,
        });
        canvas.replace_elements(elements.clone()).unwrap();
        canvas
            .scroll_to_content(&elements, FitRequest { animate: false, padding: 20.0 })
            .unwrap();

        let items = canvas.draw_items();
        let bbox = items[0].path.bounding_box();
        // 200x100 at zoom 2, centered in 440x440.
        assert!((bbox.x0 - 20.0).abs() < 1e-9);
        assert!((bbox.x1 - 420.0).abs() < 1e-9);
        assert!((bbox.y0 - 120.0).abs() < 1e-9);
        assert!((bbox.y1 - 320.0).abs() < 1e-9);
        assert!((items[0].stroke_width - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_to_json() {
        let mut canvas = SceneCanvas::default();
        canvas.replace_elements(scene()).unwrap();
        let json = canvas.to_json().unwrap();
        let parsed: Vec<SceneElement> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, canvas.elements());
    }
}
