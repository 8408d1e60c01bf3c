//! Rendering surface abstraction.
//!
//! The surface owns the visible scene. A reveal run is its only writer while
//! it is active and replaces the whole element set on every frame.

use crate::element::SceneElement;
use thiserror::Error;

/// Errors reported by a rendering surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Surface rejected update: {0}")]
    Rejected(String),
}

/// Result type for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// How to fit the viewport around content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitRequest {
    /// Animate the camera instead of jumping.
    pub animate: bool,
    /// Screen-space padding around the content.
    pub padding: f64,
}

/// A scene that accepts whole-scene replacement.
pub trait SceneSurface {
    /// Whether the surface can currently take updates.
    fn is_available(&self) -> bool {
        true
    }

    /// Replace the entire visible element set.
    fn replace_elements(&mut self, elements: Vec<SceneElement>) -> SurfaceResult<()>;

    /// Current scene elements.
    fn scene_elements(&self) -> Vec<SceneElement>;

    /// Scroll/zoom so `elements` fit the viewport.
    fn scroll_to_content(&mut self, elements: &[SceneElement], fit: FitRequest) -> SurfaceResult<()>;
}

impl<S: SceneSurface + ?Sized> SceneSurface for &mut S {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn replace_elements(&mut self, elements: Vec<SceneElement>) -> SurfaceResult<()> {
        (**self).replace_elements(elements)
    }

    fn scene_elements(&self) -> Vec<SceneElement> {
        (**self).scene_elements()
    }

    fn scroll_to_content(&mut self, elements: &[SceneElement], fit: FitRequest) -> SurfaceResult<()> {
        (**self).scroll_to_content(elements, fit)
    }
}

impl<S: SceneSurface + ?Sized> SceneSurface for Box<S> {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn replace_elements(&mut self, elements: Vec<SceneElement>) -> SurfaceResult<()> {
        (**self).replace_elements(elements)
    }

    fn scene_elements(&self) -> Vec<SceneElement> {
        (**self).scene_elements()
    }

    fn scroll_to_content(&mut self, elements: &[SceneElement], fit: FitRequest) -> SurfaceResult<()> {
        (**self).scroll_to_content(elements, fit)
    }
}

/// Surface double that records every call.
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    pub struct RecordingSurface {
        pub frames: Vec<Vec<SceneElement>>,
        pub fits: Vec<(usize, FitRequest)>,
        pub queries: Cell<usize>,
        pub unavailable: bool,
        /// Fail the replacement with this index.
        pub fail_on_frame: Option<usize>,
    }

    impl RecordingSurface {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn last_frame(&self) -> &[SceneElement] {
            self.frames.last().map(Vec::as_slice).unwrap_or(&[])
        }
    }

    impl SceneSurface for RecordingSurface {
        fn is_available(&self) -> bool {
            !self.unavailable
        }

        fn replace_elements(&mut self, elements: Vec<SceneElement>) -> SurfaceResult<()> {
            if self.fail_on_frame == Some(self.frames.len()) {
                return Err(SurfaceError::Rejected("scripted failure".to_string()));
            }
            self.frames.push(elements);
            Ok(())
        }

        fn scene_elements(&self) -> Vec<SceneElement> {
            self.queries.set(self.queries.get() + 1);
            self.last_frame().to_vec()
        }

        fn scroll_to_content(
            &mut self,
            elements: &[SceneElement],
            fit: FitRequest,
        ) -> SurfaceResult<()> {
            self.fits.push((elements.len(), fit));
            Ok(())
        }
    }
}
