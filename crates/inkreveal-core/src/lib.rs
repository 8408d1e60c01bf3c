//! InkReveal Core Library
//!
//! Turns agent-generated pen strokes and labels into a progressive,
//! hand-drawn reveal: elements are built once, then every display frame
//! projects a complete scene snapshot from elapsed time and hands it to a
//! rendering surface.

pub mod animation;
pub mod builder;
pub mod camera;
pub mod canvas;
pub mod clock;
pub mod config;
pub mod ease;
pub mod element;
pub mod error;
pub mod input;
pub mod session;
pub mod surface;
pub mod timeline;

pub use animation::{FrameProjector, FrameStatus, RevealBuilder, RevealRun};
pub use builder::{build_scene, BuiltScene, NormalizedStroke};
pub use camera::{Camera, CameraTransition};
pub use canvas::{CanvasConfig, DrawItem, SceneCanvas};
pub use clock::{play, FrameClock, ManualClock, MonotonicClock};
#[cfg(not(target_arch = "wasm32"))]
pub use clock::ThreadClock;
pub use config::RevealConfig;
pub use ease::Ease;
pub use element::{ElementKind, ElementStyle, SceneElement, SerializableColor};
pub use error::{RevealError, RevealResult};
pub use input::{DrawingResult, Label, Stroke};
pub use session::RevealSession;
pub use surface::{FitRequest, SceneSurface, SurfaceError, SurfaceResult};
pub use timeline::{StrokeTiming, Timeline};
