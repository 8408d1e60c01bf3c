//! Frame-driven stroke reveal.
//!
//! [`FrameProjector`] turns an elapsed time into a complete scene snapshot and
//! holds no per-frame state, so the same elapsed time always yields the same
//! snapshot. [`RevealRun`] feeds those snapshots to a [`SceneSurface`] one
//! frame tick at a time, tracks element versions, and reports progress and
//! completion.

use crate::builder::{build_scene, BuiltScene};
use crate::config::RevealConfig;
use crate::ease::Ease;
use crate::element::{ElementKind, SceneElement, FULL_OPACITY};
use crate::error::{RevealError, RevealResult};
use crate::input::{DrawingResult, Label, Stroke};
use crate::surface::{FitRequest, SceneSurface};
use crate::timeline::Timeline;

/// Called with `(completed, total)` strokes on every frame.
pub type ProgressCallback = Box<dyn FnMut(usize, usize)>;

/// Called once when a run finishes.
pub type CompletionCallback = Box<dyn FnOnce()>;

/// Pure mapping from elapsed time to scene snapshot.
#[derive(Debug, Clone)]
pub struct FrameProjector {
    scene: BuiltScene,
    timeline: Timeline,
    ease: Ease,
}

impl FrameProjector {
    pub fn new(scene: BuiltScene, config: &RevealConfig, ease: Ease) -> Self {
        let counts: Vec<usize> = scene.normalized.iter().map(|n| n.len()).collect();
        let timeline = Timeline::compute(&counts, config);
        Self {
            scene,
            timeline,
            ease,
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn scene(&self) -> &BuiltScene {
        &self.scene
    }

    pub fn is_empty(&self) -> bool {
        self.scene.elements.is_empty()
    }

    /// Scene snapshot at `elapsed` milliseconds.
    ///
    /// Versions are copied from the built elements; [`RevealRun`] assigns
    /// frame-to-frame versions.
    pub fn project(&self, elapsed: f64) -> Vec<SceneElement> {
        let stroke_count = self.scene.stroke_count;
        let label_progress = self.timeline.label_progress(elapsed);

        self.scene
            .elements
            .iter()
            .enumerate()
            .map(|(index, base)| {
                if index < stroke_count {
                    self.project_stroke(index, base, elapsed)
                } else {
                    project_label(base, label_progress)
                }
            })
            .collect()
    }

    fn project_stroke(&self, index: usize, base: &SceneElement, elapsed: f64) -> SceneElement {
        let mut element = base.clone();
        // Strokes without a timing entry stay hidden.
        let visible = self
            .timeline
            .strokes
            .get(index)
            .and_then(|timing| timing.visible_points(elapsed, self.ease));
        match visible {
            None => element.is_deleted = true,
            Some(count) => {
                if let ElementKind::StrokeLine(line) = &base.kind {
                    element.kind = ElementKind::StrokeLine(line.prefix(count));
                }
                element.is_deleted = false;
            }
        }
        element
    }

    /// `(completed, total)` strokes at `elapsed`.
    pub fn progress(&self, elapsed: f64) -> (usize, usize) {
        (
            self.timeline.completed_strokes(elapsed),
            self.timeline.stroke_count(),
        )
    }
}

fn project_label(base: &SceneElement, progress: f64) -> SceneElement {
    let mut element = base.clone();
    element.style.opacity = (progress * FULL_OPACITY as f64).round() as u8;
    element.is_deleted = progress == 0.0;
    element
}

/// What the host should do after a frame tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Request another frame.
    Continue,
    /// The run completed; no more frames are needed.
    Finished,
    /// The run was abandoned.
    Cancelled,
}

impl FrameStatus {
    pub fn is_done(self) -> bool {
        !matches!(self, FrameStatus::Continue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Running,
    Finished,
    Cancelled,
}

/// Configures and starts a [`RevealRun`].
pub struct RevealBuilder<'a, S> {
    strokes: &'a [Stroke],
    labels: &'a [Label],
    surface: Option<S>,
    config: RevealConfig,
    ease: Ease,
    on_progress: Option<ProgressCallback>,
    on_complete: Option<CompletionCallback>,
}

impl<'a, S: SceneSurface> RevealBuilder<'a, S> {
    pub fn new(strokes: &'a [Stroke], labels: &'a [Label]) -> Self {
        Self {
            strokes,
            labels,
            surface: None,
            config: RevealConfig::default(),
            ease: Ease::default(),
            on_progress: None,
            on_complete: None,
        }
    }

    pub fn from_result(result: &'a DrawingResult) -> Self {
        Self::new(&result.strokes, &result.labels)
    }

    pub fn surface(mut self, surface: S) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn config(mut self, config: RevealConfig) -> Self {
        self.config = config;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn on_progress(mut self, callback: impl FnMut(usize, usize) + 'static) -> Self {
        self.on_progress = Some(Box::new(callback));
        self
    }

    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Validate inputs and prepare the run.
    ///
    /// Nothing is drawn until the first [`RevealRun::tick`]. With no strokes
    /// and no labels the run is finished immediately: the surface is never
    /// touched and the completion callback fires here.
    pub fn start(self) -> RevealResult<RevealRun<S>> {
        self.config.validate()?;
        let surface = self.surface.ok_or(RevealError::MissingSurface)?;
        if !surface.is_available() {
            return Err(RevealError::MissingSurface);
        }

        let scene = build_scene(self.strokes, self.labels)?;
        let projector = FrameProjector::new(scene, &self.config, self.ease);
        let timeline = projector.timeline();
        log::debug!(
            "Reveal timeline: {} strokes, stroke phase ends at {:.0}ms, total {:.0}ms",
            timeline.stroke_count(),
            timeline.stroke_end,
            timeline.total
        );

        let mut run = RevealRun {
            surface,
            previous: projector.scene().elements.clone(),
            projector,
            fit: FitRequest {
                animate: self.config.animate_fit,
                padding: self.config.fit_padding,
            },
            on_progress: self.on_progress,
            on_complete: self.on_complete,
            origin: None,
            last_elapsed: 0.0,
            frames: 0,
            state: RunState::Running,
        };

        if run.projector.is_empty() {
            log::debug!("Nothing to reveal");
            run.complete();
        }
        Ok(run)
    }
}

/// An active reveal bound to its surface.
///
/// Drive it by calling [`tick`](Self::tick) once per display frame with a
/// monotonic timestamp in milliseconds; the first tick is time zero.
pub struct RevealRun<S> {
    surface: S,
    projector: FrameProjector,
    /// Last snapshot pushed to the surface, for version tracking.
    previous: Vec<SceneElement>,
    fit: FitRequest,
    on_progress: Option<ProgressCallback>,
    on_complete: Option<CompletionCallback>,
    origin: Option<f64>,
    last_elapsed: f64,
    frames: usize,
    state: RunState,
}

impl<S: SceneSurface> RevealRun<S> {
    /// Render the frame for `timestamp` and report what to do next.
    ///
    /// Surface errors are returned as-is; the run stays active so the host
    /// can retry the frame or [`cancel`](Self::cancel).
    pub fn tick(&mut self, timestamp: f64) -> RevealResult<FrameStatus> {
        match self.state {
            RunState::Finished => return Ok(FrameStatus::Finished),
            RunState::Cancelled => return Ok(FrameStatus::Cancelled),
            RunState::Running => {}
        }

        let origin = *self.origin.get_or_insert(timestamp);
        let mut elapsed = timestamp - origin;
        if elapsed < self.last_elapsed {
            log::warn!(
                "Frame clock went backwards ({:.2}ms < {:.2}ms), holding position",
                elapsed,
                self.last_elapsed
            );
            elapsed = self.last_elapsed;
        }

        let mut snapshot = self.projector.project(elapsed);
        for (element, prev) in snapshot.iter_mut().zip(&self.previous) {
            element.version = if element.same_content(prev) {
                prev.version
            } else {
                prev.version + 1
            };
        }

        self.surface.replace_elements(snapshot.clone())?;
        self.previous = snapshot;
        self.last_elapsed = elapsed;
        self.frames += 1;

        let (completed, total) = self.projector.progress(elapsed);
        if let Some(on_progress) = self.on_progress.as_mut() {
            on_progress(completed, total);
        }
        log::trace!(
            "Frame {} at {:.1}ms: {}/{} strokes done",
            self.frames,
            elapsed,
            completed,
            total
        );

        if !self.projector.timeline().is_finished(elapsed) {
            return Ok(FrameStatus::Continue);
        }

        let elements = self.surface.scene_elements();
        if !elements.is_empty() {
            self.surface.scroll_to_content(&elements, self.fit)?;
        }
        log::debug!("Reveal finished after {} frames", self.frames);
        self.complete();
        Ok(FrameStatus::Finished)
    }

    /// Abandon the run. No further frames are drawn and completion never fires.
    pub fn cancel(&mut self) {
        if self.state == RunState::Running {
            log::debug!("Reveal cancelled after {} frames", self.frames);
            self.state = RunState::Cancelled;
            self.on_complete = None;
        }
    }

    fn complete(&mut self) {
        self.state = RunState::Finished;
        if let Some(on_complete) = self.on_complete.take() {
            on_complete();
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn is_finished(&self) -> bool {
        self.state == RunState::Finished
    }

    pub fn is_cancelled(&self) -> bool {
        self.state == RunState::Cancelled
    }

    pub fn timeline(&self) -> &Timeline {
        self.projector.timeline()
    }

    pub fn projector(&self) -> &FrameProjector {
        &self.projector
    }

    /// Elapsed time of the last rendered frame.
    pub fn elapsed(&self) -> f64 {
        self.last_elapsed
    }

    pub fn frames_rendered(&self) -> usize {
        self.frames
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
