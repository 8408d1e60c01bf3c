//! One-run-at-a-time guard for hosts that start reveals on demand.

use crate::animation::{FrameStatus, RevealBuilder, RevealRun};
use crate::error::{RevealError, RevealResult};
use crate::surface::SceneSurface;

/// Holds at most one active reveal so two runs never write the same surface.
pub struct RevealSession<S> {
    active: Option<RevealRun<S>>,
}

impl<S> Default for RevealSession<S> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<S: SceneSurface> RevealSession<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a run is still drawing.
    pub fn is_busy(&self) -> bool {
        self.active.as_ref().is_some_and(RevealRun::is_running)
    }

    /// Start a new run, or fail with [`RevealError::Busy`] if one is active.
    pub fn start(&mut self, builder: RevealBuilder<'_, S>) -> RevealResult<()> {
        if self.is_busy() {
            return Err(RevealError::Busy);
        }
        let run = builder.start()?;
        self.active = run.is_running().then_some(run);
        Ok(())
    }

    /// Tick the active run. Idle sessions report [`FrameStatus::Finished`].
    ///
    /// The run is released once it finishes.
    pub fn tick(&mut self, timestamp: f64) -> RevealResult<FrameStatus> {
        let Some(run) = self.active.as_mut() else {
            return Ok(FrameStatus::Finished);
        };
        let status = run.tick(timestamp)?;
        if status.is_done() {
            self.active = None;
        }
        Ok(status)
    }

    /// Cancel and release the active run, if any.
    pub fn cancel(&mut self) {
        if let Some(mut run) = self.active.take() {
            run.cancel();
        }
    }

    pub fn active(&self) -> Option<&RevealRun<S>> {
        self.active.as_ref()
    }
}
