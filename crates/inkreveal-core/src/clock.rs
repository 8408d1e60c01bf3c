//! Frame clocks for driving reveal runs outside a browser.
//!
//! A browser host calls [`RevealRun::tick`] from `requestAnimationFrame`
//! directly. Native hosts and tests use a [`FrameClock`] with [`play`].

use crate::animation::{FrameStatus, RevealRun};
use crate::error::RevealResult;
use crate::surface::SceneSurface;
use std::collections::VecDeque;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::Instant;

/// Source of frame timestamps in milliseconds.
pub trait FrameClock {
    /// Wait for the next frame and return its timestamp.
    fn next_frame(&mut self) -> f64;
}

/// Monotonic millisecond timestamps relative to creation.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Real-time clock that sleeps between frames.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct ThreadClock {
    clock: MonotonicClock,
    interval: Duration,
    next_deadline: Option<Instant>,
}

#[cfg(not(target_arch = "wasm32"))]
impl ThreadClock {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            clock: MonotonicClock::new(),
            interval: Duration::from_secs_f64(interval_ms.max(0.0) / 1000.0),
            next_deadline: None,
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl FrameClock for ThreadClock {
    fn next_frame(&mut self) -> f64 {
        if let Some(deadline) = self.next_deadline {
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            }
        }
        // Late frames are not made up; the next deadline counts from now.
        self.next_deadline = Some(Instant::now() + self.interval);
        self.clock.now_ms()
    }
}

/// Deterministic clock for tests and offline rendering.
///
/// Yields the scripted timestamps first, then keeps stepping by `step`.
#[derive(Debug, Clone)]
pub struct ManualClock {
    scripted: VecDeque<f64>,
    step: f64,
    last: Option<f64>,
}

impl ManualClock {
    /// Start at `start` and advance by `step` each frame.
    pub fn stepping(start: f64, step: f64) -> Self {
        Self {
            scripted: VecDeque::from([start]),
            step,
            last: None,
        }
    }

    /// Replay `timestamps`, then continue in steps of `step`.
    pub fn scripted(timestamps: impl IntoIterator<Item = f64>, step: f64) -> Self {
        Self {
            scripted: timestamps.into_iter().collect(),
            step,
            last: None,
        }
    }
}

impl FrameClock for ManualClock {
    fn next_frame(&mut self) -> f64 {
        let next = self
            .scripted
            .pop_front()
            .unwrap_or_else(|| self.last.unwrap_or(0.0) + self.step);
        self.last = Some(next);
        next
    }
}

/// Drive `run` with `clock` until it finishes or is cancelled.
///
/// Returns the number of frames ticked.
pub fn play<S: SceneSurface, C: FrameClock>(
    run: &mut RevealRun<S>,
    clock: &mut C,
) -> RevealResult<usize> {
    let mut frames = 0;
    while run.is_running() {
        let status = run.tick(clock.next_frame())?;
        frames += 1;
        if status != FrameStatus::Continue {
            break;
        }
    }
    Ok(frames)
}
