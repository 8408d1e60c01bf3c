//! Progress easing curves.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ease {
    Linear,
    /// `t³(t(6t − 15) + 10)`: slow start and end, fastest in the middle.
    #[default]
    SmootherStep,
    OutCubic,
}

impl Ease {
    /// Remap `t` (clamped to 0..=1).
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::SmootherStep => t * t * t * (t * (6.0 * t - 15.0) + 10.0),
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}
