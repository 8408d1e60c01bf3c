//! Per-run timing: stroke durations, staggered starts and the label fade.
//!
//! All times are milliseconds relative to the first frame.

use crate::config::RevealConfig;
use crate::ease::Ease;
use serde::{Deserialize, Serialize};

/// When one stroke draws.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeTiming {
    pub start: f64,
    pub duration: f64,
    pub point_count: usize,
}

impl StrokeTiming {
    /// Elapsed time since this stroke started (negative before it starts).
    pub fn local_elapsed(&self, elapsed: f64) -> f64 {
        elapsed - self.start
    }

    /// True once the stroke has started drawing.
    pub fn has_started(&self, elapsed: f64) -> bool {
        self.local_elapsed(elapsed) > 0.0
    }

    /// True once the stroke has run for its full duration.
    pub fn is_complete(&self, elapsed: f64) -> bool {
        self.local_elapsed(elapsed) >= self.duration
    }

    /// Linear progress in 0..=1.
    pub fn raw_progress(&self, elapsed: f64) -> f64 {
        if self.duration <= 0.0 {
            return if self.has_started(elapsed) { 1.0 } else { 0.0 };
        }
        (self.local_elapsed(elapsed) / self.duration).clamp(0.0, 1.0)
    }

    /// Number of points to show, or `None` before the stroke starts.
    ///
    /// Never below two (a lone point is degenerate) unless the stroke
    /// itself is shorter.
    pub fn visible_points(&self, elapsed: f64, ease: Ease) -> Option<usize> {
        if !self.has_started(elapsed) {
            return None;
        }
        let eased = ease.apply(self.raw_progress(elapsed));
        let count = (eased * self.point_count as f64).floor() as usize;
        Some(count.max(2).min(self.point_count))
    }
}

/// Timing for an entire reveal run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub strokes: Vec<StrokeTiming>,
    /// When the stroke phase is visually done and labels start fading in.
    pub stroke_end: f64,
    pub label_fade: f64,
    /// `stroke_end + label_fade`.
    pub total: f64,
}

impl Timeline {
    /// Compute the timeline for strokes with the given point counts.
    pub fn compute(point_counts: &[usize], config: &RevealConfig) -> Self {
        let mut strokes = Vec::with_capacity(point_counts.len());
        let mut start = 0.0;
        for &point_count in point_counts {
            let duration = stroke_duration(point_count, config);
            strokes.push(StrokeTiming {
                start,
                duration,
                point_count,
            });
            start += duration * config.stagger_fraction;
        }

        let stroke_end = strokes
            .last()
            .map(|last| last.start + last.duration * (1.0 - config.stagger_fraction))
            .unwrap_or(0.0);
        let label_fade = config.label_fade_ms;

        Self {
            strokes,
            stroke_end,
            label_fade,
            total: stroke_end + label_fade,
        }
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// Label fade progress in 0..=1.
    pub fn label_progress(&self, elapsed: f64) -> f64 {
        if self.label_fade <= 0.0 {
            return if elapsed >= self.stroke_end { 1.0 } else { 0.0 };
        }
        ((elapsed - self.stroke_end) / self.label_fade).clamp(0.0, 1.0)
    }

    /// Number of strokes that have run for their full duration.
    pub fn completed_strokes(&self, elapsed: f64) -> usize {
        self.strokes.iter().filter(|s| s.is_complete(elapsed)).count()
    }

    /// True once `elapsed` has reached the end of the run.
    pub fn is_finished(&self, elapsed: f64) -> bool {
        elapsed >= self.total
    }
}

/// `clamp(point_count * ms_per_point, min, max)`.
pub fn stroke_duration(point_count: usize, config: &RevealConfig) -> f64 {
    (point_count as f64 * config.ms_per_point).clamp(config.min_stroke_ms, config.max_stroke_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn timeline(counts: &[usize]) -> Timeline {
        Timeline::compute(counts, &RevealConfig::default())
    }

    #[test]
    fn test_duration_clamp() {
        let config = RevealConfig::default();
        assert!((stroke_duration(1, &config) - 300.0).abs() < EPS);
        assert!((stroke_duration(10, &config) - 300.0).abs() < EPS);
        assert!((stroke_duration(20, &config) - 600.0).abs() < EPS);
        assert!((stroke_duration(67, &config) - 2000.0).abs() < EPS);
        assert!((stroke_duration(500, &config) - 2000.0).abs() < EPS);
    }

    #[test]
    fn test_stagger() {
        let t = timeline(&[10, 20, 100, 5]);
        assert!(t.strokes[0].start.abs() < EPS);
        for pair in t.strokes.windows(2) {
            assert!((pair[1].start - (pair[0].start + 0.3 * pair[0].duration)).abs() < EPS);
        }
        assert!((t.strokes[1].start - 90.0).abs() < EPS);
        assert!((t.strokes[2].start - 270.0).abs() < EPS);
        assert!((t.strokes[3].start - 870.0).abs() < EPS);
    }

    #[test]
    fn test_single_stroke_scenario() {
        let t = timeline(&[10]);
        assert!((t.strokes[0].duration - 300.0).abs() < EPS);
        assert!((t.stroke_end - 210.0).abs() < EPS);
        assert!((t.total - 610.0).abs() < EPS);
        assert_eq!(t.strokes[0].visible_points(150.0, Ease::SmootherStep), Some(5));
    }

    #[test]
    fn test_no_strokes() {
        let t = timeline(&[]);
        assert!(t.stroke_end.abs() < EPS);
        assert!((t.total - 400.0).abs() < EPS);
        assert_eq!(t.completed_strokes(1000.0), 0);
    }

    #[test]
    fn test_visibility_flips_at_start() {
        let t = timeline(&[10, 10]);
        let second = t.strokes[1];
        assert_eq!(second.visible_points(0.0, Ease::SmootherStep), None);
        assert_eq!(second.visible_points(90.0, Ease::SmootherStep), None);
        assert_eq!(second.visible_points(90.001, Ease::SmootherStep), Some(2));
    }

    #[test]
    fn test_visible_points_monotonic_and_complete() {
        let t = timeline(&[37]);
        let stroke = t.strokes[0];
        let mut prev = 0;
        let mut elapsed = 0.5;
        while elapsed <= stroke.duration + 50.0 {
            let count = stroke.visible_points(elapsed, Ease::SmootherStep).unwrap();
            assert!(count >= 2);
            assert!(count >= prev);
            prev = count;
            elapsed += 7.3;
        }
        assert_eq!(stroke.visible_points(stroke.duration, Ease::SmootherStep), Some(37));
    }

    #[test]
    fn test_single_point_stroke() {
        let t = timeline(&[1]);
        assert_eq!(t.strokes[0].visible_points(10.0, Ease::SmootherStep), Some(1));
    }

    #[test]
    fn test_label_progress() {
        let t = timeline(&[10]);
        assert!(t.label_progress(100.0).abs() < EPS);
        assert!(t.label_progress(210.0).abs() < EPS);
        assert!((t.label_progress(410.0) - 0.5).abs() < EPS);
        assert!((t.label_progress(610.0) - 1.0).abs() < EPS);
        assert!((t.label_progress(9999.0) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_completed_strokes() {
        let t = timeline(&[10, 10]);
        assert_eq!(t.completed_strokes(299.0), 0);
        assert_eq!(t.completed_strokes(300.0), 1);
        assert_eq!(t.completed_strokes(390.0), 2);
    }

    #[test]
    fn test_custom_config() {
        let config = RevealConfig {
            stagger_fraction: 0.5,
            label_fade_ms: 100.0,
            ..RevealConfig::default()
        };
        let t = Timeline::compute(&[10, 10], &config);
        assert!((t.strokes[1].start - 150.0).abs() < EPS);
        assert!((t.stroke_end - 300.0).abs() < EPS);
        assert!((t.total - 400.0).abs() < EPS);
    }
}
