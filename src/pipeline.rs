//! Complete swing detection pipeline integrating all processing stages.
//!
//! Orchestrates the full data flow from raw landmark frames through feature
//! extraction and phase segmentation to the final [`PhaseDetectionResult`].
//!
//! # Architecture
//!
//! 1. **Feature extraction**: per-frame features plus the angular-velocity
//!    second pass
//! 2. **Phase segmentation**: six chained boundary detectors
//! 3. **Quality assessment**: completeness and plausibility scoring
//! 4. **Result assembly**: durations, ratio, transition events
//!
//! Every stage is a pure function over the previous stage's immutable
//! output; the pipeline holds configuration only, no per-run state. Callers
//! own any async orchestration and invoke this synchronously against a
//! fully materialized landmark sequence.

use tracing::info;

use crate::features::{extract_sequence, FeatureConfig};
use crate::quality::{assess, QualityConfig};
use crate::segmentation::{PhaseSegmenter, SegmenterConfig};
use crate::types::{PhaseDetectionResult, PhaseKind, PhaseTransition, PoseFrame, SwingPhase};

/// Configuration for the complete detection pipeline.
///
/// Bundles all stage configurations into a single coherent package. The
/// feature, segmenter, and quality defaults are mutually consistent (the
/// minimum-frame thresholds agree).
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Per-frame feature extraction (camera framing assumptions).
    pub features: FeatureConfig,
    /// Boundary detector thresholds and windows.
    pub segmenter: SegmenterConfig,
    /// Scoring weights and plausibility ranges.
    pub quality: QualityConfig,
}

/// Swing phase detection pipeline.
pub struct SwingPipeline {
    config: PipelineConfig,
    segmenter: PhaseSegmenter,
}

impl SwingPipeline {
    /// Creates a pipeline with the given configuration.
    pub fn new(config: PipelineConfig) -> Self {
        let segmenter = PhaseSegmenter::new(config.segmenter.clone());
        Self { config, segmenter }
    }

    /// Creates a pipeline with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(PipelineConfig::default())
    }

    /// Runs the full analysis on a landmark sequence.
    ///
    /// Never fails: degraded input surfaces as an empty or partial phase
    /// list and a low quality score, which is the intended signal path.
    pub fn analyze(&self, frames: &[PoseFrame], fps: u32) -> PhaseDetectionResult {
        let fps = fps.max(1);

        let features = extract_sequence(frames, fps, &self.config.features);
        let phases = self.segmenter.segment(&features, fps);
        let quality = assess(&phases, features.len(), &self.config.quality);

        let total_duration_s = phases.iter().map(|p| p.duration_s).sum();
        let load_to_fire_ratio = load_to_fire_ratio(&phases);
        let transitions = transitions_from(&phases, fps);

        info!(
            frames = frames.len(),
            phases = phases.len(),
            score = quality.score,
            "swing analysis complete"
        );

        PhaseDetectionResult {
            phases,
            total_duration_s,
            load_to_fire_ratio,
            transitions,
            quality,
        }
    }
}

impl Default for SwingPipeline {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Load-phase duration over fire-phase duration.
///
/// Exactly 0 when either phase is absent or the fire duration is not
/// positive; never NaN or negative.
fn load_to_fire_ratio(phases: &[SwingPhase]) -> f32 {
    let load = phases.iter().find(|p| p.kind == PhaseKind::Load);
    let fire = phases.iter().find(|p| p.kind == PhaseKind::Fire);
    match (load, fire) {
        (Some(load), Some(fire)) if fire.duration_s > 0.0 => load.duration_s / fire.duration_s,
        _ => 0.0,
    }
}

/// One transition event per phase entered, in temporal order.
fn transitions_from(phases: &[SwingPhase], fps: u32) -> Vec<PhaseTransition> {
    phases
        .iter()
        .map(|p| PhaseTransition {
            kind: p.kind,
            frame: p.start_frame,
            timestamp_s: p.start_frame as f32 / fps as f32,
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Landmark;

    fn zeroed_frames(count: usize) -> Vec<PoseFrame> {
        vec![PoseFrame::new(vec![Landmark::default(); 33]); count]
    }

    #[test]
    fn test_short_sequence_degrades_without_error() {
        let pipeline = SwingPipeline::with_defaults();
        let result = pipeline.analyze(&zeroed_frames(9), 30);

        assert!(result.phases.is_empty());
        assert_eq!(result.total_duration_s, 0.0);
        assert_eq!(result.load_to_fire_ratio, 0.0);
        assert!(result.transitions.is_empty());
        assert_eq!(result.quality.score, 0.0);
    }

    #[test]
    fn test_ratio_zero_when_phase_absent() {
        // Zeroed landmarks at minimum length produce only fallback stance
        // and stride phases, so load and fire are absent.
        let pipeline = SwingPipeline::with_defaults();
        let result = pipeline.analyze(&zeroed_frames(10), 30);

        assert!(result.phase(PhaseKind::Load).is_none());
        assert_eq!(result.load_to_fire_ratio, 0.0);
    }

    #[test]
    fn test_transitions_mirror_phase_starts() {
        let pipeline = SwingPipeline::with_defaults();
        let result = pipeline.analyze(&zeroed_frames(10), 30);

        assert_eq!(result.transitions.len(), result.phases.len());
        for (transition, phase) in result.transitions.iter().zip(&result.phases) {
            assert_eq!(transition.kind, phase.kind);
            assert_eq!(transition.frame, phase.start_frame);
            assert!((transition.timestamp_s - phase.start_frame as f32 / 30.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_zero_fps_is_clamped() {
        let pipeline = SwingPipeline::with_defaults();
        let result = pipeline.analyze(&zeroed_frames(10), 0);
        assert!(result.total_duration_s.is_finite());
    }
}
