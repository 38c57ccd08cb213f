//! Quality assessment over a produced phase list.
//!
//! Inspects the segmentation output for completeness and physiological
//! plausibility and emits a 0-100 score with human-readable issues.
//!
//! The arithmetic (100 baseline, additive penalties, floor at 0) is kept
//! exactly as tuned in production use. The weights are heuristics, not a
//! calibrated statistical model; treat them as tunable configuration.
//! This module is pure and stateless.

use crate::types::{PhaseKind, QualityReport, SwingPhase};

/// Issue string for sequences below the minimum-data threshold.
pub const INSUFFICIENT_DATA_ISSUE: &str = "Insufficient pose data for phase detection";

/// Configuration for quality assessment.
#[derive(Debug, Clone)]
pub struct QualityConfig {
    /// Frame count below which the capture is unusable. Must agree with the
    /// segmenter's minimum. Typical: 10.
    pub min_frame_count: usize,

    /// Penalty per missing canonical stage. Typical: 15.
    pub missing_phase_penalty: f32,

    /// Penalty for a load or fire phase with implausible duration.
    /// Typical: 10.
    pub duration_penalty: f32,

    /// Penalty for an implausible load-to-fire tempo ratio. Typical: 10.
    pub ratio_penalty: f32,

    /// Plausible load-phase duration range in seconds.
    pub load_duration_range_s: [f32; 2],

    /// Plausible fire-phase duration range in seconds.
    pub fire_duration_range_s: [f32; 2],

    /// Plausible load-to-fire duration ratio range.
    pub tempo_ratio_range: [f32; 2],
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            min_frame_count: 10,
            missing_phase_penalty: 15.0,
            duration_penalty: 10.0,
            ratio_penalty: 10.0,
            load_duration_range_s: [0.05, 0.5],
            fire_duration_range_s: [0.03, 0.3],
            tempo_ratio_range: [1.5, 5.0],
        }
    }
}

/// Assesses a phase list produced from a sequence of `frame_count` frames.
///
/// A capture below the minimum frame count scores 0 with a single issue;
/// everything else starts from 100 and loses points per triggered rule,
/// floored at 0. Detection confidence is the mean per-phase confidence.
pub fn assess(phases: &[SwingPhase], frame_count: usize, config: &QualityConfig) -> QualityReport {
    if frame_count < config.min_frame_count {
        return QualityReport {
            score: 0.0,
            issues: vec![INSUFFICIENT_DATA_ISSUE.to_string()],
            detection_confidence: 0.0,
        };
    }

    let mut score = 100.0;
    let mut issues = Vec::new();

    for kind in PhaseKind::CANONICAL_ORDER {
        if !phases.iter().any(|p| p.kind == kind) {
            score -= config.missing_phase_penalty;
            issues.push(format!("Missing phase: {}", kind.label()));
        }
    }

    let load = phases.iter().find(|p| p.kind == PhaseKind::Load);
    let fire = phases.iter().find(|p| p.kind == PhaseKind::Fire);

    if let Some(load) = load {
        let [lo, hi] = config.load_duration_range_s;
        if load.duration_s < lo || load.duration_s > hi {
            score -= config.duration_penalty;
            issues.push(format!(
                "Load phase duration out of range: {:.3}s",
                load.duration_s
            ));
        }
    }

    if let Some(fire) = fire {
        let [lo, hi] = config.fire_duration_range_s;
        if fire.duration_s < lo || fire.duration_s > hi {
            score -= config.duration_penalty;
            issues.push(format!(
                "Fire phase duration out of range: {:.3}s",
                fire.duration_s
            ));
        }
    }

    if let (Some(load), Some(fire)) = (load, fire) {
        if fire.duration_s > 0.0 {
            let ratio = load.duration_s / fire.duration_s;
            let [lo, hi] = config.tempo_ratio_range;
            if ratio < lo || ratio > hi {
                score -= config.ratio_penalty;
                issues.push(format!("Load-to-fire tempo ratio out of range: {:.2}", ratio));
            }
        }
    }

    let detection_confidence = if phases.is_empty() {
        0.0
    } else {
        phases.iter().map(|p| p.confidence).sum::<f32>() / phases.len() as f32
    };

    QualityReport {
        score: score.clamp(0.0, 100.0),
        issues,
        detection_confidence,
    }
}

// ============================================================================
// TESTS
// ============================================================================
