//! Swing phase segmentation.
//!
//! Partitions a feature sequence into the six canonical swing stages
//! (stance, load, stride, fire, contact, follow-through) using local
//! boundary heuristics in strict temporal order.
//!
//! Design: chained boundary detectors, not global optimization
//! - Frame 0 always starts the stance phase
//! - Each detector searches only at or after the previous boundary, within
//!   a fixed look-ahead window
//! - Every detector has a defined fallback when its rule never triggers
//! - A phase is appended only when its end strictly exceeds its start;
//!   otherwise it is skipped, and the absence becomes a quality signal
//!
//! Why this matters:
//! A swing is a fixed biomechanical sequence. Searching for each boundary
//! inside a narrow window after the previous one keeps the detectors cheap,
//! local, and robust to noise outside their window.

use tracing::debug;

use crate::types::{FrameFeature, PhaseKind, SwingPhase};

/// Configuration for phase segmentation.
///
/// The thresholds encode assumptions about camera framing and capture
/// conditions; tune them per setup rather than editing detector code.
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    /// Minimum frames required to attempt segmentation. Shorter sequences
    /// yield an empty phase list. Typical: 10.
    pub min_frames: usize,

    /// Normalized COM-x displacement from frame 0 that ends the stance
    /// phase. Typical: 0.02.
    pub com_shift_threshold: f32,

    /// First frame considered by the stance-end scan (the first frames are
    /// tracker warm-up). Typical: 3.
    pub stance_scan_start: usize,

    /// Stance-end fallback frame when the COM never shifts. Typical: 5.
    pub stance_fallback_end: usize,

    /// Look-ahead window (frames) for the backward-most COM after load
    /// start. Typical: 20.
    pub load_search_window: usize,

    /// Look-ahead window (frames) for front-foot contact after stride
    /// start. Typical: 15.
    pub stride_search_window: usize,

    /// Stride-end fallback offset (frames) when contact is never seen.
    /// Typical: 8.
    pub stride_fallback_offset: usize,

    /// Look-ahead window (frames) for peak hip angular velocity after fire
    /// start. Typical: 10.
    pub fire_search_window: usize,

    /// Look-ahead window (frames) for maximum forward hand extension after
    /// contact start. Typical: 8.
    pub contact_search_window: usize,

    /// Fixed per-stage detector reliability constants.
    pub confidence: PhaseConfidence,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            min_frames: 10,
            com_shift_threshold: 0.02,
            stance_scan_start: 3,
            stance_fallback_end: 5,
            load_search_window: 20,
            stride_search_window: 15,
            stride_fallback_offset: 8,
            fire_search_window: 10,
            contact_search_window: 8,
            confidence: PhaseConfidence::default(),
        }
    }
}

/// Per-stage confidence constants in [0.75, 0.9].
///
/// These reflect each heuristic's known reliability, not a statistically
/// calibrated probability. The COM-shift and rest-of-sequence detectors are
/// the most dependable; the velocity- and extension-peak detectors the
/// least.
#[derive(Debug, Clone)]
pub struct PhaseConfidence {
    pub stance: f32,
    pub load: f32,
    pub stride: f32,
    pub fire: f32,
    pub contact: f32,
    pub follow_through: f32,
}

impl Default for PhaseConfidence {
    fn default() -> Self {
        Self {
            stance: 0.9,
            load: 0.8,
            stride: 0.85,
            fire: 0.75,
            contact: 0.75,
            follow_through: 0.9,
        }
    }
}

impl PhaseConfidence {
    /// Confidence constant for a stage.
    pub fn for_kind(&self, kind: PhaseKind) -> f32 {
        match kind {
            PhaseKind::Stance => self.stance,
            PhaseKind::Load => self.load,
            PhaseKind::Stride => self.stride,
            PhaseKind::Fire => self.fire,
            PhaseKind::Contact => self.contact,
            PhaseKind::FollowThrough => self.follow_through,
        }
    }
}

/// Phase segmenter over a completed feature sequence.
pub struct PhaseSegmenter {
    config: SegmenterConfig,
}

impl PhaseSegmenter {
    /// Creates a segmenter with the given configuration.
    pub fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    /// Creates a segmenter with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SegmenterConfig::default())
    }

    /// Segments a feature sequence into ordered swing phases.
    ///
    /// Returns an empty list for sequences below the minimum-data threshold;
    /// this is a defined degradation, not an error. The returned list is
    /// contiguous, canonically ordered, and may omit stages whose boundary
    /// collapsed onto the previous one.
    pub fn segment(&self, features: &[FrameFeature], fps: u32) -> Vec<SwingPhase> {
        let len = features.len();
        if len < self.config.min_frames {
            debug!(frames = len, min = self.config.min_frames, "sequence below minimum, no phases");
            return Vec::new();
        }

        let fps = fps.max(1);

        let load_start = self.detect_load_start(features);
        let stride_start = self.detect_stride_start(features, load_start);
        let fire_start = self.detect_fire_start(features, stride_start);
        let contact_start = self.detect_contact_start(features, fire_start);
        let follow_start = self.detect_follow_start(features, contact_start);
        let sequence_end = len - 1;

        let boundaries = [
            (PhaseKind::Stance, 0, load_start),
            (PhaseKind::Load, load_start, stride_start),
            (PhaseKind::Stride, stride_start, fire_start),
            (PhaseKind::Fire, fire_start, contact_start),
            (PhaseKind::Contact, contact_start, follow_start),
            (PhaseKind::FollowThrough, follow_start, sequence_end),
        ];

        let mut phases = Vec::with_capacity(boundaries.len());
        for (kind, start, end) in boundaries {
            if end <= start {
                debug!(kind = kind.label(), start, end, "zero-length stage skipped");
                continue;
            }
            phases.push(self.build_phase(kind, start, end, features, fps));
        }
        phases
    }

    /// Stance ends at the first frame whose COM-x has shifted more than the
    /// threshold from frame 0. Fallback: min(stance_fallback_end, len).
    fn detect_load_start(&self, features: &[FrameFeature]) -> usize {
        let origin = features[0].com_x;
        for (i, feature) in features.iter().enumerate().skip(self.config.stance_scan_start) {
            if (feature.com_x - origin).abs() > self.config.com_shift_threshold {
                debug!(frame = i, "stance end: COM shift exceeded threshold");
                return i;
            }
        }
        let fallback = self.config.stance_fallback_end.min(features.len());
        debug!(frame = fallback, "stance end: COM never shifted, using fallback");
        fallback
    }

    /// Load ends at the backward-most COM-x (the deepest weight shift)
    /// within the look-ahead window. The degenerate case is the start frame
    /// itself, which collapses the load phase.
    fn detect_stride_start(&self, features: &[FrameFeature], start: usize) -> usize {
        let end = (start + self.config.load_search_window).min(features.len());
        let mut best = start;
        let mut best_x = f32::INFINITY;
        for i in start..end {
            if features[i].com_x < best_x {
                best = i;
                best_x = features[i].com_x;
            }
        }
        debug!(frame = best, "load end: backward-most COM");
        best
    }

    /// Stride ends at the first front-foot contact within the look-ahead
    /// window. Fallback: min(start + stride_fallback_offset, len).
    fn detect_fire_start(&self, features: &[FrameFeature], start: usize) -> usize {
        let end = (start + self.config.stride_search_window).min(features.len());
        for i in start..end {
            if features[i].front_foot_contact {
                debug!(frame = i, "stride end: front foot planted");
                return i;
            }
        }
        let fallback = (start + self.config.stride_fallback_offset).min(features.len());
        debug!(frame = fallback, "stride end: no foot contact seen, using fallback");
        fallback
    }

    /// Fire ends at the peak hip angular velocity within the look-ahead
    /// window; the start frame itself when no larger velocity is found.
    fn detect_contact_start(&self, features: &[FrameFeature], start: usize) -> usize {
        let end = (start + self.config.fire_search_window).min(features.len());
        let mut best = start;
        let mut best_velocity = f32::NEG_INFINITY;
        for i in start..end {
            if features[i].hip_velocity_dps > best_velocity {
                best = i;
                best_velocity = features[i].hip_velocity_dps;
            }
        }
        debug!(frame = best, "fire end: peak hip angular velocity");
        best
    }

    /// Contact ends at the maximum forward hand extension (hand-x) within
    /// the look-ahead window; the start frame itself otherwise.
    fn detect_follow_start(&self, features: &[FrameFeature], start: usize) -> usize {
        let end = (start + self.config.contact_search_window).min(features.len());
        let mut best = start;
        let mut best_x = f32::NEG_INFINITY;
        for i in start..end {
            if features[i].hand_x > best_x {
                best = i;
                best_x = features[i].hand_x;
            }
        }
        debug!(frame = best, "contact end: maximum hand extension");
        best
    }

    fn build_phase(
        &self,
        kind: PhaseKind,
        start: usize,
        end: usize,
        features: &[FrameFeature],
        fps: u32,
    ) -> SwingPhase {
        // A fallback boundary may land one past the final frame; snapshot
        // the last real frame in that case.
        let snapshot = &features[end.min(features.len() - 1)];

        SwingPhase {
            kind,
            start_frame: start,
            end_frame: end,
            duration_s: (end - start) as f32 / fps as f32,
            key_events: key_events_for(kind),
            com_at_end: Some([snapshot.com_x, snapshot.com_y]),
            confidence: self.config.confidence.for_kind(kind),
        }
    }
}

impl Default for PhaseSegmenter {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Descriptive key-event labels per stage. Free text for reports; no
/// semantic contract.
fn key_events_for(kind: PhaseKind) -> Vec<String> {
    let labels: &[&str] = match kind {
        PhaseKind::Stance => &["Athletic setup", "Weight balanced over both feet"],
        PhaseKind::Load => &["Weight shift onto back leg", "Hands load rearward"],
        PhaseKind::Stride => &["Front foot strides toward pitcher", "Hips begin forward drive"],
        PhaseKind::Fire => &["Hip rotation accelerates", "Pelvis reaches peak angular velocity"],
        PhaseKind::Contact => &["Barrel enters the hitting zone", "Maximum forward hand extension"],
        PhaseKind::FollowThrough => &["Deceleration through the finish", "Balance held after release"],
    };
    labels.iter().map(|l| l.to_string()).collect()
}

// ============================================================================
// TESTS
// ============================================================================
