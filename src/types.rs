//! Core data types for the Swing Kinetics Engine.
//!
//! This module defines the fundamental types and structures used throughout
//! the swing analysis pipeline: raw pose input, per-frame features, phase
//! records, the pipeline result artifact, and the tempo validation types.
//!
//! Design principle: Types should make intent obvious. If a concept exists,
//! it gets a type. Never pass raw tuples or untyped collections across
//! boundaries.
//!
//! Output types derive `Serialize` so downstream reporting collaborators can
//! consume results directly; the crate itself defines no persistence format.

use serde::{Deserialize, Serialize};

use crate::landmarks::POSE_LANDMARK_COUNT;

/// A single body-pose landmark in normalized image coordinates.
///
/// x and y are normalized to [0, 1] over the image plane (y grows downward,
/// the convention of the upstream pose tracker). z is a relative depth value
/// and defaults to 0 for trackers that emit 2D points only.
///
/// Design note: We use f32 throughout. Landmark trackers emit single
/// precision and phase segmentation does not benefit from more.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    /// Relative depth, unused by the 2D heuristics but preserved for export.
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    /// Creates a 2D landmark with zero depth.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Creates a landmark with an explicit depth value.
    pub fn with_depth(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// One frame's landmark set as delivered by the pose tracker.
///
/// The contract is a fixed-index collection following the standard 33-point
/// body layout (see [`crate::landmarks`]). A frame holding fewer points is a
/// degraded capture: the feature extractor maps it to a zeroed feature
/// record rather than erroring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoseFrame {
    pub landmarks: Vec<Landmark>,
}

impl PoseFrame {
    /// Creates a pose frame from a landmark list.
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    /// Creates a frame with no landmarks (total tracking loss).
    pub fn empty() -> Self {
        Self { landmarks: Vec::new() }
    }

    /// True when the frame carries the full 33-point layout.
    pub fn is_complete(&self) -> bool {
        self.landmarks.len() >= POSE_LANDMARK_COUNT
    }

    /// Landmark at a layout index, if present.
    pub fn get(&self, index: usize) -> Option<Landmark> {
        self.landmarks.get(index).copied()
    }
}

/// Derived features for a single frame, one per input frame.
///
/// Created by the first extraction pass; the hip angular velocity field is
/// filled by a second pass over the complete sequence (it needs the previous
/// frame's hip rotation). Immutable once the second pass has run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameFeature {
    /// Index of the frame within the capture sequence.
    pub frame_index: usize,
    /// Timestamp in seconds (= index / fps).
    pub timestamp_s: f32,
    /// Signed hip-line rotation angle in degrees, range (-180, 180].
    pub hip_rotation_deg: f32,
    /// Signed shoulder-line rotation angle in degrees.
    pub shoulder_rotation_deg: f32,
    /// Front-knee flex angle in degrees, [0, 180].
    pub front_knee_flex_deg: f32,
    /// Back-knee flex angle in degrees, [0, 180].
    pub back_knee_flex_deg: f32,
    /// Center-of-mass x (hip-midpoint approximation, normalized).
    pub com_x: f32,
    /// Center-of-mass y (hip-midpoint approximation, normalized).
    pub com_y: f32,
    /// Hand position x (wrist midpoint, normalized).
    pub hand_x: f32,
    /// Hand position y (wrist midpoint, normalized).
    pub hand_y: f32,
    /// Front-foot ground contact flag (ankle-height heuristic).
    pub front_foot_contact: bool,
    /// Hip angular velocity in degrees/second. Zero until the second pass;
    /// index 0 stays zero by definition.
    pub hip_velocity_dps: f32,
}

impl FrameFeature {
    /// Degraded-capture fallback: every measured field zeroed, contact false.
    ///
    /// Frame identity (index and timestamp) is preserved so the sequence
    /// stays temporally aligned.
    pub fn zeroed(frame_index: usize, timestamp_s: f32) -> Self {
        Self {
            frame_index,
            timestamp_s,
            hip_rotation_deg: 0.0,
            shoulder_rotation_deg: 0.0,
            front_knee_flex_deg: 0.0,
            back_knee_flex_deg: 0.0,
            com_x: 0.0,
            com_y: 0.0,
            hand_x: 0.0,
            hand_y: 0.0,
            front_foot_contact: false,
            hip_velocity_dps: 0.0,
        }
    }
}

// ============================================================================
// PHASE TYPES
// ============================================================================

/// The six canonical swing stages, totally ordered in time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    /// Athletic setup before any deliberate movement.
    Stance,
    /// Backward weight shift onto the rear leg.
    Load,
    /// Front-foot stride toward the pitcher.
    Stride,
    /// Rotational acceleration of hips and torso.
    Fire,
    /// Bat-ball contact window.
    Contact,
    /// Deceleration and finish.
    FollowThrough,
}

impl PhaseKind {
    /// All kinds in canonical temporal order.
    pub const CANONICAL_ORDER: [PhaseKind; 6] = [
        PhaseKind::Stance,
        PhaseKind::Load,
        PhaseKind::Stride,
        PhaseKind::Fire,
        PhaseKind::Contact,
        PhaseKind::FollowThrough,
    ];

    /// Stable lowercase label for issues and logs.
    pub fn label(&self) -> &'static str {
        match self {
            PhaseKind::Stance => "stance",
            PhaseKind::Load => "load",
            PhaseKind::Stride => "stride",
            PhaseKind::Fire => "fire",
            PhaseKind::Contact => "contact",
            PhaseKind::FollowThrough => "follow_through",
        }
    }
}

/// A maximal contiguous span of frames assigned one swing stage.
///
/// Invariant: `start_frame < end_frame`, and in a produced phase list the
/// end of phase *i* equals the start of phase *i+1* (phases are contiguous
/// and cover a prefix of the sequence starting at frame 0).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwingPhase {
    pub kind: PhaseKind,
    /// First frame of the phase (inclusive).
    pub start_frame: usize,
    /// Last frame boundary of the phase (exclusive; equals the next
    /// phase's start frame).
    pub end_frame: usize,
    /// Duration in seconds (= (end - start) / fps).
    pub duration_s: f32,
    /// Descriptive key-event labels. Free text, no semantic contract.
    pub key_events: Vec<String>,
    /// Center-of-mass snapshot at the phase's ending frame, if available.
    pub com_at_end: Option<[f32; 2]>,
    /// Fixed per-kind detector reliability in [0.75, 0.9]. A heuristic
    /// constant, not a calibrated probability.
    pub confidence: f32,
}

impl SwingPhase {
    /// Frame count covered by this phase.
    pub fn frame_span(&self) -> usize {
        self.end_frame - self.start_frame
    }
}

/// A phase entry event derived from the produced phase list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseTransition {
    /// The stage being entered.
    pub kind: PhaseKind,
    /// Frame at which the stage begins.
    pub frame: usize,
    /// Timestamp in seconds of that frame.
    pub timestamp_s: f32,
}

/// Quality verdict over a produced phase list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    /// 0-100 score: 100 baseline minus additive penalties, floored at 0.
    pub score: f32,
    /// Human-readable issues, one per triggered rule.
    pub issues: Vec<String>,
    /// Mean per-phase confidence; 0 when no phases were produced.
    pub detection_confidence: f32,
}

/// The sole output artifact of the detection pipeline. Immutable once
/// produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseDetectionResult {
    /// Ordered phase list. Not guaranteed to hold all six stages; absence
    /// of a stage is a quality signal, not an error.
    pub phases: Vec<SwingPhase>,
    /// Sum of phase durations in seconds.
    pub total_duration_s: f32,
    /// Load-phase duration over fire-phase duration. Exactly 0 when either
    /// phase is absent; never negative or NaN.
    pub load_to_fire_ratio: f32,
    /// One entry per phase entered, in temporal order.
    pub transitions: Vec<PhaseTransition>,
    /// Quality verdict for this run.
    pub quality: QualityReport,
}

impl PhaseDetectionResult {
    /// Look up a phase by kind.
    pub fn phase(&self, kind: PhaseKind) -> Option<&SwingPhase> {
        self.phases.iter().find(|p| p.kind == kind)
    }

    /// True when all six canonical stages were detected.
    pub fn is_complete(&self) -> bool {
        PhaseKind::CANONICAL_ORDER
            .iter()
            .all(|kind| self.phase(*kind).is_some())
    }
}

// ============================================================================
// TEMPO VALIDATION TYPES
// ============================================================================

/// Externally supplied phase-boundary timestamps for tempo validation.
///
/// All offsets are in milliseconds measured backward from ball contact,
/// so contact is 0 by definition and earlier events carry larger values.
/// Expected ordering: `load_start_ms > fire_start_ms > contact_ms`.
///
/// This representation is independent of the detection pipeline; it is
/// typically extracted from a third-party biomechanics report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseMarkers {
    /// Start of the load phase, ms before contact.
    pub load_start_ms: f32,
    /// Start of the fire phase, ms before contact.
    pub fire_start_ms: f32,
    /// Ball contact. Always 0 by definition.
    pub contact_ms: f32,
    /// Peak pelvis rotation velocity, ms before contact.
    pub pelvis_peak_ms: f32,
}

impl PhaseMarkers {
    /// Creates markers with contact pinned to 0.
    pub fn new(load_start_ms: f32, fire_start_ms: f32, pelvis_peak_ms: f32) -> Self {
        Self {
            load_start_ms,
            fire_start_ms,
            contact_ms: 0.0,
            pelvis_peak_ms,
        }
    }

    /// Fire-phase duration: fire start to contact.
    pub fn fire_duration_ms(&self) -> f32 {
        self.fire_start_ms - self.contact_ms
    }

    /// Load-phase duration: load start to fire start.
    pub fn load_duration_ms(&self) -> f32 {
        self.load_start_ms - self.fire_start_ms
    }

    /// Tempo ratio: total load-to-contact time over fire time
    /// (= load_start / fire_start). Guarded: 0 when fire start is not
    /// positive, never NaN.
    pub fn tempo_ratio(&self) -> f32 {
        if self.fire_start_ms <= 0.0 {
            return 0.0;
        }
        self.load_start_ms / self.fire_start_ms
    }

    /// Gap between fire start and pelvis rotation peak.
    pub fn pelvis_gap_ms(&self) -> f32 {
        self.fire_start_ms - self.pelvis_peak_ms
    }
}

/// Severity tier of a validation check result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckSeverity {
    /// A hard physiological bound was violated.
    Critical,
    /// Outside the expected range but physiologically possible.
    Warning,
    /// Informational; no action required.
    Info,
}

/// A single named validation check with its verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    /// Stable check identifier.
    pub name: &'static str,
    /// Description of the expected value or range.
    pub expected: String,
    /// The observed value, formatted.
    pub actual: String,
    pub passed: bool,
    pub severity: CheckSeverity,
}

impl CheckResult {
    /// True for a failed check of the given tier.
    pub fn failed_at(&self, severity: CheckSeverity) -> bool {
        !self.passed && self.severity == severity
    }
}

/// Aggregated validation verdict for one set of markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    /// Ground-truth profile the markers were validated against, or
    /// "generic" when only hard bounds applied.
    pub player: String,
    /// All checks in fixed execution order.
    pub checks: Vec<CheckResult>,
    /// Fixed policy: no critical failures and at most two warning failures.
    pub overall_pass: bool,
    /// 0-100: pass-rate minus weighted failure penalties, clamped.
    pub score: f32,
}

impl ValidationResult {
    /// Count of failed checks at a severity tier.
    pub fn failures_at(&self, severity: CheckSeverity) -> usize {
        self.checks.iter().filter(|c| c.failed_at(severity)).count()
    }
}

// ============================================================================
// TESTS
// ============================================================================
