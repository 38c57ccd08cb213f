//! Integration tests for the complete swing detection pipeline.
//!
//! Runs realistic synthetic swing clips end-to-end to validate pipeline
//! behavior, degradation paths, and design guarantees.

use crate::ground_truth;
use crate::pipeline::SwingPipeline;
use crate::quality::INSUFFICIENT_DATA_ISSUE;
use crate::tempo;
use crate::types::{Landmark, PhaseKind, PhaseMarkers, PoseFrame};

use crate::landmarks::{
    LEFT_ANKLE, LEFT_HIP, LEFT_KNEE, LEFT_SHOULDER, LEFT_WRIST, POSE_LANDMARK_COUNT, RIGHT_ANKLE,
    RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER, RIGHT_WRIST,
};

/// Helper: one 33-landmark frame with hips placed to produce the given COM
/// x and hip-line rotation, plus controllable front ankle and hand columns.
fn swing_frame(com_x: f32, hip_deg: f32, front_ankle_y: f32, hand_x: f32) -> PoseFrame {
    let mut landmarks = vec![Landmark::new(com_x, 0.5); POSE_LANDMARK_COUNT];
    let (hip_y, half_width) = (0.55, 0.06);
    let theta = hip_deg.to_radians();
    landmarks[LEFT_HIP] =
        Landmark::new(com_x - half_width * theta.cos(), hip_y - half_width * theta.sin());
    landmarks[RIGHT_HIP] =
        Landmark::new(com_x + half_width * theta.cos(), hip_y + half_width * theta.sin());
    landmarks[LEFT_SHOULDER] = Landmark::new(com_x - 0.07, 0.35);
    landmarks[RIGHT_SHOULDER] = Landmark::new(com_x + 0.07, 0.35);
    landmarks[LEFT_WRIST] = Landmark::new(hand_x, 0.40);
    landmarks[RIGHT_WRIST] = Landmark::new(hand_x, 0.42);
    landmarks[LEFT_KNEE] = Landmark::new(com_x - 0.05, 0.72);
    landmarks[RIGHT_KNEE] = Landmark::new(com_x + 0.05, 0.72);
    landmarks[LEFT_ANKLE] = Landmark::new(com_x - 0.05, front_ankle_y);
    landmarks[RIGHT_ANKLE] = Landmark::new(com_x + 0.05, 0.90);
    PoseFrame::new(landmarks)
}

/// Helper: a 36-frame right-handed swing at 30 fps.
///
/// Stance through frame 5, backward weight shift bottoming out at frame 14,
/// front foot planted at 18, peak hip angular velocity at 22, maximum hand
/// extension at 25, finish to frame 35.
fn full_swing_profile() -> Vec<PoseFrame> {
    (0..36)
        .map(|i: i32| {
            let com_x = match i {
                0..=4 => 0.50,
                5 => 0.485,
                6..=14 => 0.47 - 0.01 * (i - 6) as f32,
                _ => (0.39 + 0.012 * (i - 14) as f32).min(0.55),
            };
            let hip_deg = match i {
                0..=17 => 0.0,
                18 => 6.0,
                19 => 14.0,
                20 => 26.0,
                21 => 44.0,
                22 => 70.0,
                23 => 88.0,
                24 => 98.0,
                25 => 104.0,
                _ => 104.0 + 4.0 * (i - 25) as f32,
            };
            let ankle_y = if i < 18 { 0.50 } else { 0.86 };
            let hand_x = match i {
                0..=21 => 0.45,
                22 => 0.55,
                23 => 0.63,
                24 => 0.70,
                25 => 0.74,
                26 => 0.71,
                27 => 0.68,
                _ => 0.66,
            };
            swing_frame(com_x, hip_deg, ankle_y, hand_x)
        })
        .collect()
}

/// Helper: frames with a complete but all-zero landmark layout (total
/// tracking loss with the tracker still emitting points).
fn zeroed_frames(count: usize) -> Vec<PoseFrame> {
    vec![PoseFrame::new(vec![Landmark::default(); POSE_LANDMARK_COUNT]); count]
}

#[test]
fn test_full_swing_detects_all_six_phases() {
    let pipeline = SwingPipeline::with_defaults();
    let result = pipeline.analyze(&full_swing_profile(), 30);

    let kinds: Vec<PhaseKind> = result.phases.iter().map(|p| p.kind).collect();
    assert_eq!(kinds, PhaseKind::CANONICAL_ORDER.to_vec(), "all six stages expected");
    assert!(result.is_complete());

    let bounds: Vec<(usize, usize)> = result
        .phases
        .iter()
        .map(|p| (p.start_frame, p.end_frame))
        .collect();
    assert_eq!(
        bounds,
        vec![(0, 6), (6, 14), (14, 18), (18, 22), (22, 25), (25, 35)]
    );
}

#[test]
fn test_full_swing_phase_invariants() {
    let pipeline = SwingPipeline::with_defaults();
    let result = pipeline.analyze(&full_swing_profile(), 30);

    assert_eq!(result.phases[0].start_frame, 0, "stance always starts at frame 0");
    for pair in result.phases.windows(2) {
        assert_eq!(pair[0].end_frame, pair[1].start_frame, "phases are contiguous");
        assert!(pair[0].kind < pair[1].kind, "canonical order, no repeats");
    }
    for phase in &result.phases {
        assert!(phase.end_frame > phase.start_frame);
        assert!((0.75..=0.9).contains(&phase.confidence));
        assert!(!phase.key_events.is_empty());
        assert!(phase.com_at_end.is_some());
    }
}

#[test]
fn test_full_swing_ratio_and_quality() {
    let pipeline = SwingPipeline::with_defaults();
    let result = pipeline.analyze(&full_swing_profile(), 30);

    // Load spans 8 frames, fire 4: ratio 2.0.
    assert!((result.load_to_fire_ratio - 2.0).abs() < 1e-3, "ratio {}", result.load_to_fire_ratio);
    assert!((result.total_duration_s - 35.0 / 30.0).abs() < 1e-4);

    assert_eq!(result.quality.score, 100.0, "issues: {:?}", result.quality.issues);
    assert!(result.quality.issues.is_empty());
    assert!((result.quality.detection_confidence - 0.825).abs() < 1e-3);
}

#[test]
fn test_full_swing_transitions() {
    let pipeline = SwingPipeline::with_defaults();
    let result = pipeline.analyze(&full_swing_profile(), 30);

    assert_eq!(result.transitions.len(), result.phases.len());
    assert_eq!(result.transitions[0].frame, 0);
    for (transition, phase) in result.transitions.iter().zip(&result.phases) {
        assert_eq!(transition.kind, phase.kind);
        assert_eq!(transition.frame, phase.start_frame);
    }
}

#[test]
fn test_pipeline_is_idempotent() {
    let frames = full_swing_profile();
    let pipeline = SwingPipeline::with_defaults();

    let first = pipeline.analyze(&frames, 30);
    let second = pipeline.analyze(&frames, 30);

    assert_eq!(first, second, "pure pipeline must reproduce itself exactly");
}

#[test]
fn test_short_clip_degrades_with_single_issue() {
    let pipeline = SwingPipeline::with_defaults();
    let result = pipeline.analyze(&zeroed_frames(9), 30);

    assert!(result.phases.is_empty());
    assert_eq!(result.total_duration_s, 0.0);
    assert_eq!(result.load_to_fire_ratio, 0.0);
    assert_eq!(result.quality.score, 0.0);
    assert_eq!(result.quality.issues, vec![INSUFFICIENT_DATA_ISSUE.to_string()]);
}

#[test]
fn test_minimum_length_zeroed_clip_uses_fallback_boundaries() {
    // Exactly 10 frames meets the minimum, so segmentation must still be
    // attempted even with total tracking loss, landing on the documented
    // fallback boundaries.
    let pipeline = SwingPipeline::with_defaults();
    let result = pipeline.analyze(&zeroed_frames(10), 30);

    let kinds: Vec<PhaseKind> = result.phases.iter().map(|p| p.kind).collect();
    assert_eq!(kinds, vec![PhaseKind::Stance, PhaseKind::Stride]);
    assert_eq!(result.phases[0].end_frame, 5, "stance fallback boundary");
    assert_eq!(result.phases[1].end_frame, 10, "stride fallback boundary");

    // Four canonical stages missing at 15 points each.
    assert_eq!(result.quality.score, 40.0);
    assert_eq!(result.load_to_fire_ratio, 0.0);
}

#[test]
fn test_freeman_reference_markers_validate_end_to_end() {
    let profile = ground_truth::lookup("Freddie Freeman").expect("built-in profile");
    let markers = PhaseMarkers::new(850.0, 340.0, 200.0);

    let result = tempo::validate(&markers, Some(profile));

    assert_eq!(result.checks.len(), 7);
    assert!(result.checks.iter().all(|c| c.passed));
    assert!(result.overall_pass);
    assert!(result.score >= 90.0);
}

#[test]
fn test_result_serializes_for_downstream_consumers() {
    let pipeline = SwingPipeline::with_defaults();
    let result = pipeline.analyze(&full_swing_profile(), 30);

    let value = serde_json::to_value(&result).expect("result serializes");
    assert_eq!(value["phases"][0]["kind"], "stance");
    assert_eq!(value["phases"][5]["kind"], "follow_through");
    assert!(value["quality"]["score"].is_number());

    let validation = tempo::validate(&PhaseMarkers::new(300.0, 450.0, 200.0), None);
    let value = serde_json::to_value(&validation).expect("validation serializes");
    assert_eq!(value["checks"][0]["severity"], "critical");
}
