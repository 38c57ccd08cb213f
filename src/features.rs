//! Per-frame feature extraction (the frame analyzer).
//!
//! Converts one frame's raw landmark set into a compact [`FrameFeature`]
//! record: rotation angles, knee flex, center-of-mass estimate, hand
//! position, and a front-foot contact flag.
//!
//! Two-pass design: hip angular velocity needs the previous frame's hip
//! rotation, so it cannot be computed per frame. [`extract_sequence`] runs
//! the per-frame pass first and then an explicit second transformation over
//! the immutable first-pass output. Both stages are pure.

use tracing::{debug, warn};

use crate::landmarks::{
    BodySide, LEFT_HIP, LEFT_SHOULDER, LEFT_WRIST, RIGHT_HIP, RIGHT_SHOULDER, RIGHT_WRIST,
};
use crate::types::{FrameFeature, Landmark, PoseFrame};

/// Configuration for per-frame feature extraction.
#[derive(Debug, Clone)]
pub struct FeatureConfig {
    /// Normalized vertical coordinate above which the front ankle counts as
    /// planted. Encodes a side-on camera framing with the ground near the
    /// bottom of the image. Typical: 0.8.
    pub foot_contact_threshold: f32,

    /// Which leg is the stride ("front") leg. Left for a right-handed
    /// batter in conventional framing.
    pub front_side: BodySide,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            foot_contact_threshold: 0.8,
            front_side: BodySide::Left,
        }
    }
}

/// Extracts features for a full capture sequence, including the angular
/// velocity second pass.
///
/// Frames with fewer than 33 landmarks degrade to zeroed records; the count
/// of degraded frames is logged once per sequence.
pub fn extract_sequence(frames: &[PoseFrame], fps: u32, config: &FeatureConfig) -> Vec<FrameFeature> {
    let features: Vec<FrameFeature> = frames
        .iter()
        .enumerate()
        .map(|(index, frame)| extract_frame(frame, index, fps, config))
        .collect();

    let degraded = frames.iter().filter(|f| !f.is_complete()).count();
    if degraded > 0 {
        warn!(
            degraded,
            total = frames.len(),
            "frames with incomplete landmark sets were zeroed"
        );
    }

    with_angular_velocity(features, fps)
}

/// Extracts the feature record for a single frame.
///
/// An incomplete landmark set (< 33 points) yields the zeroed fallback
/// record. The hip angular velocity field stays 0 here; it is filled by
/// [`with_angular_velocity`].
pub fn extract_frame(frame: &PoseFrame, index: usize, fps: u32, config: &FeatureConfig) -> FrameFeature {
    let fps = fps.max(1);
    let timestamp_s = index as f32 / fps as f32;

    if !frame.is_complete() {
        return FrameFeature::zeroed(index, timestamp_s);
    }

    // is_complete() guarantees all layout indices resolve.
    let left_hip = frame.get(LEFT_HIP).unwrap_or_default();
    let right_hip = frame.get(RIGHT_HIP).unwrap_or_default();
    let left_shoulder = frame.get(LEFT_SHOULDER).unwrap_or_default();
    let right_shoulder = frame.get(RIGHT_SHOULDER).unwrap_or_default();
    let left_wrist = frame.get(LEFT_WRIST).unwrap_or_default();
    let right_wrist = frame.get(RIGHT_WRIST).unwrap_or_default();

    let front = config.front_side;
    let back = front.opposite();
    let front_knee_flex_deg = knee_flex(frame, front);
    let back_knee_flex_deg = knee_flex(frame, back);

    let (com_x, com_y) = midpoint(left_hip, right_hip);
    let (hand_x, hand_y) = midpoint(left_wrist, right_wrist);

    let front_ankle = frame.get(front.ankle_index()).unwrap_or_default();
    let front_foot_contact = front_ankle.y > config.foot_contact_threshold;

    FrameFeature {
        frame_index: index,
        timestamp_s,
        hip_rotation_deg: rotation_angle(left_hip, right_hip),
        shoulder_rotation_deg: rotation_angle(left_shoulder, right_shoulder),
        front_knee_flex_deg,
        back_knee_flex_deg,
        com_x,
        com_y,
        hand_x,
        hand_y,
        front_foot_contact,
        hip_velocity_dps: 0.0,
    }
}

/// Second pass: fills hip angular velocity from frame-to-frame hip rotation
/// change.
///
/// velocity[i] = |hip[i] - hip[i-1]| * fps for i >= 1; velocity[0] = 0.
/// Consumes the first-pass output and returns a new sequence; records are
/// never mutated in place.
pub fn with_angular_velocity(features: Vec<FrameFeature>, fps: u32) -> Vec<FrameFeature> {
    let fps = fps.max(1) as f32;
    features
        .iter()
        .enumerate()
        .map(|(i, feature)| {
            let velocity = if i == 0 {
                0.0
            } else {
                (feature.hip_rotation_deg - features[i - 1].hip_rotation_deg).abs() * fps
            };
            FrameFeature {
                hip_velocity_dps: velocity,
                ..*feature
            }
        })
        .collect()
}

/// Signed rotation of the line through a left/right landmark pair.
///
/// Arctangent of the vertical-over-horizontal displacement, in degrees,
/// range (-180, 180].
fn rotation_angle(left: Landmark, right: Landmark) -> f32 {
    (right.y - left.y).atan2(right.x - left.x).to_degrees()
}

/// Three-point flex angle at this side's knee (hip-knee-ankle vertex).
fn knee_flex(frame: &PoseFrame, side: BodySide) -> f32 {
    let hip = frame.get(side.hip_index()).unwrap_or_default();
    let knee = frame.get(side.knee_index()).unwrap_or_default();
    let ankle = frame.get(side.ankle_index()).unwrap_or_default();
    joint_flex_angle(hip, knee, ankle)
}

/// Angle at `vertex` formed by the segments to `a` and `b`, in degrees.
///
/// Dot-product form, which already lands in [0, 180] (reflex angles read as
/// their mirror). Degenerate segments (coincident landmarks) yield 0.
fn joint_flex_angle(a: Landmark, vertex: Landmark, b: Landmark) -> f32 {
    let v1 = (a.x - vertex.x, a.y - vertex.y);
    let v2 = (b.x - vertex.x, b.y - vertex.y);

    let dot = v1.0 * v2.0 + v1.1 * v2.1;
    let mag1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let mag2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();

    if mag1 < 1e-4 || mag2 < 1e-4 {
        debug!("degenerate joint segments, flex angle defaults to 0");
        return 0.0;
    }

    let cos_angle = (dot / (mag1 * mag2)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

fn midpoint(a: Landmark, b: Landmark) -> (f32, f32) {
    ((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

// ============================================================================
// TESTS
// ============================================================================
