//! Swing Kinetics Engine
//!
//! A pose-driven swing analysis kernel that segments body-pose landmark
//! sequences into swing phases and validates tempo markers.
//!
//! This is the entry point for the standalone demo binary. For library use,
//! see lib.rs.

use tracing_subscriber::EnvFilter;

use swing_kinetics::ground_truth;
use swing_kinetics::pipeline::SwingPipeline;
use swing_kinetics::tempo;
use swing_kinetics::types::{Landmark, PhaseMarkers, PoseFrame};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("Swing Kinetics Engine v0.1.0");
    println!("Swing phase detection and tempo validation kernel");
    println!();

    // Phase detection over a synthetic swing clip.
    let frames = demo_swing_frames();
    let pipeline = SwingPipeline::with_defaults();
    let result = pipeline.analyze(&frames, 30);

    println!("Detected {} phases over {:.2}s:", result.phases.len(), result.total_duration_s);
    for phase in &result.phases {
        println!(
            "  {:<15} frames {:>3}..{:<3} ({:.3}s, confidence {:.2})",
            phase.kind.label(),
            phase.start_frame,
            phase.end_frame,
            phase.duration_s,
            phase.confidence
        );
    }
    println!(
        "Quality: {:.0}/100, load-to-fire ratio {:.2}",
        result.quality.score, result.load_to_fire_ratio
    );
    for issue in &result.quality.issues {
        println!("  issue: {}", issue);
    }
    println!();

    // Tempo validation against a built-in reference profile.
    let markers = PhaseMarkers::new(850.0, 340.0, 200.0);
    let profile = ground_truth::lookup("Freddie Freeman");
    let validation = tempo::validate(&markers, profile);

    println!(
        "Tempo validation vs {}: {} (score {:.0}/100)",
        validation.player,
        if validation.overall_pass { "PASS" } else { "FAIL" },
        validation.score
    );
    for c in &validation.checks {
        println!(
            "  [{}] {:<18} expected {:<28} actual {}",
            if c.passed { "ok" } else { "!!" },
            c.name,
            c.expected,
            c.actual
        );
    }
}

/// A compact synthetic right-handed swing: stance, backward weight shift,
/// stride to foot plant, hip fire, contact, finish.
fn demo_swing_frames() -> Vec<PoseFrame> {
    let count = 36;
    (0..count)
        .map(|i| {
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

/// Builds one 33-landmark frame with the hips placed to produce the given
/// COM x and hip-line rotation.
fn swing_frame(com_x: f32, hip_deg: f32, front_ankle_y: f32, hand_x: f32) -> PoseFrame {
    use swing_kinetics::landmarks::{
        LEFT_ANKLE, LEFT_HIP, LEFT_KNEE, LEFT_SHOULDER, LEFT_WRIST, POSE_LANDMARK_COUNT,
        RIGHT_ANKLE, RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER, RIGHT_WRIST,
    };

    let mut landmarks = vec![Landmark::new(com_x, 0.5); POSE_LANDMARK_COUNT];
    let (hip_y, half_width) = (0.55, 0.06);
    let theta = hip_deg.to_radians();
    landmarks[LEFT_HIP] = Landmark::new(com_x - half_width * theta.cos(), hip_y - half_width * theta.sin());
    landmarks[RIGHT_HIP] = Landmark::new(com_x + half_width * theta.cos(), hip_y + half_width * theta.sin());
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
