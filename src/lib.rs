//! Swing Kinetics Engine Library
//!
//! A pose-driven swing analysis kernel that converts per-frame body-pose
//! landmarks into segmented swing phases, quality assessments, and tempo
//! validation verdicts suitable for downstream coaching tools.
//!
//! # Design Philosophy
//!
//! This library is built on several core principles:
//!
//! - **Degrade, never throw**: Missing landmarks, short clips, and absent
//!   phases are data states with defined fallbacks, not errors.
//! - **Pure stages**: Each stage consumes the immutable output of the
//!   previous one. Running the same input twice yields identical results.
//! - **Named thresholds**: Every camera- or capture-dependent heuristic
//!   lives in a config struct so it can be tuned without code changes.
//! - **Evidence first, interpretation later**: The kernel reports phase
//!   boundaries, confidences, and rule verdicts; it does not coach.
//!
//! # Example
//!
//! ```ignore
//! use swing_kinetics::pipeline::SwingPipeline;
//! use swing_kinetics::types::PoseFrame;
//!
//! let pipeline = SwingPipeline::with_defaults();
//! let frames: Vec<PoseFrame> = capture_from_tracker();
//! let result = pipeline.analyze(&frames, 30);
//!
//! for phase in &result.phases {
//!     println!("{}: frames {}..{}", phase.kind.label(), phase.start_frame, phase.end_frame);
//! }
//! ```

pub mod features;
pub mod ground_truth;
pub mod landmarks;
pub mod pipeline;
pub mod quality;
pub mod segmentation;
pub mod tempo;
pub mod types;

#[cfg(test)]
mod integration_tests;

// Re-export commonly used types
pub use types::{
    CheckResult, CheckSeverity, FrameFeature, Landmark, PhaseDetectionResult, PhaseKind,
    PhaseMarkers, PhaseTransition, PoseFrame, QualityReport, SwingPhase, ValidationResult,
};
