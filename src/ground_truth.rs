//! Player reference profiles for tempo validation.
//!
//! A static, versioned data table of empirically sourced swing-timing
//! profiles. The validator takes a profile by reference, so deployments can
//! ship their own catalog (see [`catalog_from_json`]) without touching
//! validation logic.
//!
//! Window semantics match [`crate::types::PhaseMarkers`]: milliseconds
//! measured backward from ball contact.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog revision, bumped whenever built-in profiles change.
pub const CATALOG_VERSION: &str = "2025.1";

/// An empirically sourced reference profile for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerGroundTruth {
    /// Player label, unique within a catalog.
    pub player: String,
    /// Descriptive swing archetype ("balanced power", "quick-twitch", ...).
    pub archetype: String,
    /// Expected load-to-contact over fire tempo ratio.
    pub expected_tempo: f32,
    /// Acceptable tempo ratio range [lo, hi].
    pub tempo_range: [f32; 2],
    /// Acceptable load-start window in ms before contact.
    pub load_start_window_ms: [f32; 2],
    /// Acceptable fire-start window in ms before contact.
    pub fire_start_window_ms: [f32; 2],
    /// Acceptable pelvis-rotation-peak window in ms before contact.
    pub pelvis_peak_window_ms: [f32; 2],
}

/// Errors from loading an external catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("catalog holds no profiles")]
    Empty,

    #[error("duplicate player label in catalog: {0}")]
    DuplicatePlayer(String),
}

/// Built-in reference profiles.
pub static BUILTIN_CATALOG: Lazy<Vec<PlayerGroundTruth>> = Lazy::new(|| {
    vec![
        PlayerGroundTruth {
            player: "Freddie Freeman".to_string(),
            archetype: "balanced power".to_string(),
            expected_tempo: 2.50,
            tempo_range: [2.40, 2.60],
            load_start_window_ms: [800.0, 900.0],
            fire_start_window_ms: [320.0, 360.0],
            pelvis_peak_window_ms: [180.0, 220.0],
        },
        PlayerGroundTruth {
            player: "Mookie Betts".to_string(),
            archetype: "quick-twitch".to_string(),
            expected_tempo: 2.20,
            tempo_range: [2.05, 2.35],
            load_start_window_ms: [970.0, 1050.0],
            fire_start_window_ms: [440.0, 480.0],
            pelvis_peak_window_ms: [280.0, 340.0],
        },
        PlayerGroundTruth {
            player: "Aaron Judge".to_string(),
            archetype: "leveraged power".to_string(),
            expected_tempo: 3.10,
            tempo_range: [2.90, 3.30],
            load_start_window_ms: [950.0, 1100.0],
            fire_start_window_ms: [310.0, 350.0],
            pelvis_peak_window_ms: [150.0, 210.0],
        },
        PlayerGroundTruth {
            player: "Luis Arraez".to_string(),
            archetype: "contact-first".to_string(),
            expected_tempo: 2.10,
            tempo_range: [1.95, 2.25],
            load_start_window_ms: [980.0, 1060.0],
            fire_start_window_ms: [470.0, 500.0],
            pelvis_peak_window_ms: [300.0, 360.0],
        },
        PlayerGroundTruth {
            player: "Corey Seager".to_string(),
            archetype: "smooth leverage".to_string(),
            expected_tempo: 2.70,
            tempo_range: [2.55, 2.85],
            load_start_window_ms: [900.0, 990.0],
            fire_start_window_ms: [330.0, 370.0],
            pelvis_peak_window_ms: [170.0, 230.0],
        },
    ]
});

/// Looks up a built-in profile by player label, case-insensitively.
pub fn lookup(player: &str) -> Option<&'static PlayerGroundTruth> {
    BUILTIN_CATALOG
        .iter()
        .find(|p| p.player.eq_ignore_ascii_case(player))
}

/// Parses and validates a catalog from JSON.
///
/// The format is a plain array of profile objects. Rejects empty catalogs
/// and duplicate player labels.
pub fn catalog_from_json(json: &str) -> Result<Vec<PlayerGroundTruth>, CatalogError> {
    let catalog: Vec<PlayerGroundTruth> = serde_json::from_str(json)?;
    if catalog.is_empty() {
        return Err(CatalogError::Empty);
    }
    for (i, profile) in catalog.iter().enumerate() {
        let duplicated = catalog[..i]
            .iter()
            .any(|p| p.player.eq_ignore_ascii_case(&profile.player));
        if duplicated {
            return Err(CatalogError::DuplicatePlayer(profile.player.clone()));
        }
    }
    Ok(catalog)
}

// ============================================================================
// TESTS
// ============================================================================
