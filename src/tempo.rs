//! Tempo validation rule engine.
//!
//! An independent validator over externally supplied phase-boundary markers
//! (typically extracted from a third-party biomechanics report). Seven named
//! checks run unconditionally in fixed order against hard physiological
//! bounds and, when a player profile is supplied, against player-specific
//! empirical windows.
//!
//! The validator never errors: physically nonsensical input surfaces as
//! failed critical checks, which is the intended signal path.

use crate::ground_truth::PlayerGroundTruth;
use crate::types::{CheckResult, CheckSeverity, PhaseMarkers, ValidationResult};

/// Hard physiological bounds from published swing-biomechanics benchmarks.
///
/// These are fixed research-derived policy values, kept as named constants
/// rather than per-deployment configuration.
pub mod bounds {
    /// Expected fire-phase duration range (ms).
    pub const FIRE_DURATION_MS: [f32; 2] = [250.0, 500.0];

    /// Fire durations outside this envelope are critical, not just warnings.
    pub const FIRE_DURATION_HARD_MS: [f32; 2] = [200.0, 550.0];

    /// Expected load-phase duration range (ms).
    pub const LOAD_DURATION_MS: [f32; 2] = [500.0, 1200.0];

    /// Universal tempo ratio bounds; violations are critical.
    pub const TEMPO_RATIO_HARD: [f32; 2] = [1.5, 5.0];

    /// Distance from a profile's tempo-range midpoint beyond which the
    /// ratio verdict escalates from info to warning.
    pub const TEMPO_MIDPOINT_TOLERANCE: f32 = 0.3;

    /// Expected fire-start-to-pelvis-peak gap range (ms).
    pub const PELVIS_GAP_MS: [f32; 2] = [100.0, 200.0];

    /// Pelvis gaps outside this envelope are critical.
    pub const PELVIS_GAP_HARD_MS: [f32; 2] = [80.0, 220.0];
}

/// Maximum failed warning checks before the overall verdict flips to fail.
/// Fixed policy, deliberately not configurable.
const WARNING_FAILURE_BUDGET: usize = 2;

/// Score penalty per critical failure.
const CRITICAL_PENALTY: f32 = 20.0;

/// Score penalty per warning failure.
const WARNING_PENALTY: f32 = 10.0;

/// Validates markers against hard bounds and an optional player profile.
///
/// With no profile, the tempo check applies hard bounds only and the two
/// window checks pass vacuously (generic mode, used by the edge-case
/// scenarios).
pub fn validate(markers: &PhaseMarkers, ground_truth: Option<&PlayerGroundTruth>) -> ValidationResult {
    let checks = vec![
        check_marker_ordering(markers),
        check_fire_duration(markers),
        check_load_duration(markers),
        check_tempo_ratio(markers, ground_truth),
        check_pelvis_gap(markers),
        check_load_start_window(markers, ground_truth),
        check_fire_start_window(markers, ground_truth),
    ];

    let passed = checks.iter().filter(|c| c.passed).count();
    let critical_failures = checks
        .iter()
        .filter(|c| c.failed_at(CheckSeverity::Critical))
        .count();
    let warning_failures = checks
        .iter()
        .filter(|c| c.failed_at(CheckSeverity::Warning))
        .count();

    let overall_pass = critical_failures == 0 && warning_failures <= WARNING_FAILURE_BUDGET;

    let score = (passed as f32 / checks.len() as f32 * 100.0
        - CRITICAL_PENALTY * critical_failures as f32
        - WARNING_PENALTY * warning_failures as f32)
        .clamp(0.0, 100.0);

    ValidationResult {
        player: ground_truth
            .map(|g| g.player.clone())
            .unwrap_or_else(|| "generic".to_string()),
        checks,
        overall_pass,
        score,
    }
}

/// Check 1: markers must run load start, fire start, contact in strictly
/// decreasing backward-from-contact order.
fn check_marker_ordering(markers: &PhaseMarkers) -> CheckResult {
    let passed =
        markers.load_start_ms > markers.fire_start_ms && markers.fire_start_ms > markers.contact_ms;
    CheckResult {
        name: "marker_ordering",
        expected: "load start > fire start > contact".to_string(),
        actual: format!(
            "{:.0} > {:.0} > {:.0}",
            markers.load_start_ms, markers.fire_start_ms, markers.contact_ms
        ),
        passed,
        severity: if passed {
            CheckSeverity::Info
        } else {
            CheckSeverity::Critical
        },
    }
}

/// Check 2: fire duration within research bounds; failures beyond the hard
/// envelope are critical, near misses warnings.
fn check_fire_duration(markers: &PhaseMarkers) -> CheckResult {
    let fire = markers.fire_duration_ms();
    let passed = in_range(fire, bounds::FIRE_DURATION_MS);
    let severity = if passed {
        CheckSeverity::Info
    } else if !in_range(fire, bounds::FIRE_DURATION_HARD_MS) {
        CheckSeverity::Critical
    } else {
        CheckSeverity::Warning
    };
    CheckResult {
        name: "fire_duration",
        expected: range_label(bounds::FIRE_DURATION_MS, "ms"),
        actual: format!("{:.0} ms", fire),
        passed,
        severity,
    }
}

/// Check 3: load duration within research bounds; any failure is critical.
fn check_load_duration(markers: &PhaseMarkers) -> CheckResult {
    let load = markers.load_duration_ms();
    let passed = in_range(load, bounds::LOAD_DURATION_MS);
    CheckResult {
        name: "load_duration",
        expected: range_label(bounds::LOAD_DURATION_MS, "ms"),
        actual: format!("{:.0} ms", load),
        passed,
        severity: if passed {
            CheckSeverity::Info
        } else {
            CheckSeverity::Critical
        },
    }
}

/// Check 4: tempo ratio within the universal hard bounds and, when a
/// profile is given, within the player's range. Hard-bound violations are
/// critical; a ratio far from the profile's midpoint is a warning.
fn check_tempo_ratio(markers: &PhaseMarkers, ground_truth: Option<&PlayerGroundTruth>) -> CheckResult {
    let ratio = markers.tempo_ratio();
    let in_hard = in_range(ratio, bounds::TEMPO_RATIO_HARD);

    let (in_player, expected) = match ground_truth {
        Some(profile) => (
            in_range(ratio, profile.tempo_range),
            format!(
                "{:.2}-{:.2} (hard {:.1}-{:.1})",
                profile.tempo_range[0],
                profile.tempo_range[1],
                bounds::TEMPO_RATIO_HARD[0],
                bounds::TEMPO_RATIO_HARD[1]
            ),
        ),
        None => (true, range_label(bounds::TEMPO_RATIO_HARD, "")),
    };

    let severity = if !in_hard {
        CheckSeverity::Critical
    } else {
        match ground_truth {
            Some(profile) => {
                let midpoint = (profile.tempo_range[0] + profile.tempo_range[1]) / 2.0;
                if (ratio - midpoint).abs() > bounds::TEMPO_MIDPOINT_TOLERANCE {
                    CheckSeverity::Warning
                } else {
                    CheckSeverity::Info
                }
            }
            None => CheckSeverity::Info,
        }
    };

    CheckResult {
        name: "tempo_ratio",
        expected,
        actual: format!("{:.2}", ratio),
        passed: in_hard && in_player,
        severity,
    }
}

/// Check 5: gap between fire start and pelvis rotation peak; failures
/// beyond the hard envelope are critical, near misses warnings.
fn check_pelvis_gap(markers: &PhaseMarkers) -> CheckResult {
    let gap = markers.pelvis_gap_ms();
    let passed = in_range(gap, bounds::PELVIS_GAP_MS);
    let severity = if passed {
        CheckSeverity::Info
    } else if !in_range(gap, bounds::PELVIS_GAP_HARD_MS) {
        CheckSeverity::Critical
    } else {
        CheckSeverity::Warning
    };
    CheckResult {
        name: "pelvis_peak_gap",
        expected: range_label(bounds::PELVIS_GAP_MS, "ms"),
        actual: format!("{:.0} ms", gap),
        passed,
        severity,
    }
}

/// Check 6: load start inside the player's empirical window. Failures are
/// never worse than warnings; with no profile the check passes vacuously.
fn check_load_start_window(
    markers: &PhaseMarkers,
    ground_truth: Option<&PlayerGroundTruth>,
) -> CheckResult {
    window_check(
        "load_start_window",
        markers.load_start_ms,
        ground_truth.map(|g| g.load_start_window_ms),
    )
}

/// Check 7: fire start inside the player's empirical window. Same policy
/// as check 6.
fn check_fire_start_window(
    markers: &PhaseMarkers,
    ground_truth: Option<&PlayerGroundTruth>,
) -> CheckResult {
    window_check(
        "fire_start_window",
        markers.fire_start_ms,
        ground_truth.map(|g| g.fire_start_window_ms),
    )
}

fn window_check(name: &'static str, value_ms: f32, window: Option<[f32; 2]>) -> CheckResult {
    match window {
        Some(window) => {
            let passed = in_range(value_ms, window);
            CheckResult {
                name,
                expected: range_label(window, "ms"),
                actual: format!("{:.0} ms", value_ms),
                passed,
                severity: if passed {
                    CheckSeverity::Info
                } else {
                    CheckSeverity::Warning
                },
            }
        }
        None => CheckResult {
            name,
            expected: "no player window configured".to_string(),
            actual: format!("{:.0} ms", value_ms),
            passed: true,
            severity: CheckSeverity::Info,
        },
    }
}

/// Inclusive range membership.
fn in_range(value: f32, range: [f32; 2]) -> bool {
    value >= range[0] && value <= range[1]
}

fn range_label(range: [f32; 2], unit: &str) -> String {
    if unit.is_empty() {
        format!("{:.1}-{:.1}", range[0], range[1])
    } else {
        format!("{:.0}-{:.0} {}", range[0], range[1], unit)
    }
}

// ============================================================================
// EDGE-CASE SCENARIOS
// ============================================================================

/// A fixed literal marker scenario probing the hard-bound logic.
#[derive(Debug, Clone)]
pub struct EdgeCaseScenario {
    pub name: &'static str,
    pub description: &'static str,
    pub markers: PhaseMarkers,
    /// Whether generic validation of these markers must pass overall.
    pub expect_pass: bool,
}

/// Six fixed scenarios asserting validator behavior at known boundary
/// values. These are self-tests over the rule engine, run in generic mode
/// (no player profile), and are pinned by regression tests.
pub fn edge_case_scenarios() -> [EdgeCaseScenario; 6] {
    [
        EdgeCaseScenario {
            name: "aggressive",
            description: "fast but legal tempo at the quick end of the envelope",
            markers: PhaseMarkers::new(1000.0, 500.0, 350.0),
            expect_pass: true,
        },
        EdgeCaseScenario {
            name: "patient",
            description: "slow deliberate tempo near the high ratio bound",
            markers: PhaseMarkers::new(1450.0, 300.0, 160.0),
            expect_pass: true,
        },
        EdgeCaseScenario {
            name: "inverted",
            description: "fire begins before load; ordering must fail",
            markers: PhaseMarkers::new(300.0, 450.0, 200.0),
            expect_pass: false,
        },
        EdgeCaseScenario {
            name: "impossible",
            description: "physiologically impossible micro-durations",
            markers: PhaseMarkers::new(100.0, 40.0, 400.0),
            expect_pass: false,
        },
        EdgeCaseScenario {
            name: "minimum-fire",
            description: "fire duration exactly at the inclusive lower bound",
            markers: PhaseMarkers::new(875.0, 250.0, 100.0),
            expect_pass: true,
        },
        EdgeCaseScenario {
            name: "maximum-load",
            description: "load duration and tempo ratio exactly at the inclusive upper bounds",
            markers: PhaseMarkers::new(1500.0, 300.0, 150.0),
            expect_pass: true,
        },
    ]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ground_truth::lookup;

    fn freeman() -> &'static PlayerGroundTruth {
        lookup("Freddie Freeman").expect("built-in profile")
    }

    fn check<'a>(result: &'a ValidationResult, name: &str) -> &'a CheckResult {
        result
            .checks
            .iter()
            .find(|c| c.name == name)
            .unwrap_or_else(|| panic!("check {} missing", name))
    }

    #[test]
    fn test_checks_run_in_fixed_order() {
        let result = validate(&PhaseMarkers::new(850.0, 340.0, 200.0), None);
        let names: Vec<&str> = result.checks.iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec![
                "marker_ordering",
                "fire_duration",
                "load_duration",
                "tempo_ratio",
                "pelvis_peak_gap",
                "load_start_window",
                "fire_start_window",
            ]
        );
    }

    #[test]
    fn test_freeman_reference_swing_passes_everything() {
        let markers = PhaseMarkers::new(850.0, 340.0, 200.0);
        let result = validate(&markers, Some(freeman()));

        assert_eq!(result.player, "Freddie Freeman");
        assert!(result.checks.iter().all(|c| c.passed), "checks: {:?}", result.checks);
        assert!(result.overall_pass);
        assert!(result.score >= 90.0, "score {}", result.score);
        assert_eq!(result.score, 100.0);
        // Passed checks report informational severity.
        assert!(result.checks.iter().all(|c| c.severity == CheckSeverity::Info));
    }

    #[test]
    fn test_moderate_tempo_fails_elite_range_softly() {
        // Ratio 700/380 = 1.84: inside the hard bounds, far from an elite
        // profile's midpoint.
        let markers = PhaseMarkers::new(700.0, 380.0, 230.0);
        let result = validate(&markers, Some(freeman()));

        let tempo = check(&result, "tempo_ratio");
        assert!((markers.tempo_ratio() - 1.84).abs() < 0.01);
        assert!(!tempo.passed);
        assert_eq!(
            tempo.severity,
            CheckSeverity::Warning,
            "inside hard bounds but far from the profile midpoint"
        );
    }

    #[test]
    fn test_barely_ordered_markers_fail_on_ratio() {
        // 500 > 450 satisfies the ordering predicate, but the implied
        // ratio 1.11 violates the universal lower bound.
        let markers = PhaseMarkers::new(500.0, 450.0, 300.0);
        let result = validate(&markers, Some(freeman()));

        assert!(check(&result, "marker_ordering").passed);
        let tempo = check(&result, "tempo_ratio");
        assert!(!tempo.passed);
        assert_eq!(tempo.severity, CheckSeverity::Critical);
        assert!(markers.tempo_ratio() < 1.5);
        assert!(!result.overall_pass);
    }

    #[test]
    fn test_excessive_ratio_is_critical() {
        // 2100/300 = 7.0 exceeds the universal upper bound.
        let markers = PhaseMarkers::new(2100.0, 300.0, 180.0);
        let result = validate(&markers, Some(freeman()));

        let tempo = check(&result, "tempo_ratio");
        assert!((markers.tempo_ratio() - 7.0).abs() < 1e-6);
        assert!(!tempo.passed);
        assert_eq!(tempo.severity, CheckSeverity::Critical);
        assert!(!result.overall_pass);
    }

    #[test]
    fn test_single_warning_failure_still_passes_overall() {
        // Load start 910 is outside Freeman's window; everything else is
        // within bounds. Ratio 2.68 misses his range by under the midpoint
        // tolerance, so that failure stays informational.
        let markers = PhaseMarkers::new(910.0, 340.0, 200.0);
        let result = validate(&markers, Some(freeman()));

        assert_eq!(result.failures_at(CheckSeverity::Critical), 0);
        assert_eq!(result.failures_at(CheckSeverity::Warning), 1);
        assert!(result.overall_pass, "one warning is within the budget");
    }

    #[test]
    fn test_three_warning_failures_fail_overall() {
        // Pelvis gap 210, load start 920, fire start 365: three soft
        // failures with no criticals.
        let markers = PhaseMarkers::new(920.0, 365.0, 155.0);
        let result = validate(&markers, Some(freeman()));

        assert_eq!(result.failures_at(CheckSeverity::Critical), 0);
        assert_eq!(result.failures_at(CheckSeverity::Warning), 3);
        assert!(!result.overall_pass, "three warnings exceed the budget");
        let expected = 4.0_f32 / 7.0 * 100.0 - 30.0;
        assert!((result.score - expected).abs() < 0.01, "score {}", result.score);
    }

    #[test]
    fn test_fire_duration_severity_tiers() {
        // 230 ms: below expected range but inside the hard envelope.
        let soft = validate(&PhaseMarkers::new(900.0, 230.0, 100.0), None);
        let fire = check(&soft, "fire_duration");
        assert!(!fire.passed);
        assert_eq!(fire.severity, CheckSeverity::Warning);

        // 150 ms: beyond the hard envelope.
        let hard = validate(&PhaseMarkers::new(900.0, 150.0, 40.0), None);
        let fire = check(&hard, "fire_duration");
        assert!(!fire.passed);
        assert_eq!(fire.severity, CheckSeverity::Critical);
    }

    #[test]
    fn test_generic_mode_passes_window_checks_vacuously() {
        let markers = PhaseMarkers::new(1000.0, 500.0, 350.0);
        let result = validate(&markers, None);

        assert_eq!(result.player, "generic");
        assert!(check(&result, "load_start_window").passed);
        assert!(check(&result, "fire_start_window").passed);
        assert!(result.overall_pass);
    }

    #[test]
    fn test_validator_never_panics_on_nonsense() {
        let result = validate(&PhaseMarkers::new(-100.0, -50.0, -20.0), Some(freeman()));
        assert!(!result.overall_pass);
        assert!((0.0..=100.0).contains(&result.score));
        let tempo = check(&result, "tempo_ratio");
        assert_eq!(tempo.actual, "0.00", "guarded ratio, never NaN");
    }

    #[test]
    fn test_edge_case_suite_verdicts() {
        for scenario in edge_case_scenarios() {
            let result = validate(&scenario.markers, None);
            assert_eq!(
                result.overall_pass, scenario.expect_pass,
                "scenario {} expected pass={} got checks {:?}",
                scenario.name, scenario.expect_pass, result.checks
            );
        }
    }

    #[test]
    fn test_edge_case_inverted_fails_ordering() {
        let scenario = &edge_case_scenarios()[2];
        assert_eq!(scenario.name, "inverted");
        let result = validate(&scenario.markers, None);
        let ordering = check(&result, "marker_ordering");
        assert!(!ordering.passed);
        assert_eq!(ordering.severity, CheckSeverity::Critical);
    }

    #[test]
    fn test_edge_case_impossible_stacks_criticals() {
        let scenario = &edge_case_scenarios()[3];
        assert_eq!(scenario.name, "impossible");
        let result = validate(&scenario.markers, None);
        assert!(result.failures_at(CheckSeverity::Critical) >= 3);
        assert_eq!(result.score, 0.0, "stacked criticals floor the score");
    }

    #[test]
    fn test_edge_case_bounds_are_inclusive() {
        // minimum-fire: fire duration exactly 250 ms.
        let minimum_fire = &edge_case_scenarios()[4];
        let result = validate(&minimum_fire.markers, None);
        assert!(check(&result, "fire_duration").passed);

        // maximum-load: load duration exactly 1200 ms, ratio exactly 5.0.
        let maximum_load = &edge_case_scenarios()[5];
        assert!((maximum_load.markers.load_duration_ms() - 1200.0).abs() < 1e-6);
        assert!((maximum_load.markers.tempo_ratio() - 5.0).abs() < 1e-6);
        let result = validate(&maximum_load.markers, None);
        assert!(check(&result, "load_duration").passed);
        assert!(check(&result, "tempo_ratio").passed);
    }
}
