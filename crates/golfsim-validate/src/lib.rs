//! golfsim-validate
//!
//! Quantitative comparison of simulated flights against reference data.
//! Two modes, combinable per case:
//!
//! - **Metric comparison**: per-metric relative error against configurable
//!   thresholds, with a warning band at 80 % of each threshold and
//!   absolute-error floors when the expected value is zero.
//! - **Shape comparison**: both trajectories resampled at N evenly spaced
//!   time fractions of their own durations, per-axis R² (clamped to
//!   [0, 1]), averaged over x/y/z.
//!
//! Mismatches are never thrown: they land in the returned
//! `ValidationResult`'s error list, and `is_valid` is simply "that list is
//! empty". `Err` is reserved for inputs the simulator itself rejects.

mod interp;

pub use interp::{resample_positions, sample_at_time};

use golfsim_core::{BallProperties, BallState, Environment, FlightError, Trajectory};
use golfsim_flight::{simulate, TrajectoryMetrics};
use serde::{Deserialize, Serialize};

/// Comparison thresholds. `default()` is the tolerant comparator;
/// `strict()` tightens the shape threshold for regression gating.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Relative error allowed per scalar metric.
    pub metric_tolerance: f64,
    /// Relative error allowed for the spin rate.
    pub spin_tolerance: f64,
    /// Minimum acceptable mean R² of the shape comparison.
    pub shape_threshold: f64,
    /// Resampling count for the shape comparison.
    pub samples: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            metric_tolerance: 0.20,
            spin_tolerance: 0.20,
            shape_threshold: 0.25,
            samples: 50,
        }
    }
}

impl ValidationConfig {
    /// Strict shape gating (R² ≥ 0.95).
    pub fn strict() -> Self {
        Self {
            shape_threshold: 0.95,
            ..Self::default()
        }
    }
}

/// One validation scenario: inputs plus whatever reference data exists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationCase {
    pub initial: BallState,
    pub env: Environment,
    pub props: BallProperties,
    /// Reference metrics, when a measurement session produced them.
    pub expected_metrics: Option<TrajectoryMetrics>,
    /// Reference trajectory, when sampled flight data exists.
    pub expected_trajectory: Option<Trajectory>,
}

/// Per-metric comparison detail.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricReport {
    pub metric: String,
    pub actual: f64,
    pub expected: f64,
    pub absolute_error: f64,
    pub relative_error: f64,
    pub threshold: f64,
    pub within_tolerance: bool,
}

/// Outcome of one case. `is_valid` ⇔ `errors` is empty; warnings never
/// invalidate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub trajectory: Trajectory,
    pub metrics: TrajectoryMetrics,
    pub metric_reports: Vec<MetricReport>,
    /// Mean per-axis R², present when a reference trajectory was compared.
    pub shape_score: Option<f64>,
}

/// Validate with default thresholds.
pub fn validate(case: &ValidationCase) -> Result<ValidationResult, FlightError> {
    validate_with(case, &ValidationConfig::default())
}

/// Validate a case: simulate, extract metrics, compare against whatever
/// reference data the case carries.
pub fn validate_with(
    case: &ValidationCase,
    config: &ValidationConfig,
) -> Result<ValidationResult, FlightError> {
    let trajectory = simulate(&case.initial, &case.env, &case.props)?;
    let metrics = TrajectoryMetrics::extract(&trajectory);

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut metric_reports = Vec::new();
    let mut shape_score = None;

    if let Some(expected) = &case.expected_metrics {
        let checks = [
            ("carry_distance", metrics.carry_distance, expected.carry_distance, config.metric_tolerance, 0.1),
            ("max_height", metrics.max_height, expected.max_height, config.metric_tolerance, 0.1),
            ("time_of_flight", metrics.time_of_flight, expected.time_of_flight, config.metric_tolerance, 0.01),
            ("launch_angle", metrics.launch_angle_deg, expected.launch_angle_deg, config.metric_tolerance, 0.5),
            ("landing_angle", metrics.landing_angle_deg, expected.landing_angle_deg, config.metric_tolerance, 0.5),
            ("spin_rate", metrics.spin_rate_rpm, expected.spin_rate_rpm, config.spin_tolerance, 10.0),
        ];
        for (metric, actual, exp, threshold, floor) in checks {
            let report = compare_metric(metric, actual, exp, threshold, floor);
            match classify(&report, floor) {
                Verdict::Ok => {}
                Verdict::Warn => warnings.push(format!(
                    "{metric} near tolerance: relative error {:.4} vs threshold {threshold}",
                    report.relative_error
                )),
                Verdict::Fail => errors.push(format!(
                    "{metric} out of tolerance: actual {actual:.4}, expected {exp:.4}, \
                     relative error {:.4} vs threshold {threshold}",
                    report.relative_error
                )),
            }
            metric_reports.push(report);
        }
    }

    if let Some(expected) = &case.expected_trajectory {
        let score = shape_comparison(&trajectory, expected, config.samples);
        if score < config.shape_threshold {
            errors.push(format!(
                "trajectory shape R² {score:.4} below threshold {}",
                config.shape_threshold
            ));
        }
        shape_score = Some(score);
    }

    if case.expected_metrics.is_none() && case.expected_trajectory.is_none() {
        warnings.push("case carries no expected metrics or trajectory; nothing compared".into());
    }

    Ok(ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        warnings,
        trajectory,
        metrics,
        metric_reports,
        shape_score,
    })
}

/// Mean per-axis R² of two trajectories resampled onto `samples` time
/// fractions of their own durations. Either side empty scores 0.
pub fn shape_comparison(actual: &Trajectory, expected: &Trajectory, samples: usize) -> f64 {
    let n = samples.max(2);
    let a = resample_positions(actual, n);
    let e = resample_positions(expected, n);
    if a.is_empty() || e.is_empty() {
        return 0.0;
    }

    let axis = |pick: fn(&golfsim_core::Vec3) -> f64| -> f64 {
        let actual_axis: Vec<f64> = a.iter().map(pick).collect();
        let expected_axis: Vec<f64> = e.iter().map(pick).collect();
        r_squared(&actual_axis, &expected_axis)
    };

    (axis(|p| p.x) + axis(|p| p.y) + axis(|p| p.z)) / 3.0
}

/// R² = 1 − SS_res/SS_tot over one axis, clamped to [0, 1]. A constant
/// actual signal (SS_tot = 0) scores 1.
pub fn r_squared(actual: &[f64], expected: &[f64]) -> f64 {
    debug_assert_eq!(actual.len(), expected.len());
    let n = actual.len() as f64;
    if n == 0.0 {
        return 0.0;
    }
    let mean = actual.iter().sum::<f64>() / n;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean) * (a - mean)).sum();
    let ss_res: f64 = actual
        .iter()
        .zip(expected)
        .map(|(a, e)| (a - e) * (a - e))
        .sum();
    if ss_tot < 1e-12 {
        return 1.0;
    }
    (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
}

enum Verdict {
    Ok,
    Warn,
    Fail,
}

fn compare_metric(metric: &str, actual: f64, expected: f64, threshold: f64, floor: f64) -> MetricReport {
    let absolute_error = (actual - expected).abs();
    let relative_error = absolute_error / expected.abs().max(f64::EPSILON);
    // Relative error is meaningless against a zero expectation; those fall
    // back to the metric-specific absolute floor.
    let within_tolerance = if expected.abs() < 1e-12 {
        absolute_error <= floor
    } else {
        relative_error <= threshold
    };
    MetricReport {
        metric: metric.to_string(),
        actual,
        expected,
        absolute_error,
        relative_error,
        threshold,
        within_tolerance,
    }
}

fn classify(report: &MetricReport, floor: f64) -> Verdict {
    if report.expected.abs() < 1e-12 {
        if report.absolute_error > floor {
            Verdict::Fail
        } else if report.absolute_error > 0.8 * floor {
            Verdict::Warn
        } else {
            Verdict::Ok
        }
    } else if report.relative_error > report.threshold {
        Verdict::Fail
    } else if report.relative_error > 0.8 * report.threshold {
        Verdict::Warn
    } else {
        Verdict::Ok
    }
}
