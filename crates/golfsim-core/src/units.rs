//! Unit conversions.
//!
//! The workspace is SI internally: meters, seconds, kilograms, Pascals,
//! Kelvin. Spin is rpm at the boundary and angles are degrees at the
//! boundary; both convert here. The mph adapter exists for launch-monitor
//! data; nothing else in the workspace speaks imperial.

use std::f64::consts::PI;

/// rpm → rad/s
pub fn rpm_to_rad_s(rpm: f64) -> f64 { rpm * 2.0 * PI / 60.0 }
/// rad/s → rpm
pub fn rad_s_to_rpm(w: f64) -> f64 { w * 60.0 / (2.0 * PI) }

/// meters → yards (golf reporting)
pub fn m_to_yards(m: f64) -> f64 { m * 1.09361 }
/// yards → meters
pub fn yards_to_m(y: f64) -> f64 { y / 1.09361 }

/// mph → m/s (launch monitor adapter)
pub fn mph_to_mps(v: f64) -> f64 { v * 0.44704 }
/// m/s → mph
pub fn mps_to_mph(v: f64) -> f64 { v / 0.44704 }
