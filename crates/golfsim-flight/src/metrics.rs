//! Trajectory metrics.
//!
//! Reduces an emitted trajectory to the scalar numbers a fitting session
//! cares about. Everything is derivable from the first and last emitted
//! points plus a max over the interior; angles are degrees, distances
//! meters, times seconds.

use golfsim_core::{units, Trajectory};
use serde::{Deserialize, Serialize};

/// Scalar flight summary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryMetrics {
    /// Horizontal launch-to-impact distance [m].
    pub carry_distance: f64,
    /// Same as carry (no roll model).
    pub total_distance: f64,
    /// Apex height [m].
    pub max_height: f64,
    /// Last emitted time minus first [s].
    pub time_of_flight: f64,
    /// Initial speed [m/s].
    pub ball_speed: f64,
    /// Pitch of the initial velocity [deg].
    pub launch_angle_deg: f64,
    /// Azimuth of the initial velocity [deg].
    pub launch_direction_deg: f64,
    /// Descent angle at impact [deg], positive downward.
    pub landing_angle_deg: f64,
    /// Initial spin rate [rpm].
    pub spin_rate_rpm: f64,
}

impl TrajectoryMetrics {
    /// Extract metrics from an emitted trajectory.
    ///
    /// Fewer than 2 points zeroes everything except the spin rate, which
    /// uses the single point when present.
    pub fn extract(trajectory: &Trajectory) -> Self {
        let points = &trajectory.points;
        if points.len() < 2 {
            return Self {
                spin_rate_rpm: points.first().map_or(0.0, |p| p.state.spin.rate_rpm),
                ..Self::default()
            };
        }

        let first = &points[0];
        let last = &points[points.len() - 1];

        let v0 = first.state.velocity;
        let v0_horizontal = v0.x.hypot(v0.z);
        let vl = last.state.velocity;
        let vl_horizontal = vl.x.hypot(vl.z);

        let carry = (last.state.position.x - first.state.position.x)
            .hypot(last.state.position.z - first.state.position.z);

        Self {
            carry_distance: carry,
            total_distance: carry,
            max_height: points
                .iter()
                .map(|p| p.state.position.y)
                .fold(0.0, f64::max),
            time_of_flight: last.time - first.time,
            ball_speed: v0.norm(),
            launch_angle_deg: v0.y.atan2(v0_horizontal).to_degrees(),
            launch_direction_deg: v0.z.atan2(v0.x).to_degrees(),
            landing_angle_deg: (-vl.y).atan2(vl_horizontal).to_degrees(),
            spin_rate_rpm: first.state.spin.rate_rpm,
        }
    }

    /// Carry in yards, for scorecard-flavored reporting.
    pub fn carry_yards(&self) -> f64 {
        units::m_to_yards(self.carry_distance)
    }
}
