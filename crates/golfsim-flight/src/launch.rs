//! Launch-parameter conversion.
//!
//! Maps launch-monitor style numbers (ball speed, launch angle, direction,
//! spin rate and axis) to an initial `BallState` and back. Boundary units:
//! m/s, degrees, rpm. The mph constructor is the only imperial entry point.

use golfsim_core::{units, BallProperties, BallState, FlightError, SpinState, Vec3};
use serde::{Deserialize, Serialize};

/// Launch parameters as a monitor reports them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaunchConditions {
    /// Ball speed [m/s].
    pub ball_speed: f64,
    /// Pitch of the initial velocity above horizontal [deg].
    pub launch_angle_deg: f64,
    /// Azimuth of the initial velocity in the ground plane [deg];
    /// 0 is +x, positive toward +z.
    pub launch_direction_deg: f64,
    /// Spin rate [rpm].
    pub spin_rate_rpm: f64,
    /// Spin axis; normalized defensively at conversion.
    pub spin_axis: Vec3,
}

impl Default for LaunchConditions {
    fn default() -> Self {
        // A mid driver strike with pure backspin (−z lifts +x flight upward).
        Self {
            ball_speed: 70.0,
            launch_angle_deg: 12.0,
            launch_direction_deg: 0.0,
            spin_rate_rpm: 2700.0,
            spin_axis: -Vec3::z(),
        }
    }
}

impl LaunchConditions {
    /// Same parameters with ball speed in mph (launch monitor adapter).
    pub fn from_mph(
        ball_speed_mph: f64,
        launch_angle_deg: f64,
        launch_direction_deg: f64,
        spin_rate_rpm: f64,
        spin_axis: Vec3,
    ) -> Self {
        Self {
            ball_speed: units::mph_to_mps(ball_speed_mph),
            launch_angle_deg,
            launch_direction_deg,
            spin_rate_rpm,
            spin_axis,
        }
    }

    /// Convert to the physical initial state at the origin.
    pub fn initial_state(&self, props: &BallProperties) -> Result<BallState, FlightError> {
        props.validate()?;
        if !self.ball_speed.is_finite() || self.ball_speed < 0.0 {
            return Err(FlightError::invalid(format!(
                "ball speed must be finite and non-negative, got {}",
                self.ball_speed
            )));
        }
        if !self.launch_angle_deg.is_finite() || !self.launch_direction_deg.is_finite() {
            return Err(FlightError::invalid("non-finite launch angle"));
        }
        let spin = SpinState::new(self.spin_rate_rpm, self.spin_axis)?;

        let theta = self.launch_angle_deg.to_radians();
        let phi = self.launch_direction_deg.to_radians();
        let velocity = Vec3::new(
            self.ball_speed * theta.cos() * phi.cos(),
            self.ball_speed * theta.sin(),
            self.ball_speed * theta.cos() * phi.sin(),
        );

        Ok(BallState {
            position: Vec3::zeros(),
            velocity,
            spin,
            mass: props.mass,
        })
    }

    /// Recover launch parameters from an initial state (inverse of
    /// [`LaunchConditions::initial_state`] up to angle rounding).
    pub fn from_state(state: &BallState) -> Self {
        let v = state.velocity;
        let horizontal = v.x.hypot(v.z);
        Self {
            ball_speed: v.norm(),
            launch_angle_deg: v.y.atan2(horizontal).to_degrees(),
            launch_direction_deg: v.z.atan2(v.x).to_degrees(),
            spin_rate_rpm: state.spin.rate_rpm,
            spin_axis: state.spin.axis,
        }
    }
}
