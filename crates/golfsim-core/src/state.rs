//! Ball, environment-facing and trajectory state types.
//!
//! `BallState` is the mutable working state owned by the integrator;
//! `TrajectoryPoint` snapshots are deep copies taken at emission and never
//! alias it.

use crate::error::FlightError;
use crate::{Vec3, GRAVITY};
use serde::{Deserialize, Serialize};

/// Spin about a fixed axis. The axis stays unit length (within 1e-10) for
/// the whole flight; only the rate decays.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpinState {
    /// Spin rate [rpm]. Never negative.
    pub rate_rpm: f64,
    /// Unit spin axis.
    pub axis: Vec3,
}

impl SpinState {
    /// Build a spin state, normalizing the axis. Zero-length axes and
    /// negative rates are rejected.
    pub fn new(rate_rpm: f64, axis: Vec3) -> Result<Self, FlightError> {
        if !rate_rpm.is_finite() || rate_rpm < 0.0 {
            return Err(FlightError::invalid(format!(
                "spin rate must be finite and non-negative, got {rate_rpm} rpm"
            )));
        }
        if axis.iter().any(|c| !c.is_finite()) {
            return Err(FlightError::invalid("non-finite spin axis component"));
        }
        let norm = axis.norm();
        if norm < 1e-12 {
            return Err(FlightError::invalid("zero-length spin axis"));
        }
        Ok(Self { rate_rpm, axis: axis / norm })
    }

    /// Spin state for a ball that is not rotating. The axis is arbitrary
    /// but must still be unit length; +y keeps the invariant.
    pub fn still() -> Self {
        Self { rate_rpm: 0.0, axis: Vec3::y() }
    }

    /// Angular speed [rad/s].
    pub fn angular_speed(&self) -> f64 {
        crate::units::rpm_to_rad_s(self.rate_rpm)
    }
}

/// Physical ball constants, fixed for a flight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BallProperties {
    /// Mass [kg].
    pub mass: f64,
    /// Radius [m].
    pub radius: f64,
    /// Base drag coefficient.
    pub drag_coefficient: f64,
    /// Base lift coefficient.
    pub lift_coefficient: f64,
    /// Base Magnus coefficient.
    pub magnus_coefficient: f64,
    /// Exponential spin decay constant k [1/s]: rate(t+dt) = rate(t)·e^(−k·dt).
    pub spin_decay_rate: f64,
}

impl Default for BallProperties {
    fn default() -> Self {
        // Regulation ball: 45.9 g, 42.7 mm diameter.
        Self {
            mass: 0.0459,
            radius: 0.02135,
            drag_coefficient: 0.225,
            lift_coefficient: 0.18,
            magnus_coefficient: 0.12,
            spin_decay_rate: 0.05,
        }
    }
}

impl BallProperties {
    /// Cross-section area [m²].
    pub fn cross_section(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }

    /// Reject non-physical property sets.
    pub fn validate(&self) -> Result<(), FlightError> {
        let fields = [
            self.mass,
            self.radius,
            self.drag_coefficient,
            self.lift_coefficient,
            self.magnus_coefficient,
            self.spin_decay_rate,
        ];
        if fields.iter().any(|f| !f.is_finite()) {
            return Err(FlightError::invalid("non-finite ball property"));
        }
        if self.mass <= 0.0 {
            return Err(FlightError::invalid(format!(
                "ball mass must be positive, got {} kg",
                self.mass
            )));
        }
        if self.radius <= 0.0 {
            return Err(FlightError::invalid(format!(
                "ball radius must be positive, got {} m",
                self.radius
            )));
        }
        if self.spin_decay_rate <= 0.0 {
            return Err(FlightError::invalid(format!(
                "spin decay rate must be positive, got {} 1/s",
                self.spin_decay_rate
            )));
        }
        Ok(())
    }
}

/// Full kinematic state of the ball at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    /// Position [m]; y is up, ground is y = 0.
    pub position: Vec3,
    /// Velocity [m/s], ground frame.
    pub velocity: Vec3,
    /// Spin.
    pub spin: SpinState,
    /// Mass [kg], constant across a flight.
    pub mass: f64,
}

impl BallState {
    /// True when every component is finite.
    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|c| c.is_finite())
            && self.velocity.iter().all(|c| c.is_finite())
            && self.spin.rate_rpm.is_finite()
            && self.spin.axis.iter().all(|c| c.is_finite())
            && self.mass.is_finite()
    }

    /// Entry validation for the integrator.
    pub fn validate(&self) -> Result<(), FlightError> {
        if !self.is_finite() {
            return Err(FlightError::invalid("non-finite ball state component"));
        }
        if self.mass <= 0.0 {
            return Err(FlightError::invalid(format!(
                "ball mass must be positive, got {} kg",
                self.mass
            )));
        }
        let axis_norm = self.spin.axis.norm();
        if (axis_norm - 1.0).abs() > 1e-10 {
            return Err(FlightError::invalid(format!(
                "spin axis must be unit length, norm is {axis_norm}"
            )));
        }
        if self.spin.rate_rpm < 0.0 {
            return Err(FlightError::invalid("negative spin rate"));
        }
        Ok(())
    }

    /// Mechanical energy ½m‖v‖² + mgh [J]. Used by the dissipation checks.
    pub fn mechanical_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared() + self.mass * GRAVITY * self.position.y
    }
}

/// The four force contributions of one derivative evaluation [N].
///
/// Gravity already includes the mass factor: (0, −m·g, 0). Acceleration is
/// `total() / mass`; nothing adds −g on top.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Forces {
    pub drag: Vec3,
    pub lift: Vec3,
    pub magnus: Vec3,
    pub gravity: Vec3,
}

impl Forces {
    /// Sum of all four contributions [N].
    pub fn total(&self) -> Vec3 {
        self.drag + self.lift + self.magnus + self.gravity
    }
}

/// One emitted sample of the flight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    /// Flight time [s], strictly increasing across a trajectory.
    pub time: f64,
    /// Deep-copied ball state.
    pub state: BallState,
    /// Forces acting at this sample.
    pub forces: Forces,
}

/// An emitted flight path: the initial point, distance-gated interior
/// samples, and the impact point.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&TrajectoryPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&TrajectoryPoint> {
        self.points.last()
    }

    /// Time spanned by the emitted points [s]; 0 for degenerate paths.
    pub fn duration(&self) -> f64 {
        match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) => b.time - a.time,
            _ => 0.0,
        }
    }
}
