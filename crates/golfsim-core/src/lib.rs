//! Core golf flight utilities
//!
//! Includes:
//! - Units & conversions (SI at the boundary, rpm/degrees converted here)
//! - Atmosphere calculations (density, viscosity)
//! - Ball / environment / trajectory state types
//! - The shared error taxonomy

pub mod atmosphere;
pub mod error;
pub mod state;
pub mod units;

pub use atmosphere::{air_density, dynamic_viscosity, wind_at_height, AirColumn, Environment};
pub use error::FlightError;
pub use state::{BallProperties, BallState, Forces, SpinState, Trajectory, TrajectoryPoint};

/// 3-component vector used throughout the workspace (meters / m/s / Newtons).
pub type Vec3 = nalgebra::Vector3<f64>;

/// Gravitational acceleration [m/s²].
pub const GRAVITY: f64 = 9.81;
