//! golfsim-flight
//!
//! The flight solver: launch-parameter conversion, adaptive RK4 integration
//! of the ball's equations of motion until ground impact, and reduction of
//! an emitted trajectory to scalar metrics.
//!
//! The solver is a pure function of its inputs: no shared state, no I/O,
//! no randomness. Concurrency belongs to the caller; independent flights
//! on disjoint inputs can run in parallel freely.

pub mod integrator;
pub mod launch;
pub mod metrics;

pub use integrator::{simulate, SimOptions, Simulator};
pub use launch::LaunchConditions;
pub use metrics::TrajectoryMetrics;
