//! Trajectory interpolation and resampling.
//!
//! Shape comparison aligns two flights by *time fraction* of each one's own
//! duration, not absolute time, so flights of slightly different lengths
//! compare by shape.

use golfsim_core::{BallState, Forces, SpinState, Trajectory, TrajectoryPoint, Vec3};

/// Linearly interpolate a trajectory sample at time `t`.
///
/// Every numeric field interpolates (position, velocity, spin rate, spin
/// axis components, forces); queries outside the time range clamp to the
/// endpoints. `None` only for an empty point list.
pub fn sample_at_time(points: &[TrajectoryPoint], t: f64) -> Option<TrajectoryPoint> {
    let first = points.first()?;
    let last = points.last()?;
    if t <= first.time {
        return Some(*first);
    }
    if t >= last.time {
        return Some(*last);
    }

    // First index with time >= t.
    let idx = match points.binary_search_by(|p| p.time.partial_cmp(&t).unwrap()) {
        Ok(i) => i,
        Err(i) => i,
    };
    let a = &points[idx - 1];
    let b = &points[idx];
    let span = (b.time - a.time).max(1e-12);
    let u = (t - a.time) / span;
    Some(lerp_point(a, b, t, u))
}

/// Positions at `samples` evenly spaced time fractions of the trajectory's
/// own duration. Empty input yields an empty vector.
pub fn resample_positions(trajectory: &Trajectory, samples: usize) -> Vec<Vec3> {
    let points = &trajectory.points;
    if samples == 0 {
        return Vec::new();
    }
    let Some(first) = points.first() else {
        return Vec::new();
    };
    let duration = trajectory.duration();
    let denom = (samples - 1).max(1) as f64;
    (0..samples)
        .map(|i| {
            let fraction = i as f64 / denom;
            let t = first.time + fraction * duration;
            // Non-empty by the guard above.
            sample_at_time(points, t).unwrap().state.position
        })
        .collect()
}

fn lerp(a: f64, b: f64, u: f64) -> f64 {
    a + (b - a) * u
}

fn lerp_vec(a: Vec3, b: Vec3, u: f64) -> Vec3 {
    a + (b - a) * u
}

fn lerp_point(a: &TrajectoryPoint, b: &TrajectoryPoint, t: f64, u: f64) -> TrajectoryPoint {
    TrajectoryPoint {
        time: t,
        state: BallState {
            position: lerp_vec(a.state.position, b.state.position, u),
            velocity: lerp_vec(a.state.velocity, b.state.velocity, u),
            spin: SpinState {
                rate_rpm: lerp(a.state.spin.rate_rpm, b.state.spin.rate_rpm, u),
                axis: lerp_vec(a.state.spin.axis, b.state.spin.axis, u),
            },
            mass: a.state.mass,
        },
        forces: Forces {
            drag: lerp_vec(a.forces.drag, b.forces.drag, u),
            lift: lerp_vec(a.forces.lift, b.forces.lift, u),
            magnus: lerp_vec(a.forces.magnus, b.forces.magnus, u),
            gravity: lerp_vec(a.forces.gravity, b.forces.gravity, u),
        },
    }
}
