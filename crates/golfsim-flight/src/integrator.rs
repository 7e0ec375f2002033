//! Adaptive flight integrator.
//!
//! Classical RK4 on the 6-dimensional (position, velocity) state with
//! step-doubling error control: each trial runs one full step and two half
//! steps; the max-norm of the per-component position difference is the
//! error estimate and the two-half-step result is the accepted state.
//!
//! Spin rate decays in closed form per accepted step,
//! `rate ← rate · exp(−k·dt)`; the spin axis is fixed for the flight.
//!
//! Ground impact is bracketed by bisection over the crossing step, probing
//! with an auxiliary fixed-step RK4 from the saved pre-step state. The
//! impact point is emitted with y snapped to exactly 0.
//!
//! The hot loop allocates nothing: stage derivatives live in a scratch
//! struct owned by the stepper, and trajectory points are deep-copied only
//! at emission.

use golfsim_aero::AeroEngine;
use golfsim_core::{
    AirColumn, BallProperties, BallState, Environment, FlightError, SpinState, Trajectory,
    TrajectoryPoint, Vec3,
};

/// Integration options.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimOptions {
    /// Smallest accepted step [s].
    pub dt_min: f64,
    /// Largest accepted step [s]; also the auxiliary probe step.
    pub dt_max: f64,
    /// Per-step position tolerance [m].
    pub tolerance: f64,
    /// Flight-time ceiling [s]; reaching it ends the flight without error.
    pub max_time: f64,
    /// Minimum distance between emitted interior points [m].
    pub emit_spacing: f64,
    /// Impact bisection height tolerance [m].
    pub impact_tolerance: f64,
    /// Impact bisection iteration cap.
    pub impact_max_iter: usize,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt_min: 1e-4,
            dt_max: 1e-3,
            tolerance: 1e-6,
            max_time: 60.0,
            emit_spacing: 0.1,
            impact_tolerance: 1e-6,
            impact_max_iter: 20,
        }
    }
}

/// Simulate a flight with the default force model and options.
pub fn simulate(
    initial: &BallState,
    env: &Environment,
    props: &BallProperties,
) -> Result<Trajectory, FlightError> {
    Simulator::default().run(initial, env, props)
}

/// A configured flight solver. Cheap to copy; holds no per-flight state.
#[derive(Clone, Copy, Debug, Default)]
pub struct Simulator {
    engine: AeroEngine,
    opts: SimOptions,
}

impl Simulator {
    pub fn new(engine: AeroEngine) -> Self {
        Self { engine, opts: SimOptions::default() }
    }

    pub fn with_options(engine: AeroEngine, opts: SimOptions) -> Self {
        Self { engine, opts }
    }

    pub fn options(&self) -> &SimOptions {
        &self.opts
    }

    /// Advance `initial` through `env` until ground impact or the time
    /// ceiling. Inputs are validated once here; the loop itself only
    /// checks for divergence.
    ///
    /// The ball's mass is taken from `props`; `initial.mass` is validated
    /// but the properties are the source of truth for the physics.
    pub fn run(
        &self,
        initial: &BallState,
        env: &Environment,
        props: &BallProperties,
    ) -> Result<Trajectory, FlightError> {
        initial.validate()?;
        props.validate()?;
        let air = AirColumn::from_env(env)?;

        let mut stepper = Stepper {
            engine: self.engine,
            opts: self.opts,
            props,
            air,
            wind: env.wind,
            scratch: RkScratch::default(),
        };
        stepper.fly(initial)
    }
}

/* ------------------------------- internals ------------------------------- */

/// The 6-dimensional integration state.
#[derive(Clone, Copy, Debug)]
struct PointMass {
    position: Vec3,
    velocity: Vec3,
}

impl PointMass {
    fn is_finite(&self) -> bool {
        self.position.iter().all(|c| c.is_finite()) && self.velocity.iter().all(|c| c.is_finite())
    }
}

/// One derivative evaluation: ṗ = v, v̇ = ΣF/m.
#[derive(Clone, Copy, Debug, Default)]
struct Deriv {
    dpos: Vec3,
    dvel: Vec3,
}

/// Stage buffers reused across every step of a flight.
#[derive(Clone, Copy, Debug, Default)]
struct RkScratch {
    k1: Deriv,
    k2: Deriv,
    k3: Deriv,
    k4: Deriv,
}

/// Per-flight context: options, precomputed atmosphere, scratch buffers.
struct Stepper<'a> {
    engine: AeroEngine,
    opts: SimOptions,
    props: &'a BallProperties,
    air: AirColumn,
    wind: Vec3,
    scratch: RkScratch,
}

impl Stepper<'_> {
    fn fly(&mut self, initial: &BallState) -> Result<Trajectory, FlightError> {
        let mut pm = PointMass {
            position: initial.position,
            velocity: initial.velocity,
        };
        let mut spin = initial.spin;
        let mut t = 0.0;
        let mut dt = self.opts.dt_max;

        let mut trajectory = Trajectory::default();
        trajectory.points.push(self.sample(t, &pm, &spin));
        let mut last_emitted = pm.position;

        while t < self.opts.max_time {
            let full = self.rk4_step(pm, &spin, dt);
            let half = self.rk4_step(pm, &spin, 0.5 * dt);
            let fine = self.rk4_step(half, &spin, 0.5 * dt);
            let err = (full.position - fine.position).amax();

            if err > self.opts.tolerance && dt > self.opts.dt_min {
                dt = (0.5 * dt).max(self.opts.dt_min);
                continue;
            }

            // Accepted. Grow the step for the next trial when comfortably
            // inside tolerance.
            let step = dt;
            if err < 0.1 * self.opts.tolerance {
                dt = (2.0 * dt).min(self.opts.dt_max);
            }

            if !fine.is_finite() {
                return Err(FlightError::IntegrationDivergence {
                    time: t,
                    last: Box::new(self.snapshot(&pm, &spin)),
                });
            }

            if fine.position.y <= 0.0 {
                let impact = self.bracket_impact(pm, &spin, t, step);
                trajectory.points.push(impact);
                return Ok(trajectory);
            }

            pm = fine;
            t += step;
            spin.rate_rpm *= (-self.props.spin_decay_rate * step).exp();

            if (pm.position - last_emitted).norm() > self.opts.emit_spacing {
                trajectory.points.push(self.sample(t, &pm, &spin));
                last_emitted = pm.position;
            }
        }

        // Ran out the clock airborne: emit what we have plus the final
        // state so time-of-flight reflects the elapsed time. Not an error.
        if trajectory.points.last().map_or(true, |p| t > p.time) {
            trajectory.points.push(self.sample(t, &pm, &spin));
        }
        Ok(trajectory)
    }

    /// Locate the ground crossing inside the accepted step `[t0, t0+dt]`
    /// by bisection and return the impact point, y snapped to exactly 0.
    fn bracket_impact(
        &mut self,
        pre: PointMass,
        spin: &SpinState,
        t0: f64,
        dt: f64,
    ) -> TrajectoryPoint {
        let mut lo = 0.0;
        let mut hi = dt;
        let mut mid = 0.5 * dt;
        let mut probe = self.advance_fixed(pre, spin, mid);
        let mut converged = probe.position.y.abs() < self.opts.impact_tolerance;
        let mut iterations = 1;

        while !converged && iterations < self.opts.impact_max_iter {
            if probe.position.y > 0.0 {
                lo = mid;
            } else {
                hi = mid;
            }
            mid = 0.5 * (lo + hi);
            probe = self.advance_fixed(pre, spin, mid);
            converged = probe.position.y.abs() < self.opts.impact_tolerance;
            iterations += 1;
        }

        if !converged {
            log::warn!(
                "impact bisection hit the {}-iteration cap at t = {:.6} s (y = {:.3e} m); accepting midpoint",
                self.opts.impact_max_iter,
                t0 + mid,
                probe.position.y,
            );
        }

        probe.position.y = 0.0;
        let mut impact_spin = *spin;
        impact_spin.rate_rpm *= (-self.props.spin_decay_rate * mid).exp();
        self.sample(t0 + mid, &probe, &impact_spin)
    }

    /// Auxiliary fixed-step advancement used by the bisection probes.
    fn advance_fixed(&mut self, start: PointMass, spin: &SpinState, tau: f64) -> PointMass {
        let mut pm = start;
        let mut remaining = tau;
        while remaining > 1e-15 {
            let h = remaining.min(self.opts.dt_max);
            pm = self.rk4_step(pm, spin, h);
            remaining -= h;
        }
        pm
    }

    fn rk4_step(&mut self, s: PointMass, spin: &SpinState, dt: f64) -> PointMass {
        let k1 = self.deriv(&s, spin);
        self.scratch.k1 = k1;
        let k2 = self.deriv(&advanced(&s, &k1, 0.5 * dt), spin);
        self.scratch.k2 = k2;
        let k3 = self.deriv(&advanced(&s, &k2, 0.5 * dt), spin);
        self.scratch.k3 = k3;
        let k4 = self.deriv(&advanced(&s, &k3, dt), spin);
        self.scratch.k4 = k4;

        let sixth = dt / 6.0;
        PointMass {
            position: s.position
                + (k1.dpos + 2.0 * k2.dpos + 2.0 * k3.dpos + k4.dpos) * sixth,
            velocity: s.velocity
                + (k1.dvel + 2.0 * k2.dvel + 2.0 * k3.dvel + k4.dvel) * sixth,
        }
    }

    fn deriv(&self, pm: &PointMass, spin: &SpinState) -> Deriv {
        let forces = self
            .engine
            .forces_in_air(pm.velocity, spin, self.props, &self.air, self.wind);
        Deriv {
            dpos: pm.velocity,
            dvel: forces.total() / self.props.mass,
        }
    }

    /// Deep-copied emission snapshot with a fresh force evaluation.
    fn sample(&self, time: f64, pm: &PointMass, spin: &SpinState) -> TrajectoryPoint {
        let forces = self
            .engine
            .forces_in_air(pm.velocity, spin, self.props, &self.air, self.wind);
        TrajectoryPoint {
            time,
            state: self.snapshot(pm, spin),
            forces,
        }
    }

    fn snapshot(&self, pm: &PointMass, spin: &SpinState) -> BallState {
        BallState {
            position: pm.position,
            velocity: pm.velocity,
            spin: *spin,
            mass: self.props.mass,
        }
    }
}

fn advanced(s: &PointMass, k: &Deriv, h: f64) -> PointMass {
    PointMass {
        position: s.position + k.dpos * h,
        velocity: s.velocity + k.dvel * h,
    }
}
