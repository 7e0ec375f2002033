//! golfsim-aero
//!
//! Aerodynamic force engine: (velocity, spin, ball, environment) → the four
//! force contributions {drag, lift, magnus, gravity}.
//!
//! Model variants are tagged values of one enum, not subclasses. `Full` is
//! the Reynolds/angle-of-attack-corrected model; `Simplified` uses the base
//! coefficients directly (debug/estimation).
//!
//! Conventions:
//! - All forces in Newtons, ground frame, y up.
//! - `v_rel = velocity − wind` is the velocity through the air; drag points
//!   along `−v_rel`.
//! - Lift and Magnus share the direction `(v_rel × spin.axis) / v`: the
//!   cross product scaled by 1/‖v_rel‖, so its magnitude is the sine of the
//!   angle between velocity and spin axis. Spin axis parallel to the
//!   velocity produces no lift and no Magnus, with no special casing.
//! - Gravity is returned mass-multiplied: (0, −m·g, 0). Acceleration is
//!   `forces.total() / mass`; the integrator never adds −g separately.

use golfsim_core::{
    AirColumn, BallProperties, Environment, FlightError, Forces, SpinState, Vec3, GRAVITY,
};
use serde::{Deserialize, Serialize};

/// Reynolds number below which the drag correction is inactive.
const RE_PIVOT: f64 = 1.4e5;
/// Reynolds correction scale.
const RE_SCALE: f64 = 4.0e5;
/// Cap on the Reynolds drag correction.
const RE_DRAG_CAP: f64 = 0.05;
/// Spin rate that normalizes the Magnus coefficient [rpm].
const MAGNUS_REF_SPIN_RPM: f64 = 3000.0;
/// Speed above which the Magnus coefficient rolls off [m/s].
const MAGNUS_REF_SPEED: f64 = 47.5;

/// Coefficient model variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForceModel {
    /// Reynolds- and angle-of-attack-corrected coefficients.
    #[default]
    Full,
    /// Base coefficients, no flow corrections. Magnus still scales with
    /// spin rate so a non-spinning ball stays Magnus-free.
    Simplified,
    /// No aerodynamic forces at all, gravity only (debug/tests). Flights
    /// under this model follow the ballistic closed form.
    Vacuum,
}

/// The aerodynamics engine. One capability: state in, forces out.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct AeroEngine {
    pub model: ForceModel,
}

impl AeroEngine {
    pub fn new(model: ForceModel) -> Self {
        Self { model }
    }

    /// Compute the four force contributions for one state.
    ///
    /// Validates inputs and evaluates the atmosphere on every call; the
    /// integrator's hot loop uses [`AeroEngine::forces_in_air`] with a
    /// per-flight [`AirColumn`] instead.
    pub fn forces(
        &self,
        velocity: Vec3,
        spin: &SpinState,
        props: &BallProperties,
        env: &Environment,
    ) -> Result<Forces, FlightError> {
        props.validate()?;
        if velocity.iter().any(|c| !c.is_finite()) {
            return Err(FlightError::invalid("non-finite velocity component"));
        }
        let air = AirColumn::from_env(env)?;
        Ok(self.forces_in_air(velocity, spin, props, &air, env.wind))
    }

    /// Allocation-free force evaluation against a precomputed atmosphere.
    pub fn forces_in_air(
        &self,
        velocity: Vec3,
        spin: &SpinState,
        props: &BallProperties,
        air: &AirColumn,
        wind: Vec3,
    ) -> Forces {
        let gravity = Vec3::new(0.0, -GRAVITY * props.mass, 0.0);

        let v_rel = velocity - wind;
        let v = v_rel.norm();
        if v < 1e-12 {
            // At rest relative to the air only gravity acts.
            return Forces {
                drag: Vec3::zeros(),
                lift: Vec3::zeros(),
                magnus: Vec3::zeros(),
                gravity,
            };
        }

        let (cd, cl, cm) = self.coefficients(v_rel, v, spin, props, air);

        let q = 0.5 * air.density * v * v;
        let area = props.cross_section();

        let drag = -(v_rel / v) * (q * area * cd);
        // Shared lift/Magnus direction; magnitude sin∠(v_rel, axis).
        let aero_dir = v_rel.cross(&spin.axis) / v;
        let lift = aero_dir * (q * area * cl);
        let magnus = aero_dir * (q * area * cm);

        Forces { drag, lift, magnus, gravity }
    }

    /// Effective (Cd, Cl, Cm) for the current flow state.
    fn coefficients(
        &self,
        v_rel: Vec3,
        v: f64,
        spin: &SpinState,
        props: &BallProperties,
        air: &AirColumn,
    ) -> (f64, f64, f64) {
        let spin_ratio = spin.rate_rpm / MAGNUS_REF_SPIN_RPM;
        match self.model {
            ForceModel::Vacuum => (0.0, 0.0, 0.0),
            ForceModel::Simplified => (
                props.drag_coefficient,
                props.lift_coefficient,
                props.magnus_coefficient * spin_ratio,
            ),
            ForceModel::Full => {
                let reynolds = air.density * v * (2.0 * props.radius) / air.viscosity;
                // Elevation of the air-relative velocity.
                let alpha = v_rel.y.atan2(v_rel.x.hypot(v_rel.z));
                let alpha_deg = alpha.to_degrees().abs();

                let cd = props.drag_coefficient
                    * (1.0 + 0.0015 * alpha_deg)
                    * (1.0 + ((reynolds - RE_PIVOT) / RE_SCALE).clamp(0.0, RE_DRAG_CAP));
                let cl = props.lift_coefficient
                    * (1.0 + 0.25 * (2.0 * alpha).sin())
                    * (1.0 - (alpha_deg / 90.0).powf(1.5)).max(0.0);
                let cm = props.magnus_coefficient
                    * spin_ratio.powf(0.9)
                    * (MAGNUS_REF_SPEED / v).min(1.0).powf(1.1);
                (cd, cl, cm)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn engine() -> AeroEngine {
        AeroEngine::default()
    }

    fn backspin(rate_rpm: f64) -> SpinState {
        // Velocity along +x with axis −z lifts toward +y.
        SpinState::new(rate_rpm, -Vec3::z()).unwrap()
    }

    #[test]
    fn at_rest_only_gravity_acts() {
        let props = BallProperties::default();
        let f = engine()
            .forces(Vec3::zeros(), &backspin(5000.0), &props, &Environment::default())
            .unwrap();
        assert_eq!(f.drag, Vec3::zeros());
        assert_eq!(f.lift, Vec3::zeros());
        assert_eq!(f.magnus, Vec3::zeros());
        assert_relative_eq!(f.gravity.y, -GRAVITY * props.mass, epsilon = 1e-12);
    }

    #[test]
    fn drag_opposes_relative_velocity() {
        let env = Environment {
            wind: Vec3::new(5.0, 0.0, 2.0),
            ..Environment::default()
        };
        let velocity = Vec3::new(60.0, 10.0, -3.0);
        let f = engine()
            .forces(velocity, &backspin(2700.0), &BallProperties::default(), &env)
            .unwrap();
        let v_rel = velocity - env.wind;
        // Antiparallel: normalized dot is −1.
        let cos = f.drag.dot(&v_rel) / (f.drag.norm() * v_rel.norm());
        assert_abs_diff_eq!(cos, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn gravity_ignores_wind() {
        let props = BallProperties::default();
        let calm = engine()
            .forces(Vec3::new(70.0, 10.0, 0.0), &backspin(2700.0), &props, &Environment::default())
            .unwrap();
        let windy_env = Environment {
            wind: Vec3::new(-10.0, 0.0, 8.0),
            ..Environment::default()
        };
        let windy = engine()
            .forces(Vec3::new(70.0, 10.0, 0.0), &backspin(2700.0), &props, &windy_env)
            .unwrap();
        assert_eq!(calm.gravity, windy.gravity);
    }

    #[test]
    fn backspin_lifts_up() {
        let f = engine()
            .forces(
                Vec3::new(70.0, 0.0, 0.0),
                &backspin(2700.0),
                &BallProperties::default(),
                &Environment::default(),
            )
            .unwrap();
        assert!(f.lift.y > 0.0, "lift {:?}", f.lift);
        assert!(f.magnus.y > 0.0, "magnus {:?}", f.magnus);
        // Pure backspin: no lateral component.
        assert_abs_diff_eq!(f.lift.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn no_spin_means_no_magnus() {
        let f = engine()
            .forces(
                Vec3::new(70.0, 10.0, 0.0),
                &SpinState::still(),
                &BallProperties::default(),
                &Environment::default(),
            )
            .unwrap();
        assert_eq!(f.magnus, Vec3::zeros());
    }

    #[test]
    fn axis_parallel_to_velocity_kills_lift() {
        let spin = SpinState::new(4000.0, Vec3::x()).unwrap();
        let f = engine()
            .forces(
                Vec3::new(70.0, 0.0, 0.0),
                &spin,
                &BallProperties::default(),
                &Environment::default(),
            )
            .unwrap();
        assert_abs_diff_eq!(f.lift.norm(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(f.magnus.norm(), 0.0, epsilon = 1e-12);
        // Drag is unaffected.
        assert!(f.drag.norm() > 0.0);
    }

    #[test]
    fn magnus_grows_with_spin() {
        let props = BallProperties::default();
        let env = Environment::default();
        let slow = engine()
            .forces(Vec3::new(60.0, 5.0, 0.0), &backspin(1500.0), &props, &env)
            .unwrap();
        let fast = engine()
            .forces(Vec3::new(60.0, 5.0, 0.0), &backspin(6500.0), &props, &env)
            .unwrap();
        assert!(fast.magnus.norm() > slow.magnus.norm());
    }

    #[test]
    fn reynolds_correction_is_capped() {
        let props = BallProperties::default();
        let env = Environment::default();
        let spin = backspin(2700.0);
        // Level flight: no angle-of-attack inflation, isolates the Re term.
        let f = engine()
            .forces(Vec3::new(90.0, 0.0, 0.0), &spin, &props, &env)
            .unwrap();
        let q = 0.5 * golfsim_core::air_density(&env).unwrap() * 90.0 * 90.0;
        let cd = f.drag.norm() / (q * props.cross_section());
        assert!(cd <= props.drag_coefficient * (1.0 + RE_DRAG_CAP) + 1e-12);
        assert!(cd >= props.drag_coefficient);
    }

    #[test]
    fn simplified_model_uses_base_coefficients() {
        let props = BallProperties::default();
        let env = Environment::default();
        let spin = backspin(MAGNUS_REF_SPIN_RPM);
        let v = 40.0;
        let f = AeroEngine::new(ForceModel::Simplified)
            .forces(Vec3::new(v, 0.0, 0.0), &spin, &props, &env)
            .unwrap();
        let q = 0.5 * golfsim_core::air_density(&env).unwrap() * v * v;
        let area = props.cross_section();
        assert_relative_eq!(f.drag.norm(), q * area * props.drag_coefficient, epsilon = 1e-9);
        assert_relative_eq!(f.lift.norm(), q * area * props.lift_coefficient, epsilon = 1e-9);
        // At the reference spin the Magnus coefficient is the base value.
        assert_relative_eq!(f.magnus.norm(), q * area * props.magnus_coefficient, epsilon = 1e-9);
    }

    #[test]
    fn flipping_the_axis_mirrors_the_curve() {
        let props = BallProperties::default();
        let env = Environment::default();
        let velocity = Vec3::new(70.0, 5.0, 0.0);
        let slice = engine()
            .forces(velocity, &SpinState::new(2700.0, Vec3::y()).unwrap(), &props, &env)
            .unwrap();
        let hook = engine()
            .forces(velocity, &SpinState::new(2700.0, -Vec3::y()).unwrap(), &props, &env)
            .unwrap();
        // Same drag, exactly mirrored side forces.
        assert_eq!(slice.drag, hook.drag);
        assert_eq!(slice.lift, -hook.lift);
        assert_eq!(slice.magnus, -hook.magnus);
        assert!(slice.lift.z > 0.0);
    }

    #[test]
    fn vacuum_model_leaves_only_gravity() {
        let props = BallProperties::default();
        let f = AeroEngine::new(ForceModel::Vacuum)
            .forces(
                Vec3::new(70.0, 10.0, 0.0),
                &backspin(2700.0),
                &props,
                &Environment::default(),
            )
            .unwrap();
        assert_eq!(f.drag, Vec3::zeros());
        assert_eq!(f.lift, Vec3::zeros());
        assert_eq!(f.magnus, Vec3::zeros());
        assert_relative_eq!(f.gravity.y, -GRAVITY * props.mass, epsilon = 1e-12);
    }

    #[test]
    fn rejects_non_finite_velocity() {
        let err = engine().forces(
            Vec3::new(f64::INFINITY, 0.0, 0.0),
            &SpinState::still(),
            &BallProperties::default(),
            &Environment::default(),
        );
        assert!(err.is_err());
    }
}
