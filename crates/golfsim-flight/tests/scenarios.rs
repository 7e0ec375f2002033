//! Reference flight scenarios: seed launches with bounds on the extracted
//! metrics. Bounds are deliberately generous and pin down the physical
//! regime, not exact numbers.

use golfsim_aero::{AeroEngine, ForceModel};
use golfsim_core::{BallProperties, BallState, Environment, SpinState, Vec3, GRAVITY};
use golfsim_flight::{simulate, LaunchConditions, Simulator, TrajectoryMetrics};

fn fly(launch: LaunchConditions, env: &Environment) -> TrajectoryMetrics {
    let props = BallProperties::default();
    let state = launch.initial_state(&props).unwrap();
    let traj = simulate(&state, env, &props).unwrap();
    TrajectoryMetrics::extract(&traj)
}

#[test]
fn standard_driver() {
    // Vertical spin axis: pure sidespin under the shared lift/Magnus
    // direction, so the shot curves hard but gains no aerodynamic height.
    let m = fly(
        LaunchConditions {
            ball_speed: 75.0,
            launch_angle_deg: 12.0,
            launch_direction_deg: 0.0,
            spin_rate_rpm: 2700.0,
            spin_axis: Vec3::y(),
        },
        &Environment::default(),
    );
    assert!(m.carry_distance > 75.0 && m.carry_distance < 155.0, "carry {}", m.carry_distance);
    // Apex is bounded by the vertical launch energy (~12.5 m ballistic).
    assert!(m.max_height > 4.0 && m.max_height < 13.5, "apex {}", m.max_height);
    assert!(m.time_of_flight > 1.8 && m.time_of_flight < 4.5, "tof {}", m.time_of_flight);
    assert!(m.landing_angle_deg > 5.0 && m.landing_angle_deg < 65.0,
        "landing {}", m.landing_angle_deg);
}

#[test]
fn driver_sidespin_curves_the_shot() {
    let props = BallProperties::default();
    let state = LaunchConditions {
        ball_speed: 75.0,
        launch_angle_deg: 12.0,
        launch_direction_deg: 0.0,
        spin_rate_rpm: 2700.0,
        spin_axis: Vec3::y(),
    }
    .initial_state(&props)
    .unwrap();
    let traj = simulate(&state, &Environment::default(), &props).unwrap();
    // Launched down +x; the vertical axis bends it toward +z.
    let landing = traj.last().unwrap().state.position;
    assert!(landing.z > 5.0, "lateral deviation {}", landing.z);
}

#[test]
fn high_spin_iron_balloons() {
    // Backspin (−z) turns the shared direction upward: the iron climbs
    // well past its ballistic apex and drops steeply.
    let m = fly(
        LaunchConditions {
            ball_speed: 55.0,
            launch_angle_deg: 19.0,
            launch_direction_deg: 0.0,
            spin_rate_rpm: 6500.0,
            spin_axis: -Vec3::z(),
        },
        &Environment::default(),
    );
    assert!(m.carry_distance > 40.0 && m.carry_distance < 140.0, "carry {}", m.carry_distance);
    assert!(m.max_height > 10.0 && m.max_height < 55.0, "apex {}", m.max_height);
    assert!(m.time_of_flight > 2.5 && m.time_of_flight < 9.0, "tof {}", m.time_of_flight);
    assert!(m.landing_angle_deg > 20.0 && m.landing_angle_deg < 88.0,
        "landing {}", m.landing_angle_deg);
    // Higher flight than the flat driver strike.
    assert!(m.max_height > 13.0 || m.time_of_flight > 3.5);
}

#[test]
fn vacuum_flight_matches_the_ballistic_closed_form() {
    let props = BallProperties::default();
    let state = LaunchConditions {
        ball_speed: 40.0,
        launch_angle_deg: 30.0,
        launch_direction_deg: 0.0,
        spin_rate_rpm: 2700.0,
        spin_axis: -Vec3::z(),
    }
    .initial_state(&props)
    .unwrap();

    let sim = Simulator::new(AeroEngine::new(ForceModel::Vacuum));
    let traj = sim.run(&state, &Environment::default(), &props).unwrap();
    let m = TrajectoryMetrics::extract(&traj);

    let vy = 40.0 * 30.0_f64.to_radians().sin();
    let tof = 2.0 * vy / GRAVITY;
    let carry = 40.0 * 40.0 * (2.0 * 30.0_f64.to_radians()).sin() / GRAVITY;
    let apex = vy * vy / (2.0 * GRAVITY);

    assert!((m.time_of_flight - tof).abs() / tof < 1e-5, "tof {}", m.time_of_flight);
    assert!((m.carry_distance - carry).abs() / carry < 1e-5, "carry {}", m.carry_distance);
    assert!((m.max_height - apex).abs() / apex < 1e-2, "apex {}", m.max_height);

    // Without aero forces, mechanical energy is conserved to round-off.
    let e0 = traj.first().unwrap().state.mechanical_energy();
    for p in &traj.points {
        assert!((p.state.mechanical_energy() - e0).abs() / e0 < 1e-9);
    }
}

#[test]
fn zero_velocity_lands_immediately() {
    let props = BallProperties::default();
    let initial = BallState {
        position: Vec3::zeros(),
        velocity: Vec3::zeros(),
        spin: SpinState::new(3000.0, Vec3::y()).unwrap(),
        mass: props.mass,
    };
    let traj = simulate(&initial, &Environment::default(), &props).unwrap();
    let m = TrajectoryMetrics::extract(&traj);
    assert_eq!(m.carry_distance, 0.0);
    assert_eq!(m.max_height, 0.0);
    assert!(m.time_of_flight < 0.01, "tof {}", m.time_of_flight);
}

#[test]
fn crosswind_pushes_the_ball_downwind() {
    let props = BallProperties::default();
    let initial = BallState {
        position: Vec3::zeros(),
        velocity: Vec3::new(70.0, 30.0, 0.0),
        spin: SpinState::new(2500.0, -Vec3::z()).unwrap(),
        mass: props.mass,
    };
    let env = Environment {
        wind: Vec3::new(0.0, 0.0, 5.0),
        ..Environment::default()
    };
    let traj = simulate(&initial, &env, &props).unwrap();
    let landing = traj.last().unwrap().state.position;
    assert!(landing.z > 0.5, "crosswind deviation {}", landing.z);
    assert!(landing.x > 0.0);
}

#[test]
fn headwind_shortens_the_carry() {
    let launch = LaunchConditions {
        ball_speed: 65.0,
        launch_angle_deg: 14.0,
        launch_direction_deg: 0.0,
        spin_rate_rpm: 3000.0,
        spin_axis: -Vec3::z(),
    };
    let calm = fly(launch, &Environment::default());
    let headwind = fly(
        launch,
        &Environment {
            wind: Vec3::new(-8.0, 0.0, 0.0),
            ..Environment::default()
        },
    );
    assert!(
        headwind.carry_distance < calm.carry_distance,
        "headwind {} vs calm {}",
        headwind.carry_distance,
        calm.carry_distance
    );
}

#[test]
fn thin_air_lets_the_ball_run() {
    let launch = LaunchConditions::default();
    let sea_level = fly(launch, &Environment::default());
    let altitude = fly(
        launch,
        &Environment {
            altitude_m: 2000.0,
            ..Environment::default()
        },
    );
    // Less drag at altitude: longer carry.
    assert!(
        altitude.carry_distance > sea_level.carry_distance,
        "altitude {} vs sea level {}",
        altitude.carry_distance,
        sea_level.carry_distance
    );
}
