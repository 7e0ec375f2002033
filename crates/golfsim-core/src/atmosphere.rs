//! Atmosphere model.
//!
//! Air density from temperature, pressure, altitude and humidity; dynamic
//! viscosity from temperature. Both are pure functions of the
//! `Environment`; the integrator precomputes them once per flight as an
//! `AirColumn` and reuses that in the hot loop.

use crate::error::FlightError;
use crate::Vec3;
use serde::{Deserialize, Serialize};

/// Specific gas constant for dry air [J/(kg·K)].
const R_DRY: f64 = 287.058;
/// ISA temperature lapse rate [K/m].
const LAPSE_RATE: f64 = 0.0065;
/// ISA sea-level temperature [K].
const SEA_LEVEL_TEMP_K: f64 = 288.15;
/// Gravitational acceleration used by the lapse model [m/s²].
const G: f64 = 9.81;
/// Relative density reduction of saturated air vs. dry air at like conditions.
const SATURATION_DENSITY_DROP: f64 = 0.016;
/// Reference dynamic viscosity at 288.15 K [Pa·s].
const MU_REF: f64 = 1.81e-5;

/// Ambient conditions, constant for the duration of one flight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Air temperature [°C].
    pub temperature_c: f64,
    /// Station pressure [Pa].
    pub pressure_pa: f64,
    /// Relative humidity, 0..1.
    pub humidity: f64,
    /// Altitude above sea level [m].
    pub altitude_m: f64,
    /// Wind velocity [m/s], ground frame.
    pub wind: Vec3,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            temperature_c: 20.0,
            pressure_pa: 101_325.0,
            humidity: 0.5,
            altitude_m: 0.0,
            wind: Vec3::zeros(),
        }
    }
}

impl Environment {
    /// Absolute temperature [K].
    pub fn temperature_k(&self) -> f64 {
        self.temperature_c + 273.15
    }

    /// Reject environments the atmosphere model is undefined for.
    pub fn validate(&self) -> Result<(), FlightError> {
        if !self.temperature_c.is_finite()
            || !self.pressure_pa.is_finite()
            || !self.humidity.is_finite()
            || !self.altitude_m.is_finite()
        {
            return Err(FlightError::invalid("non-finite environment field"));
        }
        if self.temperature_k() <= 0.0 {
            return Err(FlightError::invalid(format!(
                "absolute temperature must be positive, got {} K",
                self.temperature_k()
            )));
        }
        if self.pressure_pa <= 0.0 {
            return Err(FlightError::invalid(format!(
                "pressure must be positive, got {} Pa",
                self.pressure_pa
            )));
        }
        if !(0.0..=1.0).contains(&self.humidity) {
            return Err(FlightError::invalid(format!(
                "humidity must be within 0..1, got {}",
                self.humidity
            )));
        }
        if self.wind.iter().any(|c| !c.is_finite()) {
            return Err(FlightError::invalid("non-finite wind component"));
        }
        Ok(())
    }
}

/// Air density [kg/m³].
///
/// Ideal-gas density at station temperature/pressure, thinned by the ISA
/// lapse model above sea level and reduced linearly by humidity (saturated
/// air is ~1.6 % lighter than dry air at like conditions).
pub fn air_density(env: &Environment) -> Result<f64, FlightError> {
    env.validate()?;
    let t_k = env.temperature_k();
    let mut rho = env.pressure_pa / (R_DRY * t_k);

    if env.altitude_m > 0.0 {
        let base = 1.0 - LAPSE_RATE * env.altitude_m / SEA_LEVEL_TEMP_K;
        if base <= 0.0 {
            return Err(FlightError::invalid(format!(
                "altitude {} m is outside the lapse-rate model",
                env.altitude_m
            )));
        }
        rho *= base.powf(G / (R_DRY * LAPSE_RATE) - 1.0);
    }

    rho *= 1.0 - SATURATION_DENSITY_DROP * env.humidity;
    Ok(rho)
}

/// Dynamic viscosity [Pa·s], power-law fit in absolute temperature.
pub fn dynamic_viscosity(env: &Environment) -> Result<f64, FlightError> {
    env.validate()?;
    Ok(MU_REF * (env.temperature_k() / SEA_LEVEL_TEMP_K).powf(0.76))
}

/// Reference height of the wind-shear power law [m].
const WIND_REF_HEIGHT: f64 = 10.0;
/// Open-terrain wind-shear exponent.
const WIND_SHEAR_EXPONENT: f64 = 0.2;
/// Height floor for the shear law [m].
const WIND_MIN_HEIGHT: f64 = 1.0;
/// Cap on wind amplification aloft.
const WIND_MAX_MULTIPLIER: f64 = 1.7;

/// Wind at altitude from a reference-height measurement, power-law shear.
///
/// Stand-alone helper: callers may use it to adjust `Environment::wind`
/// before a simulation. The integrator itself sees wind as a constant;
/// time-varying or stochastic wind stays outside the ODE.
pub fn wind_at_height(base_wind: Vec3, height_m: f64) -> Vec3 {
    let h = height_m.max(WIND_MIN_HEIGHT);
    let multiplier = (h / WIND_REF_HEIGHT)
        .powf(WIND_SHEAR_EXPONENT)
        .clamp(1.0, WIND_MAX_MULTIPLIER);
    base_wind * multiplier
}

/// Precomputed air properties, evaluated once per flight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AirColumn {
    /// Air density [kg/m³].
    pub density: f64,
    /// Dynamic viscosity [Pa·s].
    pub viscosity: f64,
}

impl AirColumn {
    /// Evaluate the atmosphere for `env`.
    pub fn from_env(env: &Environment) -> Result<Self, FlightError> {
        Ok(Self {
            density: air_density(env)?,
            viscosity: dynamic_viscosity(env)?,
        })
    }
}
