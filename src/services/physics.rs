//! Closed-form impact physics: density lookup, kinetic energy,
//! entry-mode selection, and overpressure ring radii.
//!
//! Every function here is total over validated inputs; validation
//! happens in the request layer before any of this runs.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub const DENSITY_STONY_KG_M3: f64 = 3000.0;
pub const DENSITY_IRON_KG_M3: f64 = 7800.0;
pub const DENSITY_COMET_KG_M3: f64 = 600.0;

/// TNT equivalence, joules per megaton.
const JOULES_PER_MEGATON: f64 = 4.184e15;

/// Shallow, fast entries break up high in the atmosphere.
const AIRBURST_MAX_ANGLE_DEG: f64 = 25.0;
const AIRBURST_MIN_SPEED_KMS: f64 = 15.0;
const AIRBURST_BREAKUP_ALTITUDE_KM: f64 = 25.0;

/// Bounds on the radius scaling factor k = energy^0.35. The lower bound
/// keeps near-zero energies from collapsing the rings, the upper bound
/// caps extreme energies at a physically plausible footprint.
const RADIUS_SCALE_EXPONENT: f64 = 0.35;
const RADIUS_SCALE_MIN: f64 = 0.5;
const RADIUS_SCALE_MAX: f64 = 12.0;

/// Blast couples more efficiently over land than water.
const LAND_SURFACE_MULTIPLIER: f64 = 1.2;

/// Empirical ring coefficients for the 5/3/1 psi thresholds.
const RING_COEFF_5PSI: f64 = 6.0;
const RING_COEFF_3PSI: f64 = 10.0;
const RING_COEFF_1PSI: f64 = 18.0;

/// How the impactor delivers its energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryMode {
    #[serde(rename = "airburst")]
    Airburst,
    #[serde(rename = "ground impact")]
    GroundImpact,
}

impl EntryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryMode::Airburst => "airburst",
            EntryMode::GroundImpact => "ground impact",
        }
    }
}

impl std::fmt::Display for EntryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mass density for a composition label, case-insensitive.
/// Unknown or empty labels fall back to stony.
pub fn density_for_composition(label: &str) -> f64 {
    match label.trim().to_ascii_lowercase().as_str() {
        "stony" => DENSITY_STONY_KG_M3,
        "iron" => DENSITY_IRON_KG_M3,
        "comet" => DENSITY_COMET_KG_M3,
        _ => DENSITY_STONY_KG_M3,
    }
}

/// Kinetic energy of a spherical impactor in megatons TNT equivalent.
pub fn impact_energy_megatons(diameter_m: f64, speed_kms: f64, density_kg_m3: f64) -> f64 {
    let radius = diameter_m / 2.0;
    let volume = (4.0 / 3.0) * PI * radius.powi(3);
    let mass = volume * density_kg_m3;
    let speed_ms = speed_kms * 1000.0;
    let energy_joules = 0.5 * mass * speed_ms.powi(2);
    energy_joules / JOULES_PER_MEGATON
}

/// Picks airburst or ground impact from entry geometry, returning the
/// mode and its breakup altitude in km.
pub fn select_entry_mode(entry_angle_deg: f64, speed_kms: f64) -> (EntryMode, f64) {
    if entry_angle_deg < AIRBURST_MAX_ANGLE_DEG && speed_kms > AIRBURST_MIN_SPEED_KMS {
        (EntryMode::Airburst, AIRBURST_BREAKUP_ALTITUDE_KM)
    } else {
        (EntryMode::GroundImpact, 0.0)
    }
}

/// Overpressure ring radii in km for the 5, 3, and 1 psi thresholds,
/// in that order. Radii are strictly increasing across the triple since
/// the coefficients are and they share the same scale factor.
pub fn overpressure_radii(energy_mt: f64, surface: &str) -> (f64, f64, f64) {
    let k = energy_mt
        .powf(RADIUS_SCALE_EXPONENT)
        .clamp(RADIUS_SCALE_MIN, RADIUS_SCALE_MAX);
    let s = if surface.trim().eq_ignore_ascii_case("land") {
        LAND_SURFACE_MULTIPLIER
    } else {
        1.0
    };
    (
        round_to(k * RING_COEFF_5PSI * s, 2),
        round_to(k * RING_COEFF_3PSI * s, 2),
        round_to(k * RING_COEFF_1PSI * s, 2),
    )
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
