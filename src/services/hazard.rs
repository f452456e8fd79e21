//! Hazard tier bucketing and the red-alert rule.

use serde::{Deserialize, Serialize};

/// Severity tier, ascending. Serialized lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardLevel {
    Green,
    Info,
    Watch,
    Warning,
}

impl HazardLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            HazardLevel::Green => "green",
            HazardLevel::Info => "info",
            HazardLevel::Watch => "watch",
            HazardLevel::Warning => "warning",
        }
    }
}

impl std::fmt::Display for HazardLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Buckets a scenario by energy and severe-ring radius. Checked in
/// order, first match wins; both bounds of a rule must hold, so a
/// high-energy/small-radius mix falls through to the next tier.
pub fn classify(energy_mt: f64, r5_km: f64) -> HazardLevel {
    if energy_mt < 0.05 && r5_km < 3.0 {
        return HazardLevel::Green;
    }
    if energy_mt < 0.2 && r5_km < 5.0 {
        return HazardLevel::Info;
    }
    if energy_mt < 1.0 && r5_km < 8.0 {
        return HazardLevel::Watch;
    }
    HazardLevel::Warning
}

/// A scenario is a red alert when it buckets to warning or its severe
/// ring reaches 5 km, whichever comes first.
pub fn is_red_alert(level: HazardLevel, r5_km: f64) -> bool {
    level == HazardLevel::Warning || r5_km >= 5.0
}
