//! The predict endpoint: one linear pass from parameters to assessment.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::models::{ImpactAssessment, OverpressureRing, PredictRequest};
use crate::models::assessment::ValidationErrors;
use crate::services::notification::dispatch_detached;
use crate::services::{hazard, physics, AppState};

pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<ImpactAssessment>, ValidationErrors> {
    request.validate()?;

    let density = request
        .density_override()
        .unwrap_or_else(|| physics::density_for_composition(&request.composition));

    // Downstream estimates work from the rounded figure the caller sees.
    let energy_mt = physics::round_to(
        physics::impact_energy_megatons(request.diameter_m, request.speed_kms, density),
        3,
    );
    let (mode, breakup_altitude_km) =
        physics::select_entry_mode(request.entry_angle_deg, request.speed_kms);
    let (r5, r3, r1) = physics::overpressure_radii(energy_mt, &request.surface);
    let hazard_level = hazard::classify(energy_mt, r5);
    let red_alert = hazard::is_red_alert(hazard_level, r5);

    if red_alert {
        let body = format!(
            "RED ALERT\nHazard: {}\nEnergy: {} Mt TNT\nSevere radius: {} km\nMode: {}\nLocation: lat {}, lon {}",
            hazard_level.as_str().to_uppercase(),
            energy_mt,
            r5,
            mode,
            request.lat,
            request.lon,
        );
        match &state.alert_phone {
            Some(to) => dispatch_detached(state.notifier.clone(), body, to.clone()),
            None => tracing::warn!("red alert raised but no alert destination configured"),
        }
    }

    Ok(Json(ImpactAssessment {
        energy_megatons: energy_mt,
        breakup_altitude_km,
        mode,
        hazard_level,
        red_alert,
        overpressure: vec![
            OverpressureRing {
                threshold: "5 psi".to_string(),
                radius_km: r5,
            },
            OverpressureRing {
                threshold: "3 psi".to_string(),
                radius_km: r3,
            },
            OverpressureRing {
                threshold: "1 psi".to_string(),
                radius_km: r1,
            },
        ],
    }))
}
