//! Request and response models for the predict endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::services::hazard::HazardLevel;
use crate::services::physics::EntryMode;

/// Impact parameters as posted by the caller. `type` is a free-form
/// composition label; unknown labels are legal and resolve to the stony
/// default density downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    #[serde(rename = "type")]
    pub composition: String,
    pub diameter_m: f64,
    pub speed_kms: f64,
    pub entry_angle_deg: f64,
    pub lat: f64,
    pub lon: f64,
    pub surface: String,
    #[serde(default)]
    pub density_kg_m3: Option<f64>,
}

impl PredictRequest {
    /// Range-checks every field, collecting all violations so the
    /// caller sees the full list in one response.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        if !(self.diameter_m > 0.0) {
            errors.push(FieldError::new("diameter_m", "must be greater than 0"));
        }
        if !(self.speed_kms > 0.0) {
            errors.push(FieldError::new("speed_kms", "must be greater than 0"));
        }
        if !(self.entry_angle_deg > 0.0 && self.entry_angle_deg <= 90.0) {
            errors.push(FieldError::new(
                "entry_angle_deg",
                "must be greater than 0 and at most 90",
            ));
        }
        if !(self.lat >= -90.0 && self.lat <= 90.0) {
            errors.push(FieldError::new("lat", "must be between -90 and 90"));
        }
        if !(self.lon >= -180.0 && self.lon <= 180.0) {
            errors.push(FieldError::new("lon", "must be between -180 and 180"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { errors })
        }
    }

    /// Explicit density override, if one was supplied and is usable.
    /// Zero and negative overrides fall back to the composition lookup.
    pub fn density_override(&self) -> Option<f64> {
        self.density_kg_m3.filter(|density| *density > 0.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Per-field validation failures, rendered as a 422 with the full list.
#[derive(Debug)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl IntoResponse for ValidationErrors {
    fn into_response(self) -> Response {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "errors": self.errors })),
        )
            .into_response()
    }
}

/// One blast ring: the radius within which overpressure exceeds the
/// labeled threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverpressureRing {
    pub threshold: String,
    pub radius_km: f64,
}

/// Assessment returned to the caller. Built fresh per request, never
/// persisted. Rings are ordered 5 psi, 3 psi, 1 psi: descending
/// threshold, ascending radius.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactAssessment {
    pub energy_megatons: f64,
    pub breakup_altitude_km: f64,
    pub mode: EntryMode,
    pub hazard_level: HazardLevel,
    pub red_alert: bool,
    pub overpressure: Vec<OverpressureRing>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> PredictRequest {
        PredictRequest {
            composition: "stony".to_string(),
            diameter_m: 100.0,
            speed_kms: 20.0,
            entry_angle_deg: 45.0,
            lat: 17.4,
            lon: 78.5,
            surface: "land".to_string(),
            density_kg_m3: None,
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn collects_every_violation() {
        let request = PredictRequest {
            diameter_m: -1.0,
            speed_kms: 0.0,
            entry_angle_deg: 95.0,
            lat: 91.0,
            lon: -181.0,
            ..valid_request()
        };

        let errors = request.validate().unwrap_err().errors;
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["diameter_m", "speed_kms", "entry_angle_deg", "lat", "lon"]
        );
    }

    #[test]
    fn angle_boundaries() {
        let at_ninety = PredictRequest {
            entry_angle_deg: 90.0,
            ..valid_request()
        };
        assert!(at_ninety.validate().is_ok());

        let at_zero = PredictRequest {
            entry_angle_deg: 0.0,
            ..valid_request()
        };
        assert!(at_zero.validate().is_err());
    }

    #[test]
    fn latitude_and_longitude_bounds_are_inclusive() {
        let request = PredictRequest {
            lat: -90.0,
            lon: 180.0,
            ..valid_request()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn nonpositive_density_override_is_ignored() {
        let zero = PredictRequest {
            density_kg_m3: Some(0.0),
            ..valid_request()
        };
        assert_eq!(zero.density_override(), None);

        let negative = PredictRequest {
            density_kg_m3: Some(-5.0),
            ..valid_request()
        };
        assert_eq!(negative.density_override(), None);

        let set = PredictRequest {
            density_kg_m3: Some(5500.0),
            ..valid_request()
        };
        assert_eq!(set.density_override(), Some(5500.0));
    }

    #[test]
    fn request_deserializes_type_field() {
        let request: PredictRequest = serde_json::from_str(
            r#"{"type":"iron","diameter_m":50,"speed_kms":25,"entry_angle_deg":30,
                "lat":10.0,"lon":20.0,"surface":"water"}"#,
        )
        .unwrap();
        assert_eq!(request.composition, "iron");
        assert_eq!(request.density_kg_m3, None);
    }
}
