pub mod assessment;

pub use assessment::{ImpactAssessment, OverpressureRing, PredictRequest};
