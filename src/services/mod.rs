pub mod hazard;
pub mod notification;
pub mod physics;

use std::sync::Arc;

use crate::config::Config;
use notification::{AlertNotifier, NullNotifier, TwilioNotifier};

/// Read-only per-process state shared across requests. The notifier is
/// injected so handlers never reach for globals or the environment.
#[derive(Clone)]
pub struct AppState {
    pub notifier: Arc<dyn AlertNotifier>,
    pub alert_phone: Option<String>,
}

impl AppState {
    pub fn new(notifier: Arc<dyn AlertNotifier>, alert_phone: Option<String>) -> Self {
        Self {
            notifier,
            alert_phone,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(build_notifier(config), config.alert_phone.clone())
    }
}

/// Picks the provider-backed notifier when credentials and the
/// messaging-service identity are present, the no-op otherwise.
pub fn build_notifier(config: &Config) -> Arc<dyn AlertNotifier> {
    match &config.twilio {
        Some(twilio) => {
            tracing::info!("SMS alerts enabled via messaging service");
            Arc::new(TwilioNotifier::new(twilio))
        }
        None => {
            tracing::info!("SMS provider not configured, alerts disabled");
            Arc::new(NullNotifier)
        }
    }
}
