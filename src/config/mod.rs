use anyhow::Context;
use std::env;

const DEFAULT_PORT: u16 = 8000;

/// Process configuration, read once at startup. Provider settings are
/// optional: without them the alert dispatcher degrades to a no-op,
/// never a startup failure.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Explicit CORS allow-list; `None` means permissive wildcard.
    pub allowed_origins: Option<Vec<String>>,
    pub twilio: Option<TwilioConfig>,
    /// Default destination for red-alert SMS.
    pub alert_phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub messaging_service_sid: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match env::var("PORT") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("Invalid PORT value: {}", value))?,
            Err(_) => DEFAULT_PORT,
        };

        let allowed_origins = non_empty(env::var("ALLOWED_ORIGINS").ok()).map(|value| {
            value
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect::<Vec<_>>()
        });
        let allowed_origins = allowed_origins.filter(|origins| !origins.is_empty());

        let twilio = match (
            non_empty(env::var("TWILIO_ACCOUNT_SID").ok()),
            non_empty(env::var("TWILIO_AUTH_TOKEN").ok()),
            non_empty(env::var("TWILIO_MESSAGING_SERVICE_SID").ok()),
        ) {
            (Some(account_sid), Some(auth_token), Some(messaging_service_sid)) => {
                Some(TwilioConfig {
                    account_sid,
                    auth_token,
                    messaging_service_sid,
                })
            }
            _ => None,
        };

        Ok(Config {
            port,
            allowed_origins,
            twilio,
            alert_phone: non_empty(env::var("ALERT_PHONE").ok()),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
