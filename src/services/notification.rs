//! Outbound SMS alerts through the messaging provider.
//!
//! The notifier is an injected dependency of the request handler, so
//! tests swap in a double without touching the environment. When the
//! provider is not configured the service runs with [`NullNotifier`]
//! and alerting degrades to a logged no-op.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::config::TwilioConfig;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider rejected message: status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// One-way alert delivery. Implementations must be safe to call from a
/// detached task: delivery is at-most-once and best-effort, with no
/// retry and no cancellation; a failure is the caller's to log, never
/// to propagate.
#[async_trait]
pub trait AlertNotifier: Send + Sync {
    async fn send(&self, body: &str, to: &str) -> Result<(), NotifyError>;
}

/// Sends SMS through the Twilio Messages API, authenticating with the
/// account SID and auth token and addressing from a messaging service
/// rather than a sender number.
pub struct TwilioNotifier {
    http: reqwest::Client,
    account_sid: String,
    auth_token: String,
    messaging_service_sid: String,
    base_url: String,
}

const TWILIO_API_BASE: &str = "https://api.twilio.com";

impl TwilioNotifier {
    pub fn new(config: &TwilioConfig) -> Self {
        Self::with_base_url(config, TWILIO_API_BASE)
    }

    /// Point the client at a different API host. Tests use this to
    /// target a local mock server.
    pub fn with_base_url(config: &TwilioConfig, base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            messaging_service_sid: config.messaging_service_sid.clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl AlertNotifier for TwilioNotifier {
    async fn send(&self, body: &str, to: &str) -> Result<(), NotifyError> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        );
        let params = [
            ("MessagingServiceSid", self.messaging_service_sid.as_str()),
            ("To", to),
            ("Body", body),
        ];

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let sid = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|v| v.get("sid").and_then(|s| s.as_str().map(String::from)))
            .unwrap_or_default();
        tracing::info!(message_sid = %sid, "alert SMS accepted by provider");
        Ok(())
    }
}

/// Stands in when the provider is unconfigured.
pub struct NullNotifier;

#[async_trait]
impl AlertNotifier for NullNotifier {
    async fn send(&self, _body: &str, to: &str) -> Result<(), NotifyError> {
        tracing::debug!(to = %to, "SMS provider not configured, dropping alert");
        Ok(())
    }
}

/// Runs the notifier on a detached task so delivery never delays the
/// response. Failures are logged and swallowed; if the process exits
/// first the delivery is simply lost.
pub fn dispatch_detached(notifier: Arc<dyn AlertNotifier>, body: String, to: String) {
    tokio::spawn(async move {
        match notifier.send(&body, &to).await {
            Ok(()) => tracing::info!(to = %to, "red alert dispatched"),
            Err(err) => tracing::warn!(to = %to, error = %err, "red alert dispatch failed"),
        }
    });
}
