//! Outbound SMS notifications.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::constants::{TWILIO_API_BASE, USER_AGENT};
use crate::models::TwilioErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("{0} is not configured")]
    MissingConfig(&'static str),
    #[error("Network error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Messaging API error {status}: {message}")]
    Api { status: u16, message: String },
}

/// Anything that can deliver a short text message to the configured recipient.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, body: &str) -> Result<(), NotifyError>;
}

/// Credentials and numbers for the Twilio Messages API
#[derive(Debug, Clone, Default)]
pub struct TwilioSettings {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    pub from_number: Option<String>,
    pub to_number: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Clone)]
pub struct TwilioNotifier {
    client: Arc<Client>,
    settings: TwilioSettings,
}

impl TwilioNotifier {
    pub fn new(settings: TwilioSettings, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            settings,
        })
    }
}

fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, NotifyError> {
    value.as_deref().ok_or(NotifyError::MissingConfig(name))
}

#[async_trait]
impl Notifier for TwilioNotifier {
    async fn send(&self, body: &str) -> Result<(), NotifyError> {
        let sid = required(&self.settings.account_sid, "TWILIO_SID")?;
        let token = required(&self.settings.auth_token, "TWILIO_AUTH_TOKEN")?;
        let from = required(&self.settings.from_number, "TWILIO_NUMBER")?;
        let to = required(&self.settings.to_number, "TO_NUMBER")?;
        let base = self.settings.base_url.as_deref().unwrap_or(TWILIO_API_BASE);

        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            base.trim_end_matches('/'),
            sid
        );

        let response = self
            .client
            .post(&url)
            .basic_auth(sid, Some(token))
            .form(&[("To", to), ("From", from), ("Body", body)])
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status().as_u16();
        let message = response
            .json::<TwilioErrorResponse>()
            .await
            .ok()
            .and_then(|e| e.message)
            .unwrap_or_else(|| "Unknown error".to_string());
        Err(NotifyError::Api { status, message })
    }
}
