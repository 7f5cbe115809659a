//! SMS delivery through Twilio's Messages API.

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::timeout;

use crate::alerting::notifier::{Alert, AlertError, Notifier};
use crate::config::MessagingConfig;

/// [`Notifier`] that sends one SMS per alert.
#[derive(Clone)]
pub struct TwilioNotifier {
    http: reqwest::Client,
    messages_url: String,
    account_sid: String,
    auth_token: String,
    from: String,
    to: String,
    timeout_secs: u64,
}

impl TwilioNotifier {
    pub fn new(config: &MessagingConfig) -> Result<Self, AlertError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("sigwatch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            messages_url: format!(
                "{}/2010-04-01/Accounts/{}/Messages.json",
                config.api_base_url.trim_end_matches('/'),
                config.account_sid
            ),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from: config.from.clone(),
            to: config.to.clone(),
            timeout_secs: config.request_timeout_secs,
        })
    }

    pub fn messages_url(&self) -> &str {
        &self.messages_url
    }

    async fn post_message(&self, body: &str) -> Result<(), AlertError> {
        let form = [("To", self.to.as_str()), ("From", self.from.as_str()), ("Body", body)];
        let response = self
            .http
            .post(&self.messages_url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(AlertError::Rejected {
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl Notifier for TwilioNotifier {
    async fn send_alert(&self, alert: &Alert) -> Result<(), AlertError> {
        let body = alert.body();
        tracing::info!(kind = alert.kind.as_str(), height = alert.height, "Sending alert");

        match timeout(Duration::from_secs(self.timeout_secs), self.post_message(&body)).await {
            Ok(result) => result,
            Err(_) => Err(AlertError::Timeout(self.timeout_secs)),
        }
    }
}

impl std::fmt::Debug for TwilioNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioNotifier")
            .field("messages_url", &self.messages_url)
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}
