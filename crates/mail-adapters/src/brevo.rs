//! The `Mailer` implementation for Brevo's SMTP API.
//!
//! Degrade rules: no API key → log the email and report success; the
//! provider's "IP address not authorized" rejection → same. Anything else
//! is a `Notification` error, which callers log and swallow.

use async_trait::async_trait;
use configs::MailConfig;
use domains::{AppError, Mailer, OutboundEmail, Result};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub struct BrevoMailer {
    http: Client,
    api_key: Option<SecretString>,
    endpoint: String,
    from_email: String,
    from_name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SendRequest<'a> {
    sender: Party<'a>,
    to: [Recipient<'a>; 1],
    subject: &'a str,
    html_content: &'a str,
    text_content: &'a str,
}

#[derive(Serialize)]
struct Party<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct Recipient<'a> {
    email: &'a str,
}

#[derive(Deserialize)]
struct SendResponse {
    #[serde(rename = "messageId")]
    message_id: Option<String>,
}

#[derive(Deserialize, Default)]
struct ApiError {
    code: Option<String>,
    message: Option<String>,
}

impl BrevoMailer {
    pub fn new(config: MailConfig) -> Self {
        if config.api_key.is_none() {
            info!("mail API key not configured; emails will be logged, not sent");
        }
        Self {
            http: Client::new(),
            api_key: config.api_key,
            endpoint: config.endpoint,
            from_email: config.from_email,
            from_name: config.from_name,
        }
    }
}

#[async_trait]
impl Mailer for BrevoMailer {
    async fn send(&self, message: OutboundEmail) -> Result<()> {
        let Some(api_key) = &self.api_key else {
            info!(to = %message.to, subject = %message.subject, "mock email (no mail key configured)");
            return Ok(());
        };

        let request = SendRequest {
            sender: Party {
                name: &self.from_name,
                email: &self.from_email,
            },
            to: [Recipient { email: &message.to }],
            subject: &message.subject,
            html_content: &message.html,
            text_content: &message.text,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .header("accept", "application/json")
            .header("api-key", api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|err| AppError::Notification(format!("mail request failed: {err}")))?;

        let status = response.status();
        if status.is_success() {
            let body: SendResponse = response.json().await.unwrap_or(SendResponse {
                message_id: None,
            });
            info!(
                to = %message.to,
                message_id = body.message_id.as_deref().unwrap_or("-"),
                "email sent"
            );
            return Ok(());
        }

        let error: ApiError = response.json().await.unwrap_or_default();
        let unauthorized_ip = error.code.as_deref() == Some("unauthorized")
            && error
                .message
                .as_deref()
                .is_some_and(|m| m.contains("IP address"));
        if unauthorized_ip {
            // Sending IP not on the provider's allowlist; degrade like the
            // unconfigured case instead of failing the caller's flow.
            warn!(to = %message.to, subject = %message.subject, "mail provider rejected our IP; logging email instead");
            return Ok(());
        }

        Err(AppError::Notification(format!(
            "mail provider returned {status}: {}",
            error.message.unwrap_or_default()
        )))
    }
}
