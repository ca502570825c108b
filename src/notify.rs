//! Alert and report delivery
//!
//! Delivery is fire-and-forget: transport failures and non-success responses
//! are logged and swallowed. Nothing here propagates to the monitoring loop
//! and nothing is retried.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde_json::json;
use tracing::{error, info, instrument};

use crate::config::Alert;

/// Notification capability, injected into monitors and the reporter.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a plain text message to the alert destination.
    async fn send(&self, alert: &Alert, message: &str);

    /// Deliver a binary attachment to the alert destination.
    async fn send_attachment(&self, alert: &Alert, filename: &str, bytes: Vec<u8>, mime: &str);
}

/// Notifier that posts to Discord and generic webhooks.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: Client,
}

impl WebhookNotifier {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    #[instrument(skip(self, payload))]
    async fn post_json(&self, url: &str, payload: &serde_json::Value) {
        match self.client.post(url).json(payload).send().await {
            Ok(response) => {
                if response.status().is_success() {
                    info!("Successfully delivered notification");
                } else {
                    error!("Notification failed with status: {}", response.status());
                    if let Ok(error_text) = response.text().await {
                        error!("Notification error response: {}", error_text);
                    }
                }
            }
            Err(e) => {
                error!("Failed to deliver notification: {}", e);
            }
        }
    }
}

impl Default for WebhookNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, alert: &Alert, message: &str) {
        match alert {
            Alert::Discord(discord) => {
                let content = match &discord.user_id {
                    Some(user_id) => format!("{message} <@{user_id}>"),
                    None => message.to_string(),
                };
                self.post_json(&discord.url, &json!({ "content": content }))
                    .await;
            }
            Alert::Webhook(webhook) => {
                let payload = json!({
                    "message": message,
                    "timestamp": Utc::now().to_rfc3339(),
                });
                self.post_json(&webhook.url, &payload).await;
            }
        }
    }

    #[instrument(skip(self, alert, bytes), fields(size = bytes.len()))]
    async fn send_attachment(&self, alert: &Alert, filename: &str, bytes: Vec<u8>, mime: &str) {
        let url = match alert {
            Alert::Discord(discord) => &discord.url,
            Alert::Webhook(webhook) => &webhook.url,
        };

        let part = match Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(mime)
        {
            Ok(part) => part,
            Err(e) => {
                error!("Invalid attachment mime type '{mime}': {e}");
                return;
            }
        };

        let form = Form::new().part("file", part);

        match self.client.post(url).multipart(form).send().await {
            Ok(response) => {
                if response.status().is_success() {
                    info!("Successfully delivered attachment");
                } else {
                    error!("Attachment upload failed with status: {}", response.status());
                }
            }
            Err(e) => {
                error!("Failed to deliver attachment: {}", e);
            }
        }
    }
}
