use crate::config::SlackConfig;
use crate::error::NotifyError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

/// Posts text to the configured chat channel
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}

#[derive(Debug, Serialize)]
struct PostMessageRequest<'a> {
    channel: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Slack `chat.postMessage` client
pub struct SlackNotifier {
    config: SlackConfig,
    client: Client,
}

impl SlackNotifier {
    pub fn new(config: SlackConfig) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }

    async fn post_message(&self, text: &str) -> Result<(), NotifyError> {
        let url = format!("{}/chat.postMessage", self.config.api_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.bot_token)
            .json(&PostMessageRequest {
                channel: &self.config.channel_id,
                text,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status));
        }

        let body: PostMessageResponse = response.json().await?;
        if !body.ok {
            let reason = body.error.unwrap_or_else(|| "unknown_error".to_string());
            return Err(NotifyError::Api(reason));
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl Notifier for SlackNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        match self.post_message(text).await {
            Ok(()) => {
                info!("Message posted to channel {}", self.config.channel_id);
                Ok(())
            }
            Err(e) => {
                error!("Error posting message to channel {}: {}", self.config.channel_id, e);
                Err(e)
            }
        }
    }
}
