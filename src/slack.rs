use serde::Serialize;

use crate::error::{ApiError, Error};
use crate::utils::debug;

/// Slack webhook payload: a flat list of Block Kit blocks.
#[derive(Debug, Serialize)]
pub struct WebhookMessage {
    pub blocks: Vec<Block>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Section { text: Text },
    Divider,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Text {
    #[serde(rename = "plain_text")]
    Plain { text: String, emoji: bool },
    #[serde(rename = "mrkdwn")]
    Mrkdwn { text: String },
}

/// Deliver the rendered digest to the webhook. A non-2xx response or a
/// transport failure aborts the run; there is no retry.
pub async fn post_webhook(webhook_url: &str, message: &WebhookMessage) -> Result<(), Error> {
    debug::log(&format!("Posting digest to {}", webhook_url));

    let client = reqwest::Client::new();
    let response = client
        .post(webhook_url)
        .json(message)
        .send()
        .await
        .map_err(|e| Error::Delivery(ApiError::Transport(e)))?;

    debug::log(&format!("Webhook response status: {}", response.status()));

    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "could not read error body".to_string());
        return Err(Error::Delivery(ApiError::Status { status, body }));
    }
    Ok(())
}
