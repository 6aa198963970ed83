//! HipChat room notifications

use crate::transport::{http_client, parse_url, unexpected_status, Result};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde::Serialize;
use tracing::debug;

/// Background colour of a room message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Yellow,
    Green,
    Red,
    Purple,
    Gray,
    Random,
}

#[derive(Debug, Serialize)]
struct RoomNotification<'a> {
    color: Color,
    message: &'a str,
    notify: bool,
    message_format: &'static str,
}

/// A room's notification webhook
#[derive(Debug)]
pub struct HipChat {
    webhook_url: Url,
    http: Client,
}

impl HipChat {
    pub fn new(webhook_url: &str) -> Result<Self> {
        Ok(Self::with_client(parse_url(webhook_url)?, http_client()?))
    }

    pub fn with_client(webhook_url: Url, http: Client) -> Self {
        Self { webhook_url, http }
    }

    /// Post a plain-text message that notifies room members.
    /// HipChat acknowledges with `204 No Content`; anything else is an error.
    pub fn notify(&self, color: Color, message: &str) -> Result<()> {
        let payload = RoomNotification {
            color,
            message,
            notify: true,
            message_format: "text",
        };

        let response = self
            .http
            .post(self.webhook_url.clone())
            .json(&payload)
            .send()?;

        if response.status() != StatusCode::NO_CONTENT {
            return Err(unexpected_status("HipChat", response));
        }

        debug!("HipChat notified");
        Ok(())
    }
}
