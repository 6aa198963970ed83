//! Error types for the Gerrit and HipChat HTTP exchanges

use reqwest::blocking::{Client, Response};
use reqwest::{StatusCode, Url};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Digest authentication error: {0}")]
    Digest(#[from] crate::Error),

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("{service} answered {status}: {body}")]
    UnexpectedStatus {
        service: &'static str,
        status: StatusCode,
        body: String,
    },
}

pub type Result<T> = std::result::Result<T, TransportError>;

pub(crate) fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| TransportError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn http_client() -> Result<Client> {
    Ok(Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Consume a response the caller didn't expect, keeping its body for the report
pub(crate) fn unexpected_status(service: &'static str, response: Response) -> TransportError {
    let status = response.status();
    let body = response
        .text()
        .unwrap_or_else(|e| format!("<unreadable body: {}>", e));

    TransportError::UnexpectedStatus {
        service,
        status,
        body,
    }
}
