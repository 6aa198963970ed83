//! Gerrit REST client
//!
//! Gerrit guards its `/a/` endpoints with HTTP Digest Auth. Each call is sent
//! once unauthenticated; a `401` is answered with exactly one digest-signed
//! retry, never more.

use crate::transport::{http_client, parse_url, unexpected_status, Result};
use crate::{Challenge, Credentials, HttpMethod, RequestContext};
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use tracing::{debug, info, warn};

const SERVICE: &str = "Gerrit";

#[derive(Debug, Serialize)]
struct AddReviewerInput<'a> {
    reviewer: &'a str,
}

/// How a successful call got through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authentication {
    /// The server accepted the unauthenticated request
    Skipped,
    /// The server challenged and accepted the digest response
    Digest,
}

#[derive(Debug)]
pub struct GerritClient {
    base_url: Url,
    credentials: Credentials,
    http: Client,
}

impl GerritClient {
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self> {
        Ok(Self::with_client(parse_url(base_url)?, credentials, http_client()?))
    }

    pub fn with_client(base_url: Url, credentials: Credentials, http: Client) -> Self {
        Self {
            base_url,
            credentials,
            http,
        }
    }

    /// Server URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Web UI link to a change
    pub fn change_url(&self, change_id: &str) -> String {
        format!("{}/#/c/{}", self.base_url(), change_id)
    }

    /// Add `reviewer` to the change's reviewer list
    pub fn add_reviewer(&self, change_id: &str, reviewer: &str) -> Result<Authentication> {
        let path = format!("/a/changes/{}/reviewers", change_id);
        self.send_json(Method::POST, &path, &AddReviewerInput { reviewer })
    }

    fn send_json<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &T,
    ) -> Result<Authentication> {
        let url = parse_url(&format!("{}{}", self.base_url(), path))?;

        let response = self
            .http
            .request(method.clone(), url.clone())
            .json(body)
            .send()?;

        if response.status() != StatusCode::UNAUTHORIZED {
            if !response.status().is_success() {
                return Err(unexpected_status(SERVICE, response));
            }
            info!(status = %response.status(), "received status without challenge, auth skipped");
            return Ok(Authentication::Skipped);
        }

        let challenge = Challenge::from_headers(response.headers())?;
        debug!(realm = %challenge.realm, qop = %challenge.qop, "answering digest challenge");

        // digest uri is the path as it goes on the wire, after URL normalization
        let uri = match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        };
        let request = RequestContext::new(HttpMethod::from(&method), &uri);
        let authorization = challenge
            .respond(&self.credentials, &request)?
            .to_header_value()?;

        let response = self
            .http
            .request(method, url)
            .header(AUTHORIZATION, authorization)
            .json(body)
            .send()?;

        if response.status() != StatusCode::OK {
            if response.status() == StatusCode::UNAUTHORIZED {
                if let Ok(retry) = Challenge::from_headers(response.headers()) {
                    if retry.stale {
                        warn!("server reports a stale nonce, not retrying");
                    }
                }
            }
            return Err(unexpected_status(SERVICE, response));
        }

        Ok(Authentication::Digest)
    }
}

#[cfg(test)]
mod tests {
    use super::GerritClient;
    use crate::transport::TransportError;
    use crate::Credentials;

    #[test]
    fn test_change_url() {
        let gerrit =
            GerritClient::new("https://review.example.org/", Credentials::new("alice", "pw")).unwrap();
        assert_eq!(gerrit.base_url(), "https://review.example.org");
        assert_eq!(
            gerrit.change_url("1234"),
            "https://review.example.org/#/c/1234"
        );
    }

    #[test]
    fn test_invalid_url() {
        match GerritClient::new("review.example.org", Credentials::new("alice", "pw")) {
            Err(TransportError::InvalidUrl { url, .. }) => assert_eq!(url, "review.example.org"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
