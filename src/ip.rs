// SPDX-License-Identifier: PMPL-1.0-or-later

//! Public IP discovery.
//!
//! A single plain-text GET against an IP echo service. Every failure mode
//! (transport, non-2xx, empty or non-IP body) maps to [`LookupError`]; the
//! session turns any error into [`IP_FALLBACK`].

use reqwest::blocking::Client;
use std::net::IpAddr;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_ENDPOINT: &str = "https://api.ipify.org";

/// Displayed in place of the address when the lookup fails.
pub const IP_FALLBACK: &str = "Could not fetch IP";

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IP service answered with status {0}")]
    Status(u16),

    #[error("IP service returned an empty body")]
    EmptyBody,

    #[error("IP service returned something that is not an address: {0:?}")]
    Malformed(String),
}

/// Source of the caller's public address.
///
/// Called from a worker thread, never from the UI thread.
pub trait IpLookup: Send + Sync {
    fn lookup(&self) -> Result<String, LookupError>;
}

/// [`IpLookup`] backed by an HTTP echo endpoint.
#[derive(Debug, Clone)]
pub struct HttpIpLookup {
    client: Client,
    endpoint: String,
}

impl HttpIpLookup {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Use a preconfigured client, e.g. one with a custom timeout or proxy.
    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for HttpIpLookup {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl IpLookup for HttpIpLookup {
    fn lookup(&self) -> Result<String, LookupError> {
        debug!(endpoint = %self.endpoint, "requesting public IP");
        let response = self.client.get(&self.endpoint).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }
        let body = response.text()?;
        parse_address(&body)
    }
}

/// Validate an echo-service body and return the normalised address.
pub fn parse_address(body: &str) -> Result<String, LookupError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(LookupError::EmptyBody);
    }
    trimmed
        .parse::<IpAddr>()
        .map(|addr| addr.to_string())
        .map_err(|_| LookupError::Malformed(truncate(trimmed, 64)))
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
