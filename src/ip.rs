use std::net::Ipv4Addr;

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::REQUEST_TIMEOUT;

pub const IPINFO_BASE_URL: &str = "https://ipinfo.io";

#[derive(Debug, Error)]
pub enum IpError {
    #[error("IP lookup failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IP lookup returned {0}")]
    Status(reqwest::StatusCode),

    #[error("IP lookup returned an unusable address: {0}")]
    Malformed(String),
}

#[derive(Debug, Deserialize)]
struct IpInfoResponse {
    ip: String,
}

/// Looks up the caller's public IPv4 address through ipinfo.io.
pub struct IpInfoResolver {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl IpInfoResolver {
    pub fn new(token: Option<String>) -> Result<Self, IpError> {
        Self::with_base_url(token, IPINFO_BASE_URL)
    }

    pub fn with_base_url(token: Option<String>, base_url: &str) -> Result<Self, IpError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    pub async fn resolve_external_ip(&self) -> Result<Ipv4Addr, IpError> {
        let mut request = self.client.get(format!("{}/json", self.base_url));
        if let Some(token) = &self.token {
            request = request.query(&[("token", token)]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(IpError::Status(response.status()));
        }

        let info: IpInfoResponse = response.json().await?;
        let ip = info
            .ip
            .trim()
            .parse::<Ipv4Addr>()
            .map_err(|_| IpError::Malformed(info.ip.clone()))?;

        debug!("Got external IP: {}", ip);
        Ok(ip)
    }
}
