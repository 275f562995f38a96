use anyhow::{Context, Result};
use log::{error, info};
use std::net::Ipv4Addr;

use crate::api::models::{RecordId, RecordType, UpdateOutcome, UpdateRequest};
use crate::api::{DnsApiClient, HetznerClient};
use crate::config::Config;
use crate::ip::IpInfoResolver;

/// One update cycle: look up the public IP, then point the configured A
/// record at it.
pub struct HetznerDdns<C> {
    config: Config,
    client: C,
    resolver: IpInfoResolver,
}

impl HetznerDdns<HetznerClient> {
    pub fn new(config: Config) -> Result<Self> {
        let client = HetznerClient::with_base_url(config.token.clone(), &config.api_url)
            .context("Failed to build DNS API client")?;
        let resolver = IpInfoResolver::new(config.ipinfo_token.clone())
            .context("Failed to build IP lookup client")?;

        Ok(Self::with_parts(config, client, resolver))
    }
}

impl<C: DnsApiClient> HetznerDdns<C> {
    pub fn with_parts(config: Config, client: C, resolver: IpInfoResolver) -> Self {
        Self {
            config,
            client,
            resolver,
        }
    }

    fn update_request(&self, ip: &Ipv4Addr) -> UpdateRequest {
        UpdateRequest::new(
            &self.config.zone_id,
            &self.config.record_name,
            RecordType::A,
            &ip.to_string(),
        )
        .with_ttl(self.config.ttl)
        .with_record_id(
            self.config
                .record_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(RecordId::from),
        )
    }

    pub async fn run_once(&self) -> Result<UpdateOutcome> {
        if self.config.api_url.is_empty() {
            info!("No API URL configured, skipping update of {}", self.config.record_name);
            return Ok(UpdateOutcome::Disabled);
        }

        let current_ip = match self.resolver.resolve_external_ip().await {
            Ok(ip) => ip,
            Err(e) => {
                error!("Failed to determine external IP: {}", e);
                return Err(e).context("No external IP, not touching DNS");
            }
        };
        info!("Current IP: {}", current_ip);

        info!("Updating record for: {}", self.config.record_name);
        let request = self.update_request(&current_ip);
        match self.client.update_record(&request).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                error!("Failed to update record: {}", e);
                Err(e.into())
            }
        }
    }
}
