use super::{client::DnsApiClient, error::DnsError, models::*};
use async_trait::async_trait;
use log::{debug, error, info, warn};
use reqwest::StatusCode;

use crate::REQUEST_TIMEOUT;

pub const API_BASE_URL: &str = "https://dns.hetzner.com";

const AUTH_HEADER: &str = "Auth-API-Token";

pub struct HetznerClient {
    client: reqwest::Client,
    api_token: String,
    base_url: String,
}

#[async_trait]
impl DnsApiClient for HetznerClient {
    async fn find_record_id(
        &self,
        zone_id: &str,
        name: &str,
        record_type: RecordType,
    ) -> Result<RecordLookup, DnsError> {
        let response = self
            .client
            .get(format!("{}/api/v1/records", self.base_url))
            .query(&[("zone_id", zone_id)])
            .header(AUTH_HEADER, &self.api_token)
            .send()
            .await
            .inspect_err(|e| error!("Failed to list records of zone {}: {}", zone_id, e))?;

        let status = response.status();
        let text = response.text().await?;

        if status != StatusCode::OK {
            error!("Record lookup failed with {}: {}", status, text);
            return Err(DnsError::Provider {
                status,
                message: error_message(status, &text),
            });
        }

        let parsed: RecordsResponse = serde_json::from_str(&text).inspect_err(|e| {
            error!("Failed to parse record list: {}. Response: {}", e, text)
        })?;

        let lookup = RecordLookup::from_records(&parsed.records, name, record_type);
        match &lookup {
            RecordLookup::Resolved(id) => {
                debug!("Found {} record '{}' with id {}", record_type, name, id)
            }
            RecordLookup::Unresolved(reason) => {
                warn!(
                    "Cannot pick a {} record '{}' in zone {}: {}",
                    record_type, name, zone_id, reason
                );
                for record in parsed.records.iter().filter(|r| r.matches(name, record_type)) {
                    debug!("Candidate {}: {}", record.id, record);
                }
            }
        }
        Ok(lookup)
    }

    async fn update_record(&self, request: &UpdateRequest) -> Result<UpdateOutcome, DnsError> {
        if self.base_url.is_empty() {
            debug!("No API URL set, not updating '{}'", request.name);
            return Ok(UpdateOutcome::Disabled);
        }

        let record_id = match &request.record_id {
            Some(id) => id.clone(),
            None => match self
                .find_record_id(&request.zone_id, &request.name, request.r#type)
                .await?
            {
                RecordLookup::Resolved(id) => id,
                RecordLookup::Unresolved(reason) => {
                    return Err(DnsError::Unresolved {
                        name: request.name.clone(),
                        record_type: request.r#type,
                        reason,
                    })
                }
            },
        };

        debug!(
            "Updating {} record '{}' ({}) to {}",
            request.r#type, request.name, record_id, request.value
        );

        let response = self
            .client
            .put(format!("{}/api/v1/records/{}", self.base_url, record_id))
            .header(AUTH_HEADER, &self.api_token)
            .header("Content-Type", "application/json")
            .body(serde_json::to_string(&request.body())?)
            .send()
            .await
            .inspect_err(|e| error!("Failed to update record {}: {}", record_id, e))?;

        let status = response.status();
        if status == StatusCode::OK {
            info!("record successfully updated.");
            return Ok(UpdateOutcome::Updated(record_id));
        }

        let text = response.text().await?;
        let message = error_message(status, &text);
        error!("Update of record {} rejected with {}: {}", record_id, status, message);

        Err(DnsError::Rejected { status, message })
    }
}

impl HetznerClient {
    /// An empty `base_url` turns `update_record` into a no-op.
    pub fn with_base_url(api_token: String, base_url: &str) -> Result<Self, DnsError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_token,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .and_then(ApiErrorResponse::into_message)
        .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        })
}
