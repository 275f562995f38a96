use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::api::hetzner::API_BASE_URL;
use crate::api::models::DEFAULT_TTL;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Config {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "API token cannot be empty"))]
    pub token: String,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "Zone ID cannot be empty"))]
    pub zone_id: String,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "Record name cannot be empty"))]
    pub record_name: String,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub ipinfo_token: Option<String>,

    /// Skips the lookup when the record name isn't unique in the zone.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub record_id: Option<String>,

    #[serde(default = "default_ttl")]
    #[validate(range(min = 1, message = "TTL must be greater than 0"))]
    pub ttl: u32,

    /// Set to an empty string to disable updates.
    #[serde(default = "default_api_url", deserialize_with = "trimmed")]
    pub api_url: String,
}

/// Shared config files carry one section per tool.
#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    #[serde(rename = "hetzner-dyndns")]
    pub section: Option<Config>,
}

fn default_ttl() -> u32 {
    DEFAULT_TTL
}

fn default_api_url() -> String {
    API_BASE_URL.to_string()
}

/// A key without a value reads as empty, and surrounding blanks are dropped.
fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(blank_as_none(deserializer)?.unwrap_or_default())
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}
