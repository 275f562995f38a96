use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub const DEFAULT_TTL: u32 = 3600;

/// Provider-assigned record identifier. Hetzner hands these out as strings,
/// but integer ids are accepted and normalised.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

fn record_id_from_any<'de, D>(deserializer: D) -> Result<RecordId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => RecordId(id),
        RawId::Number(id) => RecordId(id.to_string()),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum RecordType {
    A,
    AAAA,
    NS,
    MX,
    CNAME,
    RP,
    TXT,
    SOA,
    HINFO,
    SRV,
    DANE,
    TLSA,
    DS,
    CAA,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::NS => "NS",
            RecordType::MX => "MX",
            RecordType::CNAME => "CNAME",
            RecordType::RP => "RP",
            RecordType::TXT => "TXT",
            RecordType::SOA => "SOA",
            RecordType::HINFO => "HINFO",
            RecordType::SRV => "SRV",
            RecordType::DANE => "DANE",
            RecordType::TLSA => "TLSA",
            RecordType::DS => "DS",
            RecordType::CAA => "CAA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record as returned by the listing endpoint. The type stays a plain
/// string so records of kinds we don't model still deserialize.
#[derive(Debug, Deserialize)]
pub struct ApiDnsRecord {
    #[serde(deserialize_with = "record_id_from_any")]
    pub id: RecordId,
    pub name: String,
    pub r#type: String,
    #[serde(default)]
    pub value: String,
    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

impl ApiDnsRecord {
    pub fn matches(&self, name: &str, record_type: RecordType) -> bool {
        self.name == name && self.r#type == record_type.as_str()
    }
}

impl fmt::Display for ApiDnsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} IN {} {}", self.name, self.ttl, self.r#type, self.value)
    }
}

fn default_ttl() -> u32 {
    DEFAULT_TTL
}

#[derive(Debug, Deserialize)]
pub struct RecordsResponse {
    #[serde(default)]
    pub records: Vec<ApiDnsRecord>,
}

/// Body of `PUT /api/v1/records/{id}`.
#[derive(Debug, Serialize)]
pub struct RecordUpdateBody<'a> {
    pub value: &'a str,
    pub ttl: u32,
    pub r#type: RecordType,
    pub name: &'a str,
    pub zone_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: Option<ApiErrorDetail>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: String,
}

impl ApiErrorResponse {
    pub fn into_message(self) -> Option<String> {
        self.error
            .map(|e| e.message)
            .filter(|m| !m.is_empty())
            .or(self.message.filter(|m| !m.is_empty()))
    }
}

#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub zone_id: String,
    pub name: String,
    pub r#type: RecordType,
    pub value: String,
    pub ttl: u32,
    pub record_id: Option<RecordId>,
}

impl UpdateRequest {
    pub fn new(zone_id: &str, name: &str, r#type: RecordType, value: &str) -> Self {
        Self {
            zone_id: zone_id.to_string(),
            name: name.to_string(),
            r#type,
            value: value.to_string(),
            ttl: DEFAULT_TTL,
            record_id: None,
        }
    }

    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_record_id(mut self, record_id: Option<RecordId>) -> Self {
        self.record_id = record_id;
        self
    }

    pub(crate) fn body(&self) -> RecordUpdateBody<'_> {
        RecordUpdateBody {
            value: &self.value,
            ttl: self.ttl,
            r#type: self.r#type,
            name: &self.name,
            zone_id: &self.zone_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unresolved {
    NotFound,
    Ambiguous(usize),
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unresolved::NotFound => f.write_str("no matching record"),
            Unresolved::Ambiguous(n) => write!(f, "{} matching records", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordLookup {
    Resolved(RecordId),
    Unresolved(Unresolved),
}

impl RecordLookup {
    /// Picks the id of the single record matching `name` and `record_type`.
    pub fn from_records(records: &[ApiDnsRecord], name: &str, record_type: RecordType) -> Self {
        let mut matches = records
            .iter()
            .filter(|record| record.matches(name, record_type));

        match (matches.next(), matches.count()) {
            (None, _) => RecordLookup::Unresolved(Unresolved::NotFound),
            (Some(record), 0) => RecordLookup::Resolved(record.id.clone()),
            (Some(_), rest) => RecordLookup::Unresolved(Unresolved::Ambiguous(rest + 1)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated(RecordId),
    /// No base URL configured, nothing was sent.
    Disabled,
}
