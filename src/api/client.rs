use super::error::DnsError;
use super::models::*;
use async_trait::async_trait;

#[async_trait]
pub trait DnsApiClient {
    async fn find_record_id(
        &self,
        zone_id: &str,
        name: &str,
        record_type: RecordType,
    ) -> Result<RecordLookup, DnsError>;

    async fn update_record(&self, request: &UpdateRequest) -> Result<UpdateOutcome, DnsError>;
}
