use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::api::models::*;
use crate::api::{DnsApiClient, DnsError, HetznerClient};

const TOKEN: &str = "test_token";
const ZONE: &str = "zone123";

fn client_for(server: &MockServer) -> HetznerClient {
    HetznerClient::with_base_url(TOKEN.to_string(), &server.uri()).unwrap()
}

async fn mount_records(server: &MockServer, records: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/v1/records"))
        .and(query_param("zone_id", ZONE))
        .and(header("Auth-API-Token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "records": records })))
        .expect(1)
        .mount(server)
        .await;
}

async fn forbid_updates(server: &MockServer) {
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_find_record_id_single_match() {
    let server = MockServer::start().await;
    mount_records(
        &server,
        json!([
            { "id": "rec1", "name": "home", "type": "A", "value": "1.1.1.1", "zone_id": ZONE },
            { "id": "rec2", "name": "home", "type": "AAAA", "value": "2001:db8::1" },
            { "id": "rec3", "name": "www", "type": "A", "value": "1.1.1.1" },
        ]),
    )
    .await;

    let result = client_for(&server)
        .find_record_id(ZONE, "home", RecordType::A)
        .await
        .unwrap();
    assert_eq!(result, RecordLookup::Resolved(RecordId::from("rec1")));
}

#[tokio::test]
async fn test_find_record_id_accepts_numeric_ids() {
    let server = MockServer::start().await;
    mount_records(&server, json!([{ "id": 42, "name": "home", "type": "A" }])).await;

    let result = client_for(&server)
        .find_record_id(ZONE, "home", RecordType::A)
        .await
        .unwrap();
    assert_eq!(result, RecordLookup::Resolved(RecordId::from("42")));
}

#[tokio::test]
async fn test_find_record_id_not_found() {
    let server = MockServer::start().await;
    mount_records(
        &server,
        json!([
            { "id": "rec1", "name": "home", "type": "TXT", "value": "hello" },
            { "id": "rec2", "name": "office", "type": "A", "value": "1.1.1.1" },
        ]),
    )
    .await;

    let result = client_for(&server)
        .find_record_id(ZONE, "home", RecordType::A)
        .await
        .unwrap();
    assert_eq!(result, RecordLookup::Unresolved(Unresolved::NotFound));
}

#[tokio::test]
async fn test_find_record_id_ambiguous() {
    let server = MockServer::start().await;
    mount_records(
        &server,
        json!([
            { "id": "rec1", "name": "home", "type": "A", "value": "1.1.1.1" },
            { "id": "rec2", "name": "home", "type": "A", "value": "2.2.2.2" },
        ]),
    )
    .await;

    let result = client_for(&server)
        .find_record_id(ZONE, "home", RecordType::A)
        .await
        .unwrap();
    assert_eq!(result, RecordLookup::Unresolved(Unresolved::Ambiguous(2)));
}

#[tokio::test]
async fn test_find_record_id_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/records"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": { "message": "zone not found", "code": 404 } })),
        )
        .mount(&server)
        .await;

    let result = client_for(&server)
        .find_record_id(ZONE, "home", RecordType::A)
        .await;
    match result {
        Err(DnsError::Provider { status, message }) => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(message, "zone not found");
        }
        other => panic!("expected provider error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_find_record_id_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/records"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .find_record_id(ZONE, "home", RecordType::A)
        .await;
    assert!(matches!(result, Err(DnsError::Decode(_))));
}

#[tokio::test]
async fn test_find_record_id_transport_error() {
    let client = HetznerClient::with_base_url(TOKEN.to_string(), "http://127.0.0.1:1").unwrap();
    let result = client.find_record_id(ZONE, "home", RecordType::A).await;
    assert!(matches!(result, Err(DnsError::Transport(_))));
}

#[tokio::test]
async fn test_update_record_sends_resolved_ip() {
    let server = MockServer::start().await;
    mount_records(&server, json!([{ "id": "rec1", "name": "www", "type": "A", "value": "1.1.1.1" }])).await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/records/rec1"))
        .and(header("Auth-API-Token", TOKEN))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "value": "203.0.113.5",
            "ttl": 3600,
            "type": "A",
            "name": "www",
            "zone_id": ZONE,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "record": { "id": "rec1" } })))
        .expect(1)
        .mount(&server)
        .await;

    let request = UpdateRequest::new(ZONE, "www", RecordType::A, "203.0.113.5");
    let outcome = client_for(&server).update_record(&request).await.unwrap();
    assert_eq!(outcome, UpdateOutcome::Updated(RecordId::from("rec1")));
}

#[tokio::test]
async fn test_update_record_success_with_numeric_id() {
    let server = MockServer::start().await;
    mount_records(&server, json!([{ "id": 42, "name": "home", "type": "A" }])).await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/records/42"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let request = UpdateRequest::new(ZONE, "home", RecordType::A, "203.0.113.5");
    let outcome = client_for(&server).update_record(&request).await.unwrap();
    assert_eq!(outcome, UpdateOutcome::Updated(RecordId::from("42")));
}

#[tokio::test]
async fn test_update_record_ambiguous_skips_put() {
    let server = MockServer::start().await;
    mount_records(
        &server,
        json!([
            { "id": "rec1", "name": "home", "type": "A" },
            { "id": "rec2", "name": "home", "type": "A" },
        ]),
    )
    .await;
    forbid_updates(&server).await;

    let request = UpdateRequest::new(ZONE, "home", RecordType::A, "203.0.113.5");
    let result = client_for(&server).update_record(&request).await;
    match result {
        Err(DnsError::Unresolved { name, reason, .. }) => {
            assert_eq!(name, "home");
            assert_eq!(reason, Unresolved::Ambiguous(2));
        }
        other => panic!("expected unresolved record, got {:?}", other),
    }
}

#[tokio::test]
async fn test_update_record_missing_record_skips_put() {
    let server = MockServer::start().await;
    mount_records(&server, json!([])).await;
    forbid_updates(&server).await;

    let request = UpdateRequest::new(ZONE, "home", RecordType::A, "203.0.113.5");
    let result = client_for(&server).update_record(&request).await;
    assert!(matches!(
        result,
        Err(DnsError::Unresolved { reason: Unresolved::NotFound, .. })
    ));
}

#[tokio::test]
async fn test_update_record_lookup_failure_skips_put() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/records"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;
    forbid_updates(&server).await;

    let request = UpdateRequest::new(ZONE, "home", RecordType::A, "203.0.113.5");
    let result = client_for(&server).update_record(&request).await;
    assert!(matches!(result, Err(DnsError::Provider { .. })));
}

#[tokio::test]
async fn test_update_record_rejected() {
    let server = MockServer::start().await;
    mount_records(&server, json!([{ "id": 42, "name": "home", "type": "A" }])).await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/records/42"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "error": { "message": "invalid token", "code": 403 } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request = UpdateRequest::new(ZONE, "home", RecordType::A, "203.0.113.5");
    let result = client_for(&server).update_record(&request).await;
    match result {
        Err(DnsError::Rejected { status, message }) => {
            assert_eq!(status.as_u16(), 403);
            assert_eq!(message, "invalid token");
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_update_record_rejected_plain_body() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/records/rec9"))
        .respond_with(ResponseTemplate::new(422).set_body_string("value is not an IPv4 address"))
        .expect(1)
        .mount(&server)
        .await;

    let request = UpdateRequest::new(ZONE, "home", RecordType::A, "nonsense")
        .with_record_id(Some(RecordId::from("rec9")));
    let result = client_for(&server).update_record(&request).await;
    match result {
        Err(DnsError::Rejected { message, .. }) => {
            assert_eq!(message, "value is not an IPv4 address")
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_update_record_with_explicit_id_skips_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/records/abc"))
        .and(body_json(json!({
            "value": "203.0.113.5",
            "ttl": 300,
            "type": "A",
            "name": "home",
            "zone_id": ZONE,
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let request = UpdateRequest::new(ZONE, "home", RecordType::A, "203.0.113.5")
        .with_ttl(300)
        .with_record_id(Some(RecordId::from("abc")));
    let outcome = client_for(&server).update_record(&request).await.unwrap();
    assert_eq!(outcome, UpdateOutcome::Updated(RecordId::from("abc")));
}

#[tokio::test]
async fn test_update_record_disabled_without_base_url() {
    let client = HetznerClient::with_base_url(TOKEN.to_string(), "").unwrap();

    let request = UpdateRequest::new(ZONE, "home", RecordType::A, "203.0.113.5");
    let outcome = client.update_record(&request).await.unwrap();
    assert_eq!(outcome, UpdateOutcome::Disabled);
}

#[test]
fn test_record_lookup_counts_name_and_type() {
    let records: Vec<ApiDnsRecord> = serde_json::from_value(json!([
        { "id": "a", "name": "home", "type": "A" },
        { "id": "b", "name": "home", "type": "CNAME" },
        { "id": "c", "name": "Home", "type": "A" },
    ]))
    .unwrap();

    assert_eq!(
        RecordLookup::from_records(&records, "home", RecordType::A),
        RecordLookup::Resolved(RecordId::from("a"))
    );
    assert_eq!(
        RecordLookup::from_records(&records, "home", RecordType::AAAA),
        RecordLookup::Unresolved(Unresolved::NotFound)
    );
    assert_eq!(
        RecordLookup::from_records(&[], "home", RecordType::A),
        RecordLookup::Unresolved(Unresolved::NotFound)
    );
}
