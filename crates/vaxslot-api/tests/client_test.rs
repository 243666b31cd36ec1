#![allow(clippy::unwrap_used)]
// Integration tests for `CowinClient` using wiremock.

use std::time::Duration;

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vaxslot_api::auth::{OtpTiming, hash_otp};
use vaxslot_api::relay::{OtpMailbox, TextBinMailbox};
use vaxslot_api::{AuthContext, BookingOutcome, CowinClient, Error};
use vaxslot_api::models::BookingRequest;

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, CowinClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = CowinClient::with_base_url(reqwest::Client::new(), base_url);
    (server, client)
}

fn ctx() -> AuthContext {
    AuthContext::new("test-token")
}

fn fast_timing() -> OtpTiming {
    OtpTiming {
        initial_wait: Duration::from_millis(0),
        poll_interval: Duration::from_millis(10),
        timeout: Duration::from_millis(100),
    }
}

fn booking_request() -> BookingRequest {
    BookingRequest {
        beneficiaries: vec!["74123456789012".into()],
        dose: 1,
        center_id: 1234,
        session_id: "session-1".into(),
        slot: "09:00AM-11:00AM".into(),
    }
}

// ── Location tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_list_states() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/admin/location/states"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "states": [
                { "state_id": 21, "state_name": "Maharashtra" },
                { "state_id": 4, "state_name": "Bihar" }
            ]
        })))
        .mount(&server)
        .await;

    let states = client.list_states().await.unwrap();

    assert_eq!(states.len(), 2);
    assert_eq!(states[0].state_id, 21);
    assert_eq!(states[0].state_name, "Maharashtra");
}

#[tokio::test]
async fn test_list_districts() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/admin/location/districts/21"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "districts": [
                { "district_id": 363, "district_name": "Mumbai" },
                { "district_id": 392, "district_name": "Pune" }
            ]
        })))
        .mount(&server)
        .await;

    let districts = client.list_districts(21).await.unwrap();

    assert_eq!(districts.len(), 2);
    assert_eq!(districts[1].district_id, 392);
    assert_eq!(districts[1].district_name, "Pune");
}

#[tokio::test]
async fn test_list_states_unreachable() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/admin/location/states"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let result = client.list_states().await;

    match result {
        Err(Error::Api { status: 500, ref body }) => {
            assert!(body.contains("upstream down"), "got body: {body}");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

// ── Beneficiary tests ───────────────────────────────────────────────

#[tokio::test]
async fn test_list_beneficiaries_sends_bearer() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/appointment/beneficiaries"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "beneficiaries": [{
                "beneficiary_reference_id": "74123456789012",
                "name": "Asha Rao",
                "birth_year": "1976",
                "vaccine": "COVISHIELD",
                "dose1_date": "12-05-2021",
                "dose2_date": "",
                "vaccination_status": "Partially Vaccinated"
            }]
        })))
        .mount(&server)
        .await;

    let beneficiaries = client.list_beneficiaries(&ctx()).await.unwrap();

    assert_eq!(beneficiaries.len(), 1);
    let b = &beneficiaries[0];
    assert_eq!(b.reference_id, "74123456789012");
    assert_eq!(b.vaccine, "COVISHIELD");
    assert_eq!(b.age(2021), Some(45));
    assert_eq!(b.due_dose(), 2);
}

#[tokio::test]
async fn test_probe_token() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/appointment/beneficiaries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "beneficiaries": [] })))
        .mount(&server)
        .await;

    assert!(client.probe_token(&ctx()).await.unwrap());
}

#[tokio::test]
async fn test_probe_token_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/appointment/beneficiaries"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    assert!(!client.probe_token(&ctx()).await.unwrap());
}

// ── Calendar tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_calendar_decodes_sessions() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/appointment/sessions/calendarByDistrict"))
        .and(query_param("district_id", "392"))
        .and(query_param("date", "02-05-2021"))
        .and(query_param("vaccine", "COVISHIELD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "centers": [{
                "center_id": 1234,
                "name": "Sassoon Hospital",
                "district_name": "Pune",
                "sessions": [{
                    "session_id": "session-1",
                    "date": "02-05-2021",
                    "available_capacity": 30,
                    "min_age_limit": 45,
                    "vaccine": "COVISHIELD",
                    "slots": ["09:00AM-11:00AM", "11:00AM-01:00PM"]
                }]
            }]
        })))
        .mount(&server)
        .await;

    let calendar = client
        .sessions_by_district(&ctx(), 392, "02-05-2021", Some("COVISHIELD"))
        .await
        .unwrap();

    assert_eq!(calendar.centers.len(), 1);
    let session = &calendar.centers[0].sessions[0];
    assert_eq!(session.available_capacity, 30);
    assert_eq!(session.min_age_limit, 45);
    assert_eq!(session.slots.len(), 2);
}

#[tokio::test]
async fn test_calendar_token_expired() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/appointment/sessions/calendarByDistrict"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client
        .sessions_by_district(&ctx(), 392, "02-05-2021", None)
        .await;

    assert!(
        matches!(result, Err(Error::TokenExpired)),
        "expected TokenExpired, got: {result:?}"
    );
}

// ── Schedule tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_schedule_booked() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v2/appointment/schedule"))
        .and(body_json(json!({
            "beneficiaries": ["74123456789012"],
            "dose": 1,
            "center_id": 1234,
            "session_id": "session-1",
            "slot": "09:00AM-11:00AM"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "appointment_confirmation_no": "1234567890"
        })))
        .mount(&server)
        .await;

    let outcome = client.schedule(&ctx(), &booking_request()).await.unwrap();

    assert_eq!(
        outcome,
        BookingOutcome::Booked {
            confirmation: Some("1234567890".into())
        }
    );
}

#[tokio::test]
async fn test_schedule_conflict_is_not_fatal() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v2/appointment/schedule"))
        .respond_with(
            ResponseTemplate::new(409).set_body_string(r#"{"error":"slot already booked"}"#),
        )
        .mount(&server)
        .await;

    let outcome = client.schedule(&ctx(), &booking_request()).await.unwrap();

    match outcome {
        BookingOutcome::Rejected { status: 409, ref body } => {
            assert!(body.contains("slot already booked"));
        }
        other => panic!("expected Rejected, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_schedule_token_expired() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v2/appointment/schedule"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.schedule(&ctx(), &booking_request()).await;

    assert!(
        matches!(result, Err(Error::TokenExpired)),
        "expected TokenExpired, got: {result:?}"
    );
}

// ── OTP tests ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_request_otp() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v2/auth/generateMobileOTP"))
        .and(body_partial_json(json!({ "mobile": "9876543210" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "txnId": "txn-1" })))
        .mount(&server)
        .await;

    let txn_id = client.request_otp("9876543210").await.unwrap();

    assert_eq!(txn_id, "txn-1");
}

#[tokio::test]
async fn test_request_otp_failure_is_an_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v2/auth/generateMobileOTP"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad mobile"))
        .mount(&server)
        .await;

    let result = client.request_otp("123").await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_validate_otp_sends_hashed_code() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v2/auth/validateMobileOtp"))
        .and(body_json(json!({
            "otp": hash_otp("123456"),
            "txnId": "txn-1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "bearer-1" })))
        .mount(&server)
        .await;

    client.validate_otp("txn-1", "123456").await.unwrap();
}

// ── Full OTP flow with a stub mailbox ───────────────────────────────

struct StubMailbox {
    message: String,
}

impl OtpMailbox for StubMailbox {
    async fn clear(&self) -> Result<(), Error> {
        Ok(())
    }

    async fn fetch(&self) -> Result<String, Error> {
        Ok(self.message.clone())
    }
}

#[tokio::test]
async fn test_generate_token_full_flow() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v2/auth/generateMobileOTP"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "txnId": "txn-1" })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v2/auth/validateMobileOtp"))
        .and(body_partial_json(json!({ "otp": hash_otp("424242") })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "bearer-1" })))
        .mount(&server)
        .await;

    let mailbox = StubMailbox {
        message: "Your OTP to register/access CoWIN is 424242. It will be valid for 3 minutes. - CoWIN"
            .into(),
    };

    client
        .generate_token_with("9876543210", &mailbox, fast_timing())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_generate_token_times_out_on_silent_relay() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v2/auth/generateMobileOTP"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "txnId": "txn-1" })))
        .mount(&server)
        .await;

    let mailbox = StubMailbox {
        message: String::new(),
    };

    let result = client
        .generate_token_with("9876543210", &mailbox, fast_timing())
        .await;

    assert!(
        matches!(result, Err(Error::OtpTimeout { .. })),
        "expected OtpTimeout, got: {result:?}"
    );
}

// ── Relay mailbox tests ─────────────────────────────────────────────

#[tokio::test]
async fn test_text_bin_mailbox_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/bin/test-bin"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/bin/test-bin"))
        .respond_with(ResponseTemplate::new(200).set_body_string("forwarded sms text"))
        .mount(&server)
        .await;

    let bin_url = Url::parse(&format!("{}/bin/test-bin", server.uri())).unwrap();
    let mailbox = TextBinMailbox::new(reqwest::Client::new(), bin_url);

    mailbox.clear().await.unwrap();
    let text = mailbox.fetch().await.unwrap();

    assert_eq!(text, "forwarded sms text");
}

#[tokio::test]
async fn test_text_bin_mailbox_fetch_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bin/test-bin"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let bin_url = Url::parse(&format!("{}/bin/test-bin", server.uri())).unwrap();
    let mailbox = TextBinMailbox::new(reqwest::Client::new(), bin_url);

    let result = mailbox.fetch().await;

    assert!(
        matches!(result, Err(Error::Relay { .. })),
        "expected Relay error, got: {result:?}"
    );
}
