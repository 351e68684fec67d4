// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use imgqa_core::{keys, Scheme};

fn client(credentials: Option<ApiCredentials>) -> HttpOpenQa {
    HttpOpenQa::new(Endpoint::new("openqa.example.org", Scheme::Https), credentials).unwrap()
}

fn credentials() -> ApiCredentials {
    ApiCredentials { key: "KEY".into(), secret: "SECRET".into() }
}

#[test]
fn signature_matches_reference_hmac() {
    assert_eq!(
        sign_request("SECRET", "/api/v1/jobs/42/cancel", "1767225600"),
        "43c54edee2fb36650a175017780e38c2c2b671e6"
    );
    assert_eq!(
        sign_request("SECRET", "/api/v1/isos?FLAVOR=kiwi-test-disk&BUILD=20260101", "1767225600"),
        "6c38814c767b4eb4a3864384b7b0e5e557a2ff8e"
    );
}

#[test]
fn unsigned_get_has_no_api_headers() {
    let request = client(None).prepare(Method::GET, "jobs/7", &[], false).unwrap();
    assert_eq!(request.url().as_str(), "https://openqa.example.org/api/v1/jobs/7");
    assert!(request.headers().get(API_HASH_HEADER).is_none());
    assert_eq!(request.headers().get(ACCEPT).unwrap(), "application/json");
}

#[test]
fn signed_post_carries_key_time_and_hash() {
    let params = ParameterSet::new().with(keys::FLAVOR, "kiwi-test-disk").with(keys::UEFI, 1_i64);
    let request =
        client(Some(credentials())).prepare(Method::POST, "isos", &params.to_pairs(), true).unwrap();

    assert_eq!(request.url().query(), Some("FLAVOR=kiwi-test-disk&UEFI=1"));
    let headers = request.headers();
    assert_eq!(headers.get(API_KEY_HEADER).unwrap(), "KEY");

    let microtime = headers.get(API_MICROTIME_HEADER).unwrap().to_str().unwrap();
    let expected = sign_request("SECRET", "/api/v1/isos?FLAVOR=kiwi-test-disk&UEFI=1", microtime);
    assert_eq!(headers.get(API_HASH_HEADER).unwrap().to_str().unwrap(), expected);
}

#[test]
fn signed_call_without_credentials_fails_before_sending() {
    let err = client(None).prepare(Method::POST, "jobs/1/cancel", &[], true).unwrap_err();
    assert_eq!(err, OpenQaError::MissingCredentials { server: "openqa.example.org".into() });
}

#[test]
fn query_values_are_url_encoded() {
    let params = ParameterSet::new().with(keys::CASEDIR, "https://github.com/o/r.git#main");
    let request = client(Some(credentials())).prepare(Method::POST, "isos", &params.to_pairs(), true).unwrap();
    let query = request.url().query().unwrap();
    assert!(query.starts_with("CASEDIR=https%3A%2F%2Fgithub.com"), "{query}");
}

#[test]
fn display_url_strips_query() {
    let url = Url::parse("https://o3/api/v1/isos?FLAVOR=x").unwrap();
    assert_eq!(display_url(&url), "https://o3/api/v1/isos");
    assert_eq!(path_and_query(&url), "/api/v1/isos?FLAVOR=x");
}

#[yare::parameterized(
    json_error = { r#"{"error": "Job 5 does not exist", "error_status": 404}"#, "Job 5 does not exist" },
    plain_body = { "  Bad Gateway\n", "Bad Gateway" },
    empty_body = { "", "" },
)]
fn error_message_extraction(body: &str, expected: &str) {
    assert_eq!(error_message(body), expected);
}

#[test]
fn long_bodies_are_truncated() {
    let body = "x".repeat(500);
    let message = error_message(&body);
    assert_eq!(message.len(), 203);
    assert!(message.ends_with("..."));
}
