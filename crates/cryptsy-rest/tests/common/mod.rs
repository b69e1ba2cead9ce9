//! Common test utilities and fixtures for integration tests
//!
//! Response bodies follow the shapes the live Cryptsy API returns.

#![allow(dead_code)]

use cryptsy_rest::{AuthenticatedSession, ClientConfig, Credentials};
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const API_KEY: &str = "abc123";
pub const API_SECRET: &str = "secretXYZ";

/// Sample `getmarkets` payload
pub fn markets_payload() -> Value {
    json!([
        {
            "marketid": "3",
            "label": "LTC/BTC",
            "primary_currency_code": "LTC",
            "primary_currency_name": "LiteCoin",
            "secondary_currency_code": "BTC",
            "secondary_currency_name": "BitCoin",
            "current_volume": "1482.71353025",
            "last_trade": "0.02541000",
            "high_trade": "0.02600000",
            "low_trade": "0.02500000",
            "created": "2013-05-15 03:59:28"
        },
        {
            "marketid": "132",
            "label": "DOGE/BTC",
            "primary_currency_code": "DOGE",
            "primary_currency_name": "Dogecoin",
            "secondary_currency_code": "BTC",
            "secondary_currency_name": "BitCoin",
            "current_volume": "82461726.54160600",
            "last_trade": "0.00000152",
            "high_trade": "0.00000160",
            "low_trade": "0.00000149",
            "created": "2013-12-20 20:59:34"
        }
    ])
}

/// Private API success envelope
pub fn private_ok(payload: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"success": "1", "return": payload}))
}

/// Private API failure envelope
pub fn private_error(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"success": "0", "error": message}))
}

/// Public API success envelope
pub fn public_ok(payload: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"success": 1, "return": payload}))
}

pub fn credentials() -> Credentials {
    Credentials::new(API_KEY, API_SECRET)
}

/// Configuration pointing both endpoints at the mock server
pub fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new()
        .with_private_url(format!("{}/api", server.uri()))
        .with_public_url(format!("{}/api.php", server.uri()))
}

/// Mount a private method answering with `response`
pub async fn mount_private(server: &MockServer, api_method: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/api"))
        .and(body_string_contains(format!("method={}&", api_method)))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Mount a public method answering with `response`
pub async fn mount_public(server: &MockServer, api_method: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/api.php"))
        .and(query_param("method", api_method))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Start a mock server with `getmarkets` mounted and connect a session to it
pub async fn connected_session() -> (MockServer, AuthenticatedSession) {
    let server = MockServer::start().await;
    mount_private(&server, "getmarkets", private_ok(markets_payload())).await;
    let session = AuthenticatedSession::connect(credentials(), config(&server))
        .await
        .unwrap();
    (server, session)
}

/// Decoded form fields of a recorded request body
pub fn form_fields(request: &Request) -> Vec<(String, String)> {
    serde_urlencoded::from_bytes(&request.body).unwrap()
}

/// Value of one form field
pub fn form_field(request: &Request, name: &str) -> Option<String> {
    form_fields(request)
        .into_iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value)
}

/// All recorded requests for one private method
pub async fn private_requests(server: &MockServer, api_method: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| form_field(request, "method").as_deref() == Some(api_method))
        .collect()
}
