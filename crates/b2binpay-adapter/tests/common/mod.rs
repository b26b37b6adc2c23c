/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for b2binpay-adapter tests

use b2binpay_adapter::{B2BinPayClient, ClientConfig, SessionSnapshot, compute_signature};
use chrono::{Duration, Utc};
use wiremock::MockServer;

pub const TEST_KEY: &str = "k";
pub const TEST_SECRET: &str = "s";
pub const SERVER_TIME: &str = "2026-10-18T12:00:00.000000Z";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server, holding the test credentials
pub fn client_with_credentials(server: &MockServer) -> B2BinPayClient {
    B2BinPayClient::with_credentials(
        ClientConfig::sandbox().with_api_url(server.uri()),
        TEST_KEY,
        TEST_SECRET,
    )
    .expect("client init")
}

/// Token response body with access/refresh valid for the given seconds
pub fn token_body(
    access: &str,
    refresh: &str,
    access_ttl: i64,
    refresh_ttl: i64,
    sign: Option<&str>,
) -> serde_json::Value {
    let now = Utc::now();
    let mut body = serde_json::json!({
        "data": {
            "type": "auth-token",
            "id": "0",
            "attributes": {
                "access": access,
                "refresh": refresh,
                "access_expired_at": (now + Duration::seconds(access_ttl)).to_rfc3339(),
                "refresh_expired_at": (now + Duration::seconds(refresh_ttl)).to_rfc3339(),
                "is_2fa_confirmed": false
            }
        }
    });
    if let Some(sign) = sign {
        body["meta"] = serde_json::json!({ "time": SERVER_TIME, "sign": sign });
    }
    body
}

/// Login response signed the way the gateway signs it
pub fn signed_login_body(access: &str, refresh: &str) -> serde_json::Value {
    let sign = compute_signature(SERVER_TIME, refresh, TEST_KEY, TEST_SECRET).expect("hmac");
    token_body(access, refresh, 60, 3600, Some(&sign))
}

/// Snapshot whose expiries are offset from now by the given seconds
pub fn snapshot(access: &str, refresh: &str, access_in: i64, refresh_in: i64) -> SessionSnapshot {
    let now = Utc::now();
    SessionSnapshot {
        access: access.to_string(),
        refresh: refresh.to_string(),
        access_expired_at: now + Duration::seconds(access_in),
        refresh_expired_at: now + Duration::seconds(refresh_in),
        is_2fa_confirmed: false,
    }
}
