//! Authentication utilities for the bitFlyer private API

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;

use crate::common::errors::{ClientError, Result};

type HmacSha256 = Hmac<Sha256>;

pub const ACCESS_KEY: &str = "ACCESS-KEY";
pub const ACCESS_TIMESTAMP: &str = "ACCESS-TIMESTAMP";
pub const ACCESS_SIGN: &str = "ACCESS-SIGN";

/// API key and secret for the private endpoints
///
/// The secret never shows up in `Debug` output.
#[derive(Clone)]
pub struct ApiCredentials {
    pub api_key: String,
    api_secret: String,
}

impl ApiCredentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Secret for signing only. Never log the return value.
    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Generate the HMAC-SHA256 signature for a private API request
///
/// # Arguments
/// * `secret` - API secret, used as the raw HMAC key
/// * `timestamp` - Unix timestamp in seconds, as sent in `ACCESS-TIMESTAMP`
/// * `method` - HTTP method (GET, POST, etc.)
/// * `request_path` - Path without host, e.g. `/v1/me/sendchildorder`
/// * `body` - Raw request body (empty for GET requests)
pub fn sign_request(
    secret: &str,
    timestamp: &str,
    method: &str,
    request_path: &str,
    body: &[u8],
) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ClientError::Internal(format!("Failed to create HMAC: {}", e)))?;

    // timestamp + method + path + body
    mac.update(timestamp.as_bytes());
    mac.update(method.as_bytes());
    mac.update(request_path.as_bytes());
    mac.update(body);

    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Generate authentication headers stamped with the current time
pub fn generate_auth_headers(
    credentials: &ApiCredentials,
    method: &str,
    request_path: &str,
    body: &[u8],
) -> Result<AuthHeaders> {
    let timestamp = chrono::Utc::now().timestamp();
    AuthHeaders::at(credentials, timestamp, method, request_path, body)
}

/// Authentication headers for a single private request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    pub api_key: String,
    /// The exact string that went into the signature
    pub timestamp: String,
    pub signature: String,
}

impl AuthHeaders {
    /// Sign with a caller-supplied timestamp
    pub fn at(
        credentials: &ApiCredentials,
        timestamp: i64,
        method: &str,
        request_path: &str,
        body: &[u8],
    ) -> Result<Self> {
        let timestamp = timestamp.to_string();
        let signature = sign_request(
            credentials.api_secret(),
            &timestamp,
            method,
            request_path,
            body,
        )?;

        Ok(Self {
            api_key: credentials.api_key.clone(),
            timestamp,
            signature,
        })
    }

    /// Header set as name/value pairs, `Content-Type` included
    pub fn to_pairs(&self) -> [(&'static str, &str); 4] {
        [
            (ACCESS_KEY, self.api_key.as_str()),
            (ACCESS_TIMESTAMP, self.timestamp.as_str()),
            (ACCESS_SIGN, self.signature.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    /// Add authentication headers to a reqwest RequestBuilder
    pub fn apply_to_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        self.to_pairs()
            .iter()
            .fold(request, |req, (name, value)| req.header(*name, *value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ORDER_BODY: &[u8] = br#"{"product_code":"BTC_JPY"}"#;

    #[test]
    fn test_sign_known_vector() {
        let signature = sign_request(
            "test_secret",
            "1700000000",
            "POST",
            "/v1/me/sendchildorder",
            ORDER_BODY,
        )
        .unwrap();

        assert_eq!(
            signature,
            "9db9ea85cff199e532d459d47d96b95ef0dd27ed0fb36101e9f669bc682485e8"
        );
    }

    #[test]
    fn test_sign_empty_body() {
        let signature = sign_request("test_secret", "1700000000", "GET", "/v1/ticker", b"").unwrap();
        assert_eq!(
            signature,
            "0dbc9128175ac426989a1834354aa0d0abe542dc72b00ab02640fe73c7f783fe"
        );
    }

    #[test]
    fn test_method_is_signed_as_given() {
        let signature = sign_request("test_secret", "1700000000", "get", "/v1/ticker", b"").unwrap();
        assert_eq!(
            signature,
            "ba6bbd24f56b82bcfe074e8138cc3f39690c20db7afcd554e812e874edfef5df"
        );
    }

    #[test]
    fn test_signature_is_lowercase_hex() {
        let signature = sign_request("s", "1", "POST", "/p", b"{}").unwrap();
        assert_eq!(signature.len(), 64);
        assert!(signature
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_signing_is_deterministic() {
        let creds = ApiCredentials::new("key", "secret");
        let a = AuthHeaders::at(&creds, 1_700_000_000, "POST", "/v1/me/sendchildorder", ORDER_BODY).unwrap();
        let b = AuthHeaders::at(&creds, 1_700_000_000, "POST", "/v1/me/sendchildorder", ORDER_BODY).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_any_changed_input_changes_signature() {
        let base = ("secret", "1700000000", "POST", "/v1/me/sendchildorder", ORDER_BODY);
        let variants: Vec<(&str, &str, &str, &str, &[u8])> = vec![
            base,
            ("secret2", base.1, base.2, base.3, base.4),
            (base.0, "1700000001", base.2, base.3, base.4),
            (base.0, base.1, "GET", base.3, base.4),
            (base.0, base.1, base.2, "/v1/me/cancelchildorder", base.4),
            (base.0, base.1, base.2, base.3, &br#"{"product_code":"ETH_JPY"}"#[..]),
            (base.0, base.1, base.2, base.3, &b""[..]),
        ];

        let signatures: HashSet<String> = variants
            .iter()
            .map(|(s, t, m, p, b)| sign_request(s, t, m, p, b).unwrap())
            .collect();
        assert_eq!(signatures.len(), variants.len());
    }

    #[test]
    fn test_no_collisions_across_generated_inputs() {
        let mut seen = HashSet::new();
        for ts in 0..50i64 {
            for size in ["0.001", "0.0041", "0.1"] {
                let body = format!(r#"{{"size":{},"tick":{}}}"#, size, ts * 7919);
                let signature = sign_request(
                    "secret",
                    &(1_600_000_000 + ts).to_string(),
                    "POST",
                    "/v1/me/sendchildorder",
                    body.as_bytes(),
                )
                .unwrap();
                assert!(seen.insert(signature));
            }
        }
    }

    #[test]
    fn test_header_timestamp_matches_signed_timestamp() {
        let creds = ApiCredentials::new("my_key", "my_secret");
        let headers =
            generate_auth_headers(&creds, "POST", "/v1/me/sendchildorder", ORDER_BODY).unwrap();

        let expected = sign_request(
            "my_secret",
            &headers.timestamp,
            "POST",
            "/v1/me/sendchildorder",
            ORDER_BODY,
        )
        .unwrap();
        assert_eq!(headers.signature, expected);
        assert_eq!(headers.api_key, "my_key");
    }

    #[test]
    fn test_header_pairs() {
        let creds = ApiCredentials::new("my_key", "my_secret");
        let headers = AuthHeaders::at(&creds, 42, "GET", "/v1/me/getbalance", b"").unwrap();
        let pairs = headers.to_pairs();

        assert_eq!(pairs[0], ("ACCESS-KEY", "my_key"));
        assert_eq!(pairs[1], ("ACCESS-TIMESTAMP", "42"));
        assert_eq!(pairs[2].0, "ACCESS-SIGN");
        assert_eq!(pairs[3], ("Content-Type", "application/json"));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = ApiCredentials::new("visible_key", "super_secret_value");
        let debug_str = format!("{:?}", creds);

        assert!(debug_str.contains("visible_key"));
        assert!(!debug_str.contains("super_secret_value"));
        assert!(debug_str.contains("[REDACTED]"));
    }
}
