//! Push notification delivery over Firebase Cloud Messaging.
//!
//! Uses `reqwest` against the FCM HTTP send endpoint.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::PushConfig;

/// Push delivery errors.
#[derive(Debug, Error)]
pub enum PushError {
    /// The HTTP request could not be completed.
    #[error("Push request failed: {0}")]
    Request(String),
    /// FCM answered but refused the message.
    #[error("Push rejected ({status}): {reason}")]
    Rejected {
        /// HTTP status returned by FCM.
        status: u16,
        /// Error text reported by FCM.
        reason: String,
    },
}

/// A single push message addressed to one device token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushMessage {
    /// Device registration token.
    pub token: String,
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub body: String,
    /// Routing data delivered to the app alongside the notification.
    pub data: BTreeMap<String, String>,
}

impl PushMessage {
    /// Creates a message with no routing data.
    #[must_use]
    pub fn new(token: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            title: title.into(),
            body: body.into(),
            data: BTreeMap::new(),
        }
    }

    /// Adds the `screen` routing datum the mobile app navigates to on tap.
    #[must_use]
    pub fn with_screen(mut self, screen: &str) -> Self {
        self.data.insert("screen".to_string(), screen.to_string());
        self
    }
}

#[derive(Serialize)]
struct FcmNotification<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Serialize)]
struct FcmRequest<'a> {
    to: &'a str,
    notification: FcmNotification<'a>,
    data: &'a BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct FcmResponse {
    #[serde(default)]
    failure: u32,
    #[serde(default)]
    results: Vec<FcmResult>,
}

#[derive(Debug, Deserialize)]
struct FcmResult {
    error: Option<String>,
}

/// FCM client.
#[derive(Clone)]
pub struct FcmClient {
    http: reqwest::Client,
    config: PushConfig,
}

impl FcmClient {
    /// Creates a new FCM client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: PushConfig) -> Result<Self, PushError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PushError::Request(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Sends a single message.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or FCM rejects the message.
    pub async fn send(&self, message: &PushMessage) -> Result<(), PushError> {
        let response = self
            .http
            .post(&self.config.endpoint)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("key={}", self.config.server_key),
            )
            .json(&request_body(message))
            .send()
            .await
            .map_err(|e| PushError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PushError::Request(e.to_string()))?;

        check_response(status, &body)?;
        debug!(title = %message.title, "Push message accepted");
        Ok(())
    }
}

fn request_body(message: &PushMessage) -> FcmRequest<'_> {
    FcmRequest {
        to: &message.token,
        notification: FcmNotification {
            title: &message.title,
            body: &message.body,
        },
        data: &message.data,
    }
}

/// FCM reports per-token failures inside a 200 response.
fn check_response(status: StatusCode, body: &str) -> Result<(), PushError> {
    if !status.is_success() {
        return Err(PushError::Rejected {
            status: status.as_u16(),
            reason: body.trim().to_string(),
        });
    }

    let parsed: FcmResponse = serde_json::from_str(body).unwrap_or_default();
    if parsed.failure == 0 {
        return Ok(());
    }

    let reason = parsed
        .results
        .into_iter()
        .find_map(|r| r.error)
        .unwrap_or_else(|| "unknown failure".to_string());

    Err(PushError::Rejected {
        status: status.as_u16(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let message = PushMessage::new("device-token", "Budget Alert", "85% used")
            .with_screen("/budgets");

        let value = serde_json::to_value(request_body(&message)).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "to": "device-token",
                "notification": { "title": "Budget Alert", "body": "85% used" },
                "data": { "screen": "/budgets" }
            })
        );
    }

    #[test]
    fn test_check_response_success() {
        let body = r#"{"multicast_id":1,"success":1,"failure":0,"results":[{"message_id":"m1"}]}"#;
        assert!(check_response(StatusCode::OK, body).is_ok());
    }

    #[test]
    fn test_check_response_token_failure() {
        let body = r#"{"success":0,"failure":1,"results":[{"error":"NotRegistered"}]}"#;

        let err = check_response(StatusCode::OK, body).unwrap_err();

        assert!(matches!(
            err,
            PushError::Rejected { status: 200, ref reason } if reason == "NotRegistered"
        ));
    }

    #[test]
    fn test_check_response_http_error() {
        let err = check_response(StatusCode::UNAUTHORIZED, "invalid key\n").unwrap_err();

        assert_eq!(err.to_string(), "Push rejected (401): invalid key");
    }

    #[test]
    fn test_new_client_builds() {
        let config = PushConfig {
            server_key: "key".to_string(),
            endpoint: "http://localhost:9999/fcm/send".to_string(),
            timeout_secs: 1,
        };
        assert!(FcmClient::new(config).is_ok());
    }
}
