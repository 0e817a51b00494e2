// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! HTTP transport to the upstream API

use crate::core::constants::{timeouts, upstream};
use crate::core::errors::GatewayError;
use crate::core::models::BasicAuth;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Raw upstream response: status, content type and body bytes.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains(upstream::JSON_CONTENT_TYPE))
    }
}

/// Executes one authenticated JSON POST against the upstream.
///
/// Implementations never retry; retry policy belongs to the caller.
#[async_trait]
pub trait UpstreamTransport: Send + Sync {
    async fn post_json(
        &self,
        url: &str,
        auth: &BasicAuth,
        body: &Value,
        timeout: Duration,
    ) -> Result<UpstreamResponse, GatewayError>;
}

/// reqwest-backed transport with connection pooling.
pub struct ReqwestTransport {
    http_client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, GatewayError> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(timeouts::CONNECT_SECS))
            .tcp_nodelay(true)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| {
                GatewayError::ConfigurationError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl UpstreamTransport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        auth: &BasicAuth,
        body: &Value,
        timeout: Duration,
    ) -> Result<UpstreamResponse, GatewayError> {
        let response = self
            .http_client
            .post(url)
            .basic_auth(&auth.id, Some(auth.password()))
            .header(CONTENT_TYPE, upstream::REQUEST_CONTENT_TYPE)
            .header(ACCEPT, upstream::JSON_CONTENT_TYPE)
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| classify_send_error(&e, timeout))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|e| classify_send_error(&e, timeout))?;

        debug!(status, bytes = body.len(), "Upstream responded");

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }
}

// reqwest errors embed the URL; only the class leaves this function.
fn classify_send_error(e: &reqwest::Error, timeout: Duration) -> GatewayError {
    if e.is_timeout() {
        GatewayError::TransportError(format!("Request timeout after {}s", timeout.as_secs()))
    } else if e.is_connect() {
        GatewayError::TransportError("Connection failed".to_string())
    } else if e.is_body() || e.is_decode() {
        GatewayError::TransportError("Failed to read response body".to_string())
    } else {
        GatewayError::TransportError("HTTP request failed".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, content_type: Option<&str>) -> UpstreamResponse {
        UpstreamResponse {
            status,
            content_type: content_type.map(str::to_string),
            body: Bytes::new(),
        }
    }

    #[test]
    fn test_status_classification() {
        assert!(response(200, None).is_success());
        assert!(response(204, None).is_success());
        assert!(!response(301, None).is_success());
        assert!(response(401, None).is_unauthorized());
        assert!(!response(403, None).is_unauthorized());
    }

    #[test]
    fn test_json_detection() {
        assert!(response(200, Some("application/json")).is_json());
        assert!(response(200, Some("Application/JSON; charset=utf-8")).is_json());
        assert!(!response(200, Some("application/pdf")).is_json());
        assert!(!response(200, None).is_json());
    }

    #[test]
    fn test_transport_creation() {
        assert!(ReqwestTransport::new().is_ok());
    }
}
