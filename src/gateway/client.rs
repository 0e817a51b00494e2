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

//! Gateway client.
//!
//! One authenticated upstream call per `call`: sanitize, read-only check,
//! allowlist check, parameter merge, credential attach, execute. A 401 drives
//! exactly one credential refresh and one retry; nothing else is retried.

use crate::config::Config;
use crate::core::constants::timeouts;
use crate::core::errors::GatewayError;
use crate::core::models::{EndpointName, RequestParameters};
use crate::gateway::credential::CredentialManager;
use crate::gateway::params::ParameterMerger;
use crate::gateway::policy::AllowlistPolicy;
use crate::gateway::transport::{UpstreamResponse, UpstreamTransport};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub struct GatewayClient {
    config: Arc<Config>,
    transport: Arc<dyn UpstreamTransport>,
    credentials: Arc<CredentialManager>,
    policy: AllowlistPolicy,
    merger: ParameterMerger,
}

impl GatewayClient {
    pub fn new(
        config: Arc<Config>,
        transport: Arc<dyn UpstreamTransport>,
        credentials: Arc<CredentialManager>,
    ) -> Result<Self, GatewayError> {
        config.validate_upstream()?;

        let policy = AllowlistPolicy::new(config.allowed_endpoints.iter().cloned());
        let merger = ParameterMerger::from_config(&config);

        Ok(Self {
            config,
            transport,
            credentials,
            policy,
            merger,
        })
    }

    /// Build the whole stack (transport, credential manager, client) from one config.
    pub fn from_config(config: Arc<Config>) -> Result<Self, GatewayError> {
        let transport: Arc<dyn UpstreamTransport> =
            Arc::new(crate::gateway::transport::ReqwestTransport::new()?);
        let credentials = Arc::new(CredentialManager::new(config.clone(), transport.clone())?);
        Self::new(config, transport, credentials)
    }

    pub fn policy(&self) -> &AllowlistPolicy {
        &self.policy
    }

    /// Call an allowlisted endpoint with the configured default timeout.
    pub async fn request(&self, endpoint: &str, params: &Value) -> Result<Value, GatewayError> {
        self.call(endpoint, params, None).await
    }

    /// Call an allowlisted endpoint; `timeout_secs` is clamped to the allowed range.
    pub async fn call(
        &self,
        endpoint: &str,
        params: &Value,
        timeout_secs: Option<i64>,
    ) -> Result<Value, GatewayError> {
        let endpoint = self.policy.check_endpoint(endpoint)?;
        let timeout = self.clamp_timeout(timeout_secs);
        let merged = self.merger.merge(params);

        let response = self.execute(&endpoint, &merged, timeout).await?;

        if !response.is_success() {
            error!(endpoint = %endpoint, status = response.status, "Upstream returned HTTP error");
            return Err(GatewayError::UpstreamError {
                status: response.status,
            });
        }

        info!(endpoint = %endpoint, status = response.status, "Upstream call completed");
        shape_response(response)
    }

    // First attempt with the cached credential; on 401 one refresh and one more attempt.
    async fn execute(
        &self,
        endpoint: &EndpointName,
        params: &RequestParameters,
        timeout: Duration,
    ) -> Result<UpstreamResponse, GatewayError> {
        let url = self.config.endpoint_url(endpoint.as_str());

        let credential = self.credentials.get_credential().await?;
        let body = ParameterMerger::with_credential(params, &credential);
        let response = self
            .transport
            .post_json(&url, &self.config.basic, &body, timeout)
            .await?;

        if !response.is_unauthorized() {
            return Ok(response);
        }

        warn!(endpoint = %endpoint, "Upstream rejected credential; refreshing once");
        let credential = self.credentials.refresh_credential().await?;
        let body = ParameterMerger::with_credential(params, &credential);
        self.transport
            .post_json(&url, &self.config.basic, &body, timeout)
            .await
    }

    fn clamp_timeout(&self, requested: Option<i64>) -> Duration {
        let secs = requested.unwrap_or(self.config.default_timeout_secs as i64);
        let clamped = secs.clamp(timeouts::MIN_SECS as i64, timeouts::MAX_SECS as i64);
        debug!(requested = secs, effective = clamped, "Timeout guard applied");
        Duration::from_secs(clamped as u64)
    }
}

/// JSON bodies are parsed; anything else is wrapped in `{content_type, raw}`.
pub fn shape_response(response: UpstreamResponse) -> Result<Value, GatewayError> {
    if response.is_json() {
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(json!({}));
        }
        return serde_json::from_slice(&response.body).map_err(|_| {
            GatewayError::InvalidUpstreamResponse("body is not valid JSON".to_string())
        });
    }

    let content_type = response.content_type.unwrap_or_default();
    match std::str::from_utf8(&response.body) {
        Ok(text) => Ok(json!({
            "content_type": content_type,
            "raw": text,
        })),
        Err(_) => Ok(json!({
            "content_type": content_type,
            "raw": STANDARD.encode(&response.body),
            "encoding": "base64",
        })),
    }
}
