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

//! Credential lifecycle.
//!
//! The upstream requires a short-lived credential token next to basic auth.
//! `CredentialManager` mints it through the signed challenge, caches it for the
//! configured TTL in a single-slot moka cache, and re-mints it on demand after
//! the upstream rejects it.
//!
//! Concurrent misses are coalesced by `try_get_with`: callers racing on an
//! empty slot wait for one fetch instead of each minting a token.

use crate::config::Config;
use crate::core::constants::{credential, upstream};
use crate::core::crypto::ChallengeSigner;
use crate::core::errors::GatewayError;
use crate::core::models::Credential;
use crate::gateway::transport::UpstreamTransport;
use moka::future::Cache;
use secrecy::ExposeSecret;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

pub struct CredentialManager {
    config: Arc<Config>,
    transport: Arc<dyn UpstreamTransport>,
    signer: ChallengeSigner,
    cache: Cache<String, Credential>,
}

impl CredentialManager {
    /// Build the manager, validating every setting the fetch needs.
    pub fn new(
        config: Arc<Config>,
        transport: Arc<dyn UpstreamTransport>,
    ) -> Result<Self, GatewayError> {
        config.validate()?;

        let cache = Cache::builder()
            .time_to_live(Duration::from_secs(config.credential_ttl_secs))
            .max_capacity(1)
            .build();
        let signer = ChallengeSigner::new(config.secret_key.expose_secret());

        Ok(Self {
            config,
            transport,
            signer,
            cache,
        })
    }

    /// Cached credential, minting a new one on a miss.
    pub async fn get_credential(&self) -> Result<Credential, GatewayError> {
        self.cache
            .try_get_with(credential::CACHE_KEY.to_string(), self.fetch_credential())
            .await
            .map_err(|e| e.as_ref().clone())
    }

    /// Drop the cached credential and mint a fresh one.
    pub async fn refresh_credential(&self) -> Result<Credential, GatewayError> {
        self.invalidate().await;
        self.get_credential().await
    }

    pub async fn invalidate(&self) {
        self.cache.invalidate(credential::CACHE_KEY).await;
    }

    async fn fetch_credential(&self) -> Result<Credential, GatewayError> {
        let url = self.config.endpoint_url(upstream::CREDENTIAL_ENDPOINT);
        let challenge = self.signer.generate()?;
        let body = json!({
            "provider": self.config.provider,
            "random": challenge.random,
            "signature": challenge.signature,
        });

        debug!(provider = %self.config.provider, "Fetching upstream credential");

        let response = self
            .transport
            .post_json(
                &url,
                &self.config.basic,
                &body,
                Duration::from_secs(credential::FETCH_TIMEOUT_SECS),
            )
            .await?;

        if !response.is_success() {
            error!(status = response.status, "Credential endpoint returned HTTP error");
            return Err(GatewayError::UpstreamError {
                status: response.status,
            });
        }

        let token = serde_json::from_slice::<serde_json::Value>(&response.body)
            .ok()
            .and_then(|v| {
                v.get(upstream::CREDENTIAL_PARAM)
                    .and_then(|c| c.as_str())
                    .map(str::to_string)
            })
            .ok_or_else(|| {
                error!("Credential response is missing the credential field");
                GatewayError::InvalidUpstreamResponse(
                    "missing credential field".to_string(),
                )
            })?;

        info!(ttl_secs = self.config.credential_ttl_secs, "Upstream credential minted");
        Ok(Credential::new(token))
    }
}
