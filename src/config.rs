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

use crate::core::constants::{config as env_keys, credential, timeouts, upstream};
use crate::core::errors::GatewayError;
use crate::core::models::BasicAuth;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::env;

/// Clinic identifiers sent as the contextual `clinic_info` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClinicInfo {
    pub clinic_id: String,
    pub clinic_code: String,
}

#[derive(Debug)]
pub struct Config {
    pub base_url: String,
    pub basic: BasicAuth,
    pub provider: String,
    pub secret_key: SecretString,
    pub credential_ttl_secs: u64,
    pub default_params_json: String,
    pub clinic: Option<ClinicInfo>,
    pub allowed_endpoints: Vec<String>,
    pub default_timeout_secs: u64,
    pub log_level: String,
    pub log_format: String, // "json" or "text"
}

impl Config {
    /// Minimal configuration with defaults for everything optional.
    pub fn new(
        base_url: &str,
        basic_id: &str,
        basic_password: &str,
        provider: &str,
        secret_key: &str,
    ) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            basic: BasicAuth::new(basic_id, basic_password),
            provider: provider.to_string(),
            secret_key: SecretString::new(secret_key.to_string()),
            credential_ttl_secs: credential::DEFAULT_TTL_SECS,
            default_params_json: "{}".to_string(),
            clinic: None,
            allowed_endpoints: upstream::DEFAULT_ALLOWED_ENDPOINTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            default_timeout_secs: timeouts::DEFAULT_SECS,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }

    /// Load configuration from environment variables and validate it.
    pub fn from_env() -> Result<Self, GatewayError> {
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration through an arbitrary key lookup (environment, test maps).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GatewayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let mut config = Self::new(
            &get_or(env_keys::ENV_BASE_URL, upstream::DEFAULT_BASE_URL),
            &get_or(env_keys::ENV_BASIC_ID, ""),
            &get_or(env_keys::ENV_BASIC_PASSWORD, ""),
            &get_or(env_keys::ENV_PROVIDER, ""),
            &get_or(env_keys::ENV_SECRET_KEY, ""),
        );

        config.credential_ttl_secs = parse_positive_u64(
            env_keys::ENV_CREDENTIAL_TTL,
            lookup(env_keys::ENV_CREDENTIAL_TTL),
            credential::DEFAULT_TTL_SECS,
        )?;
        config.default_timeout_secs = parse_positive_u64(
            env_keys::ENV_DEFAULT_TIMEOUT,
            lookup(env_keys::ENV_DEFAULT_TIMEOUT),
            timeouts::DEFAULT_SECS,
        )?;
        config.default_params_json = get_or(env_keys::ENV_DEFAULT_PARAMS_JSON, "{}");
        config.clinic = parse_clinic(
            lookup(env_keys::ENV_CLINIC_ID),
            lookup(env_keys::ENV_CLINIC_CODE),
        )?;
        if let Some(raw) = lookup(env_keys::ENV_ALLOWED_ENDPOINTS) {
            config.allowed_endpoints = parse_csv(env_keys::ENV_ALLOWED_ENDPOINTS, &raw)?;
        }
        config.log_level = get_or(env_keys::ENV_LOG_LEVEL, "info");
        config.log_format = get_or(env_keys::ENV_LOG_FORMAT, "text");

        Ok(config)
    }

    /// Fail fast on missing required settings.
    pub fn validate(&self) -> Result<(), GatewayError> {
        self.validate_upstream()?;
        if self.provider.is_empty() {
            return Err(missing(env_keys::ENV_PROVIDER));
        }
        if self.secret_key.expose_secret().is_empty() {
            return Err(missing(env_keys::ENV_SECRET_KEY));
        }
        if self.credential_ttl_secs == 0 {
            return Err(GatewayError::ConfigurationError(format!(
                "{} must be greater than 0",
                env_keys::ENV_CREDENTIAL_TTL
            )));
        }
        Ok(())
    }

    /// Settings every upstream call needs: base URL and basic credentials.
    pub fn validate_upstream(&self) -> Result<(), GatewayError> {
        if self.base_url.is_empty() {
            return Err(missing(env_keys::ENV_BASE_URL));
        }
        if !self.basic.is_complete() {
            return Err(GatewayError::ConfigurationError(format!(
                "{} / {} is not configured",
                env_keys::ENV_BASIC_ID,
                env_keys::ENV_BASIC_PASSWORD
            )));
        }
        Ok(())
    }

    /// Full URL of an upstream endpoint.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }
}

fn missing(key: &str) -> GatewayError {
    GatewayError::ConfigurationError(format!("{} is not configured", key))
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn parse_positive_u64(key: &str, value: Option<String>, default: u64) -> Result<u64, GatewayError> {
    match value {
        Some(value) => {
            let parsed = value.trim().parse::<u64>().map_err(|e| {
                GatewayError::ConfigurationError(format!("Invalid {} value '{}': {}", key, value, e))
            })?;
            if parsed == 0 {
                return Err(GatewayError::ConfigurationError(format!(
                    "{} must be greater than 0",
                    key
                )));
            }
            Ok(parsed)
        }
        None => Ok(default),
    }
}

fn parse_clinic(
    clinic_id: Option<String>,
    clinic_code: Option<String>,
) -> Result<Option<ClinicInfo>, GatewayError> {
    let clinic_id = clinic_id.filter(|s| !s.is_empty());
    let clinic_code = clinic_code.filter(|s| !s.is_empty());
    match (clinic_id, clinic_code) {
        (None, None) => Ok(None),
        (Some(clinic_id), Some(clinic_code)) => Ok(Some(ClinicInfo {
            clinic_id,
            clinic_code,
        })),
        _ => Err(GatewayError::ConfigurationError(format!(
            "{} and {} must be configured together",
            env_keys::ENV_CLINIC_ID,
            env_keys::ENV_CLINIC_CODE
        ))),
    }
}

fn parse_csv(key: &str, raw: &str) -> Result<Vec<String>, GatewayError> {
    let items: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        return Err(GatewayError::ConfigurationError(format!(
            "{} is set but lists no endpoints",
            key
        )));
    }
    Ok(items)
}
