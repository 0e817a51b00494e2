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

//! Domain error types - Secure error handling with no information disclosure

use thiserror::Error;

/// Main error type for the gateway
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Missing or invalid setting, surfaced at construction
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Disallowed or malformed endpoint/operation, rejected before any network call
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Non-success status from the upstream (after the single 401 retry)
    #[error("Upstream error: HTTP {status}")]
    UpstreamError { status: u16 },

    /// Success status but an unusable body (e.g. missing credential field)
    #[error("Invalid upstream response: {0}")]
    InvalidUpstreamResponse(String),

    /// Timeout or connection failure talking to the upstream
    #[error("Transport error: {0}")]
    TransportError(String),

    /// Cryptographic error
    #[error("Cryptographic error: {0}")]
    CryptoError(#[from] CryptoError),
}

/// Cryptographic operation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Failed to compute the challenge signature
    #[error("Failed to sign challenge: {0}")]
    SigningError(String),

    /// Failed to generate random bytes
    #[error("Failed to generate random bytes")]
    RandomError,
}

impl GatewayError {
    /// Stable, machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::ConfigurationError(_) => "configuration_error",
            GatewayError::ValidationError(_) => "validation_error",
            GatewayError::UpstreamError { .. } | GatewayError::InvalidUpstreamResponse(_) => {
                "upstream_error"
            }
            GatewayError::TransportError(_) => "transport_error",
            GatewayError::CryptoError(_) => "internal_error",
        }
    }

    /// Get user-friendly error message (no sensitive information).
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::ConfigurationError(_) => "Gateway is not configured".to_string(),
            GatewayError::ValidationError(reason) => format!("Validation failed: {}", reason),
            GatewayError::UpstreamError { status } => format!("Upstream error: HTTP {}", status),
            GatewayError::InvalidUpstreamResponse(_) => {
                "Upstream error: invalid response".to_string()
            }
            GatewayError::TransportError(reason) => format!("Upstream unreachable: {}", reason),
            GatewayError::CryptoError(_) => "Internal error".to_string(),
        }
    }

    /// Whether the failure happened before any network activity.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            GatewayError::ConfigurationError(_) | GatewayError::ValidationError(_)
        )
    }
}
