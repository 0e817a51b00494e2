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

//! Allowlist policy.
//!
//! Pure decisions over endpoint and operation names. Membership is exact and
//! case-sensitive; the only prefix rule is the read-only `get` check.

use crate::core::constants::upstream;
use crate::core::errors::GatewayError;
use crate::core::models::EndpointName;
use crate::router::operations::LogicalOperation;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct AllowlistPolicy {
    endpoints: HashSet<String>,
}

impl AllowlistPolicy {
    pub fn new<I, S>(endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            endpoints: endpoints.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_allowed_endpoint(&self, name: &str) -> bool {
        self.endpoints.contains(name)
    }

    pub fn is_read_only(name: &EndpointName) -> bool {
        name.as_str().starts_with(upstream::READ_ONLY_PREFIX)
    }

    /// Membership in the build-time operation enumeration.
    pub fn is_allowed_operation(op: &str) -> bool {
        LogicalOperation::parse(op).is_some()
    }

    /// Sanitize, then apply the read-only rule, then the allowlist.
    ///
    /// Both checks see the sanitized name, never the raw input.
    pub fn check_endpoint(&self, raw: &str) -> Result<EndpointName, GatewayError> {
        let name = EndpointName::sanitize(raw).ok_or_else(|| {
            GatewayError::ValidationError("Endpoint name is empty after sanitization".to_string())
        })?;

        if !Self::is_read_only(&name) {
            return Err(GatewayError::ValidationError(format!(
                "Only get* endpoints are allowed. Got: {}",
                name
            )));
        }

        if !self.is_allowed_endpoint(name.as_str()) {
            return Err(GatewayError::ValidationError(format!(
                "Endpoint is not in allowlist: {}",
                name
            )));
        }

        Ok(name)
    }
}
