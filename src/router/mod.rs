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

//! Operation router.
//!
//! Maps the closed set of logical operations onto their endpoint wrappers.
//! Unknown operations are rejected before any network activity, with the
//! allowed set in the message so an LLM caller can correct itself.

pub mod apis;
pub mod operations;

use crate::core::errors::GatewayError;
use crate::gateway::client::GatewayClient;
use crate::utils::truncate::truncate_str;
use apis::{FileCategoryApi, VersionApi};
use operations::LogicalOperation;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

const MAX_ECHOED_OPERATION_BYTES: usize = 128;

pub struct OperationRouter {
    version_api: VersionApi,
    file_category_api: FileCategoryApi,
}

impl OperationRouter {
    /// Every enumerated operation must map to an endpoint the client accepts.
    pub fn new(client: Arc<GatewayClient>) -> Result<Self, GatewayError> {
        for op in LogicalOperation::ALL {
            client.policy().check_endpoint(op.endpoint()).map_err(|e| {
                GatewayError::ConfigurationError(format!(
                    "Operation {} maps to endpoint {} which the gateway rejects: {}",
                    op,
                    op.endpoint(),
                    e
                ))
            })?;
        }

        Ok(Self {
            version_api: VersionApi::new(client.clone()),
            file_category_api: FileCategoryApi::new(client),
        })
    }

    pub fn allowed_operations(&self) -> Vec<&'static str> {
        LogicalOperation::names()
    }

    pub async fn execute(&self, operation: &str, args: &Value) -> Result<Value, GatewayError> {
        let op = LogicalOperation::parse(operation).ok_or_else(|| {
            warn!(operation = %truncate_str(operation, MAX_ECHOED_OPERATION_BYTES), "Rejected unknown operation");
            unknown_operation(operation)
        })?;

        info!(operation = %op, "Dispatching operation");

        match op {
            LogicalOperation::GetVersion => self.version_api.get_version(args).await,
            LogicalOperation::GetFileCategory => {
                self.file_category_api.get_file_category(args).await
            }
        }
    }
}

fn unknown_operation(operation: &str) -> GatewayError {
    GatewayError::ValidationError(format!(
        "Unknown or disallowed operation: {}. Allowed operations: {}",
        truncate_str(operation, MAX_ECHOED_OPERATION_BYTES),
        LogicalOperation::names().join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_operation_lists_allowed_set() {
        let msg = unknown_operation("get_patient_ssn").to_string();
        assert!(msg.contains("get_patient_ssn"));
        assert!(msg.contains("get_version, get_file_category"));
    }

    #[test]
    fn test_unknown_operation_echo_is_bounded() {
        let long = "x".repeat(10_000);
        let msg = unknown_operation(&long).to_string();
        assert!(msg.len() < 400);
    }
}
