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

//! Endpoint wrappers behind the logical operations

use crate::core::errors::GatewayError;
use crate::gateway::client::GatewayClient;
use crate::router::operations::LogicalOperation;
use serde_json::Value;
use std::sync::Arc;

/// API version information.
pub struct VersionApi {
    client: Arc<GatewayClient>,
}

impl VersionApi {
    pub fn new(client: Arc<GatewayClient>) -> Self {
        Self { client }
    }

    pub async fn get_version(&self, args: &Value) -> Result<Value, GatewayError> {
        self.client
            .request(LogicalOperation::GetVersion.endpoint(), args)
            .await
    }
}

/// Document file categories.
pub struct FileCategoryApi {
    client: Arc<GatewayClient>,
}

impl FileCategoryApi {
    pub fn new(client: Arc<GatewayClient>) -> Self {
        Self { client }
    }

    pub async fn get_file_category(&self, args: &Value) -> Result<Value, GatewayError> {
        self.client
            .request(LogicalOperation::GetFileCategory.endpoint(), args)
            .await
    }
}
