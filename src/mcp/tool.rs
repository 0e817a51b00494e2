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

//! The `movacal_get` MCP tool.
//!
//! The LLM-facing surface names logical operations, never endpoints. Every
//! failure is returned as a structured, user-safe message.

use crate::core::constants::server;
use crate::core::errors::GatewayError;
use crate::router::operations::LogicalOperation;
use crate::router::OperationRouter;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

/// Tool metadata as advertised by `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToolResponse {
    Json(Value),
    Error(String),
}

impl ToolResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, ToolResponse::Error(_))
    }

    /// MCP `tools/call` result shape: one text content item plus `isError`.
    pub fn into_call_result(self) -> Value {
        let (text, is_error) = match self {
            ToolResponse::Json(value) => (value.to_string(), false),
            ToolResponse::Error(message) => (message, true),
        };
        json!({
            "content": [{"type": "text", "text": text}],
            "isError": is_error,
        })
    }
}

impl From<Result<Value, GatewayError>> for ToolResponse {
    fn from(result: Result<Value, GatewayError>) -> Self {
        match result {
            Ok(value) => ToolResponse::Json(value),
            Err(e) => {
                warn!(kind = e.kind(), error = %e, "Tool call failed");
                ToolResponse::Error(e.user_message())
            }
        }
    }
}

pub struct MovacalGetTool {
    router: Arc<OperationRouter>,
}

impl MovacalGetTool {
    pub fn new(router: Arc<OperationRouter>) -> Self {
        Self { router }
    }

    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: server::TOOL_NAME.to_string(),
            title: "Movacal API GET (Read-only)".to_string(),
            description: "Fetch data from the Movacal API by logical operation name. \
                          Only read-only operations are available."
                .to_string(),
            input_schema: input_schema(),
        }
    }

    /// Execute one tool call. `arguments` is the `params.arguments` object.
    pub async fn handle(&self, arguments: &Value) -> ToolResponse {
        let (operation, args) = match parse_arguments(arguments) {
            Ok(parsed) => parsed,
            Err(e) => return ToolResponse::from(Err::<Value, _>(e)),
        };
        self.router.execute(operation, &args).await.into()
    }
}

fn parse_arguments(arguments: &Value) -> Result<(&str, Value), GatewayError> {
    let operation = arguments
        .get("operation")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            GatewayError::ValidationError(format!(
                "operation is required. Allowed operations: {}",
                LogicalOperation::names().join(", ")
            ))
        })?;

    let args = match arguments.get("args") {
        None | Some(Value::Null) => json!({}),
        Some(Value::Object(map)) => Value::Object(map.clone()),
        Some(_) => {
            return Err(GatewayError::ValidationError(
                "args must be an object".to_string(),
            ))
        }
    };

    Ok((operation, args))
}

fn input_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "operation": {
                "type": "string",
                "enum": LogicalOperation::names(),
                "description": "Operation name (e.g. get_version)",
            },
            "args": {
                "type": "object",
                "description": "Arguments for the operation",
            },
        },
        "required": ["operation"],
    })
}
