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

//! MCP server descriptor

use crate::core::constants::server;
use crate::mcp::tool::ToolDefinition;
use crate::router::operations::LogicalOperation;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub supported_protocol_versions: &'static [&'static str],
    pub instructions: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: server::NAME,
            version: server::VERSION,
            supported_protocol_versions: server::SUPPORTED_PROTOCOL_VERSIONS,
            instructions: instructions(),
        }
    }
}

impl ServerInfo {
    /// Pick the client's requested version if supported, else the newest.
    pub fn negotiate_protocol_version(&self, requested: Option<&str>) -> &'static str {
        requested
            .and_then(|r| self.supported_protocol_versions.iter().copied().find(|v| *v == r))
            .unwrap_or(self.supported_protocol_versions[0])
    }

    /// Result payload for an `initialize` request.
    pub fn initialize_result(&self, requested: Option<&str>) -> Value {
        json!({
            "protocolVersion": self.negotiate_protocol_version(requested),
            "capabilities": {"tools": {"listChanged": false}},
            "serverInfo": {"name": self.name, "version": self.version},
            "instructions": self.instructions,
        })
    }

    pub fn tools_list_result(&self, tools: &[ToolDefinition]) -> Value {
        json!({ "tools": tools })
    }
}

fn instructions() -> String {
    let mut text = String::from(
        "This MCP server provides **read-only** access to the Movacal API (medical records system).\n\n\
         ## Safety\n\
         - Never attempt write operations (create/update/delete). This server is read-only.\n\
         - Use only the `movacal_get` tool.\n\
         - Returned data is sensitive medical information. Avoid repeating personal information unnecessarily.\n\n\
         ## movacal_get\n\
         - `operation` (string, required): operation name\n\
         - `args` (object, optional): arguments for the operation\n\n\
         ## Available operations\n",
    );
    for op in LogicalOperation::ALL {
        text.push_str(&format!("- `{}`: {}\n", op, op.description()));
    }
    text.push_str("\nIf unsure which operation to use, ask the user instead of guessing.\n");
    text
}
