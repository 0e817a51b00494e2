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

//! movacal-gateway: a read-only, credential-authenticated gateway to the
//! Movacal medical records API for LLM tool callers.
//!
//! The gateway exposes a closed set of logical operations over an allowlisted
//! set of `get*` upstream endpoints, manages the short-lived upstream
//! credential, and logs inbound MCP traffic in redacted form.

pub mod config;
pub mod core;
pub mod gateway;
pub mod mcp;
pub mod router;
pub mod utils;
