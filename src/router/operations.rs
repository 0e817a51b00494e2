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

//! Logical operations.
//!
//! The closed set of LLM-facing operation names. Each variant names exactly one
//! upstream endpoint; the router's `match` over this enum is the dispatch table,
//! so adding a variant without a handler does not compile.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOperation {
    GetVersion,
    GetFileCategory,
}

impl LogicalOperation {
    pub const ALL: &'static [LogicalOperation] =
        &[LogicalOperation::GetVersion, LogicalOperation::GetFileCategory];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOperation::GetVersion => "get_version",
            LogicalOperation::GetFileCategory => "get_file_category",
        }
    }

    /// Upstream endpoint behind the operation.
    pub fn endpoint(&self) -> &'static str {
        match self {
            LogicalOperation::GetVersion => "getVersion.php",
            LogicalOperation::GetFileCategory => "getFileCategory.php",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            LogicalOperation::GetVersion => "Fetch upstream API version information",
            LogicalOperation::GetFileCategory => "List document file categories",
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.as_str() == name)
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(LogicalOperation::as_str).collect()
    }
}

impl fmt::Display for LogicalOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
