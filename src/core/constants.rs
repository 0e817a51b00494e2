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

//! movacal-gateway Constants - Single source of truth for all configuration values.
//!
//! This module centralizes magic numbers, reserved keys, and environment
//! variable names so that the gateway, the router and the MCP surface agree.

/// Upstream API layout
pub mod upstream {
    /// Default upstream base URL
    pub const DEFAULT_BASE_URL: &str = "https://link.movacal.net/service/api/v1";
    /// Endpoint that mints the short-lived credential token
    pub const CREDENTIAL_ENDPOINT: &str = "credential.php";
    /// Reserved request body key carrying the credential token
    pub const CREDENTIAL_PARAM: &str = "credential";
    /// Contextual body key carrying clinic identifiers
    pub const CLINIC_INFO_PARAM: &str = "clinic_info";
    /// Read-only endpoints must start with this prefix
    pub const READ_ONLY_PREFIX: &str = "get";
    /// Content type marker for JSON responses
    pub const JSON_CONTENT_TYPE: &str = "application/json";
    /// Content type sent on every upstream POST
    pub const REQUEST_CONTENT_TYPE: &str = "application/json; charset=utf-8";

    /// Endpoints allowed when no override is configured.
    pub const DEFAULT_ALLOWED_ENDPOINTS: &[&str] = &[
        "getPatientlist.php",
        "getPatient.php",
        "getPatient2.php",
        "getDiaglist.php",
        "getDiagdata.php",
        "getDiagAttachement.php",
        "getExamlist.php",
        "getExamdata.php",
        "getDocslist.php",
        "getDocsdata.php",
        "getDispdocs.php",
        "getDocsmap.php",
        "getSchedule.php",
        "getFacility.php",
        "getDisease.php",
        "getVisitNurse.php",
        "getUserData.php",
        "getActcode.php",
        "getReserve.php",
        "getSummaryItem.php",
        "getHospitalization.php",
        "getOuterChecked.php",
        "getVersion.php",
        "getNursePeriod.php",
        "getFilelist.php",
        "getFile.php",
        "getFileCategory.php",
        "getNrecorddata.php",
        "getNrecordAttachment.php",
        "getPatientHistory.php",
        "getBasicOrder.php",
    ];
}

/// Credential lifecycle
pub mod credential {
    /// Number of random bytes in the signed challenge
    pub const CHALLENGE_LENGTH: usize = 32;
    /// Default cache lifetime (15 minutes)
    pub const DEFAULT_TTL_SECS: u64 = 900;
    /// Fixed timeout for the credential endpoint
    pub const FETCH_TIMEOUT_SECS: u64 = 30;
    /// Cache slot key (one credential per process)
    pub const CACHE_KEY: &str = "movacal_credential";
}

/// Per-call timeout guard
pub mod timeouts {
    pub const MIN_SECS: u64 = 1;
    pub const MAX_SECS: u64 = 60;
    pub const DEFAULT_SECS: u64 = 30;
    /// Fail fast on connection establishment
    pub const CONNECT_SECS: u64 = 5;
}

/// Log size budgets (bytes)
pub mod log_limits {
    /// Preview of an undecodable request body
    pub const RAW_PREVIEW_BYTES: usize = 2000;
    /// Serialized sanitized JSON-RPC view
    pub const SANITIZED_JSON_BYTES: usize = 8000;
    /// Appended when a value was cut
    pub const TRUNCATION_MARKER: &str = "...(truncated)";
    /// Any single logged string (method, tool name, key, header value)
    pub const FIELD_BYTES: usize = 256;
    /// Key names kept per logged key list
    pub const MAX_KEYS: usize = 50;
}

/// MCP Protocol Methods
pub mod methods {
    pub const INITIALIZE: &str = "initialize";
    pub const TOOLS_LIST: &str = "tools/list";
    pub const TOOLS_CALL: &str = "tools/call";
}

/// MCP server identity
pub mod server {
    pub const NAME: &str = "Movacal Server";
    pub const VERSION: &str = "0.1.0";
    pub const TOOL_NAME: &str = "movacal_get";
    pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2025-06-18", "2025-03-26", "2024-11-05"];
}

/// Configuration Environment Variables
pub mod config {
    pub const ENV_BASE_URL: &str = "MOVACAL_BASE_URL";
    pub const ENV_BASIC_ID: &str = "MOVACAL_BASIC_ID";
    pub const ENV_BASIC_PASSWORD: &str = "MOVACAL_BASIC_PASSWORD";
    pub const ENV_PROVIDER: &str = "MOVACAL_PROVIDER";
    pub const ENV_SECRET_KEY: &str = "MOVACAL_SECRET_KEY";
    pub const ENV_CREDENTIAL_TTL: &str = "MOVACAL_CREDENTIAL_TTL";
    pub const ENV_DEFAULT_PARAMS_JSON: &str = "MOVACAL_DEFAULT_PARAMS_JSON";
    pub const ENV_CLINIC_ID: &str = "MOVACAL_CLINIC_ID";
    pub const ENV_CLINIC_CODE: &str = "MOVACAL_CLINIC_CODE";
    pub const ENV_ALLOWED_ENDPOINTS: &str = "MOVACAL_ALLOWED_ENDPOINTS";
    pub const ENV_DEFAULT_TIMEOUT: &str = "MOVACAL_DEFAULT_TIMEOUT";
    pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
    pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
}
