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

//! Structured logging of inbound MCP JSON-RPC requests.

use crate::core::constants::log_limits;
use crate::mcp::sanitizer::{self, header_value, HeaderLog, JsonRpcSummary, LogSummary, MethodSummary};
use crate::utils::truncate::truncate_str;
use reqwest::header::HeaderMap;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

/// Transport-level facts about the request that do not come from headers.
#[derive(Debug, Clone, Default)]
pub struct RequestMeta {
    pub http_method: String,
    pub path: String,
    pub ip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct McpRecord {
    pub method: String,
    pub id: Option<Value>,
    pub jsonrpc: Option<Value>,
    pub params_keys: Option<Vec<String>>,
    pub summary: MethodSummary,
    pub body_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpRecord {
    pub http_method: String,
    pub path: String,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub request_id: Option<String>,
    pub content_type: Option<String>,
    pub accept: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestRecord {
    pub headers: HeaderLog,
    pub sanitized_json: String,
}

/// The full record emitted for a decodable JSON-RPC request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestLogRecord {
    pub mcp: McpRecord,
    pub http: HttpRecord,
    pub request: RequestRecord,
}

impl RequestLogRecord {
    pub fn new(meta: &RequestMeta, summary: JsonRpcSummary, headers: &HeaderMap) -> Self {
        Self {
            mcp: McpRecord {
                method: summary.method,
                id: summary.id,
                jsonrpc: summary.jsonrpc,
                params_keys: summary.params_keys,
                summary: summary.summary,
                body_bytes: summary.body_bytes,
            },
            http: http_record(meta, headers),
            request: RequestRecord {
                headers: sanitizer::headers_for_log(headers),
                sanitized_json: summary.sanitized_json,
            },
        }
    }
}

fn http_record(meta: &RequestMeta, headers: &HeaderMap) -> HttpRecord {
    HttpRecord {
        http_method: meta.http_method.clone(),
        path: meta.path.clone(),
        ip: meta.ip.clone(),
        user_agent: header_value(headers, "user-agent"),
        request_id: header_value(headers, "x-request-id"),
        content_type: header_value(headers, "content-type"),
        accept: header_value(headers, "accept"),
    }
}

/// Summarize and log one inbound request. Never fails; a body that cannot be
/// decoded is logged as a warning with a bounded preview.
pub fn log_jsonrpc_request(
    meta: &RequestMeta,
    raw_body: &[u8],
    fallback_body: Option<&Value>,
    headers: &HeaderMap,
) -> Option<LogSummary> {
    let summary = sanitizer::summarize(raw_body, fallback_body)?;

    match &summary {
        LogSummary::DecodeFailure {
            error_class,
            body_bytes,
            raw_preview,
        } => {
            warn!(
                http_method = %meta.http_method,
                path = %meta.path,
                ip = ?meta.ip,
                user_agent = ?header_value(headers, "user-agent"),
                body_bytes = *body_bytes,
                json_error = %error_class,
                raw_preview = %raw_preview,
                "MCP invalid JSON body received"
            );
        }
        LogSummary::Request(request) => {
            let record = RequestLogRecord::new(meta, request.clone(), headers);
            info!(
                mcp = %to_log_json(&record.mcp),
                http = %to_log_json(&record.http),
                request = %to_log_json(&record.request),
                "MCP JSON-RPC request received"
            );
        }
    }

    Some(summary)
}

// Each record is bounded on its own so one oversized section cannot crowd out the rest.
fn to_log_json<T: Serialize>(value: &T) -> String {
    let json = serde_json::to_string(value).unwrap_or_else(|e| format!("<unserializable: {}>", e));
    truncate_str(&json, log_limits::SANITIZED_JSON_BYTES).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn meta() -> RequestMeta {
        RequestMeta {
            http_method: "POST".into(),
            path: "mcp/movacal".into(),
            ip: Some("203.0.113.7".into()),
        }
    }

    #[test]
    fn test_record_carries_http_and_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("user-agent", HeaderValue::from_static("openai-mcp/1.0"));
        headers.insert("x-request-id", HeaderValue::from_static("req-42"));
        headers.insert("authorization", HeaderValue::from_static("Bearer abc"));

        let body = br#"{"jsonrpc":"2.0","id":7,"method":"tools/list","params":{}}"#;
        let summary = match sanitizer::summarize(body, None) {
            Some(LogSummary::Request(s)) => s,
            other => panic!("unexpected {:?}", other),
        };

        let record = RequestLogRecord::new(&meta(), summary, &headers);
        assert_eq!(record.mcp.method, "tools/list");
        assert_eq!(record.mcp.id, Some(serde_json::json!(7)));
        assert_eq!(record.http.user_agent.as_deref(), Some("openai-mcp/1.0"));
        assert_eq!(record.http.request_id.as_deref(), Some("req-42"));
        assert!(record.request.headers.authorization_present);
        assert!(!to_log_json(&record).contains("Bearer abc"));
    }

    #[test]
    fn test_oversized_request_record_bounded() {
        let params: serde_json::Map<String, Value> = (0..5_000)
            .map(|i| (format!("{}{i}", "p".repeat(300)), serde_json::json!(i)))
            .collect();
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": {"patient_name": "Taro Yamada"},
            "method": "custom",
            "params": params
        })
        .to_string();
        let mut headers = HeaderMap::new();
        headers.insert("user-agent", HeaderValue::from_str(&"a".repeat(4000)).unwrap());

        let summary = match sanitizer::summarize(body.as_bytes(), None) {
            Some(LogSummary::Request(s)) => s,
            other => panic!("unexpected {:?}", other),
        };
        let record = RequestLogRecord::new(&meta(), summary, &headers);

        let limit = log_limits::SANITIZED_JSON_BYTES + log_limits::TRUNCATION_MARKER.len();
        for section in [
            to_log_json(&record.mcp),
            to_log_json(&record.http),
            to_log_json(&record.request),
        ] {
            assert!(section.len() <= limit);
            assert!(!section.contains("Taro Yamada"));
        }
        assert!(to_log_json(&record.http).len() < 1000);
    }

    #[test]
    fn test_log_returns_summary_for_decode_failure() {
        let summary = log_jsonrpc_request(&meta(), b"{oops", None, &HeaderMap::new());
        assert!(matches!(summary, Some(LogSummary::DecodeFailure { .. })));
    }

    #[test]
    fn test_log_skips_non_rpc() {
        let summary = log_jsonrpc_request(&meta(), b"", None, &HeaderMap::new());
        assert_eq!(summary, None);
    }
}
