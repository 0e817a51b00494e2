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

//! JSON-RPC log sanitizer.
//!
//! Reduces an inbound MCP request body to a bounded, redacted summary. Only a
//! fixed set of fields per method keep their values; everything else is
//! reduced to key names. Argument values never leave this module, apart from
//! the `operation` string of a `tools/call`.

use crate::core::constants::{log_limits, methods};
use crate::utils::truncate::truncate_str;
use reqwest::header::HeaderMap;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Result of summarizing one request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LogSummary {
    Request(JsonRpcSummary),
    DecodeFailure {
        error_class: String,
        body_bytes: usize,
        raw_preview: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcSummary {
    pub method: String,
    pub id: Option<Value>,
    pub jsonrpc: Option<Value>,
    pub params_keys: Option<Vec<String>>,
    pub summary: MethodSummary,
    pub body_bytes: usize,
    /// Sanitized re-serialization of the whole request, bounded.
    pub sanitized_json: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MethodSummary {
    Initialize {
        #[serde(rename = "protocolVersion")]
        protocol_version: Option<String>,
        #[serde(rename = "clientInfo")]
        client_info: Option<ClientInfoSummary>,
        capabilities_keys: Option<Vec<String>>,
    },
    ToolsCall {
        tool_name: Option<String>,
        arguments: Option<ArgumentsSummary>,
    },
    ToolsList {
        cursor: Option<Value>,
        per_page: Option<Value>,
    },
    Other {
        params_keys: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientInfoSummary {
    pub name: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgumentsSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args_keys: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args_type: Option<&'static str>,
    pub arguments_keys: Vec<String>,
}

/// Network metadata safe to log. Credential-bearing headers are reduced to
/// presence flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeaderLog {
    pub host: Option<String>,
    pub x_forwarded_for: Option<String>,
    pub x_real_ip: Option<String>,
    pub cf_connecting_ip: Option<String>,
    pub authorization_present: bool,
    pub cookie_present: bool,
}

/// Summarize a raw request body.
///
/// An empty body falls back to an already-parsed form body, but only when it
/// carries `jsonrpc` and a string `method`. Returns `None` when there is
/// nothing method-shaped to log.
pub fn summarize(raw: &[u8], fallback: Option<&Value>) -> Option<LogSummary> {
    let parsed = match decode_body(raw, fallback)? {
        Ok(object) => object,
        Err(failure) => return Some(failure),
    };

    let method = match parsed.get("method") {
        Some(Value::String(m)) if !m.is_empty() => m.clone(),
        _ => return None,
    };

    let params = parsed.get("params").and_then(Value::as_object);
    let empty = Map::new();
    let params_map = params.unwrap_or(&empty);

    let sanitized = sanitize_for_log(&parsed, &method, params_map);

    Some(LogSummary::Request(JsonRpcSummary {
        id: scalar(parsed.get("id")),
        jsonrpc: scalar(parsed.get("jsonrpc")),
        params_keys: params.map(keys_of),
        summary: summarize_method(&method, params_map),
        body_bytes: raw.len(),
        sanitized_json: truncate_str(&sanitized, log_limits::SANITIZED_JSON_BYTES).into_owned(),
        method: bounded(&method),
    }))
}

// Outer None: nothing to log. Inner Err: a decode failure worth logging.
fn decode_body(
    raw: &[u8],
    fallback: Option<&Value>,
) -> Option<Result<Map<String, Value>, LogSummary>> {
    if raw.is_empty() {
        let form = fallback?.as_object()?;
        let looks_like_rpc =
            form.contains_key("jsonrpc") && form.get("method").is_some_and(Value::is_string);
        return looks_like_rpc.then(|| Ok(form.clone()));
    }

    let failure = |class: &str| LogSummary::DecodeFailure {
        error_class: class.to_string(),
        body_bytes: raw.len(),
        raw_preview: truncate_str(&String::from_utf8_lossy(raw), log_limits::RAW_PREVIEW_BYTES)
            .into_owned(),
    };

    Some(match serde_json::from_slice::<Value>(raw) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(failure("expected_object")),
        Err(e) => Err(failure(error_class(&e))),
    })
}

fn error_class(err: &serde_json::Error) -> &'static str {
    use serde_json::error::Category;
    match err.classify() {
        Category::Io => "io",
        Category::Syntax => "syntax",
        Category::Data => "data",
        Category::Eof => "eof",
    }
}

fn summarize_method(method: &str, params: &Map<String, Value>) -> MethodSummary {
    match method {
        methods::INITIALIZE => MethodSummary::Initialize {
            protocol_version: string_field(params, "protocolVersion"),
            client_info: client_info(params),
            capabilities_keys: params
                .get("capabilities")
                .and_then(Value::as_object)
                .map(keys_of),
        },
        methods::TOOLS_CALL => MethodSummary::ToolsCall {
            tool_name: string_field(params, "name"),
            arguments: params
                .get("arguments")
                .and_then(Value::as_object)
                .map(summarize_arguments),
        },
        methods::TOOLS_LIST => MethodSummary::ToolsList {
            cursor: scalar(params.get("cursor")),
            per_page: scalar(params.get("per_page")),
        },
        _ => MethodSummary::Other {
            params_keys: keys_of(params),
        },
    }
}

fn summarize_arguments(arguments: &Map<String, Value>) -> ArgumentsSummary {
    let (args_keys, args_type) = match arguments.get("args") {
        Some(Value::Object(args)) => (Some(keys_of(args)), None),
        None | Some(Value::Null) => (None, None),
        Some(other) => (None, Some(json_type_name(other))),
    };

    ArgumentsSummary {
        operation: string_field(arguments, "operation"),
        args_keys,
        args_type,
        arguments_keys: keys_of(arguments),
    }
}

fn sanitize_for_log(request: &Map<String, Value>, method: &str, params: &Map<String, Value>) -> String {
    let meta_present = params.contains_key("_meta");

    let sanitized_params = match method {
        methods::INITIALIZE => json!({
            "protocolVersion": string_field(params, "protocolVersion"),
            "clientInfo": client_info(params),
            "capabilities_keys": params.get("capabilities").and_then(Value::as_object).map(keys_of),
            "_meta_present": meta_present,
        }),
        methods::TOOLS_CALL => {
            let arguments = params.get("arguments").and_then(Value::as_object).map(|args| {
                let mut view = Map::new();
                view.insert("keys".into(), json!(keys_of(args)));
                if let Some(op) = string_field(args, "operation") {
                    view.insert("operation".into(), Value::String(op));
                }
                if let Some(inner) = args.get("args").and_then(Value::as_object) {
                    view.insert("args_keys".into(), json!(keys_of(inner)));
                }
                Value::Object(view)
            });
            json!({
                "name": string_field(params, "name"),
                "arguments": arguments,
                "_meta_present": meta_present,
            })
        }
        methods::TOOLS_LIST => json!({
            "cursor": scalar(params.get("cursor")),
            "per_page": scalar(params.get("per_page")),
            "_meta_present": meta_present,
        }),
        _ => json!({
            "keys": keys_of(params),
            "_meta_present": meta_present,
        }),
    };

    json!({
        "jsonrpc": scalar(request.get("jsonrpc")),
        "id": scalar(request.get("id")),
        "method": bounded(method),
        "params": sanitized_params,
    })
    .to_string()
}

/// Extract loggable network metadata from request headers.
pub fn headers_for_log(headers: &HeaderMap) -> HeaderLog {
    HeaderLog {
        host: header_value(headers, "host"),
        x_forwarded_for: header_value(headers, "x-forwarded-for"),
        x_real_ip: header_value(headers, "x-real-ip"),
        cf_connecting_ip: header_value(headers, "cf-connecting-ip"),
        authorization_present: headers.contains_key("authorization"),
        cookie_present: headers.contains_key("cookie"),
    }
}

pub(crate) fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(bounded)
}

fn client_info(params: &Map<String, Value>) -> Option<ClientInfoSummary> {
    params
        .get("clientInfo")
        .and_then(Value::as_object)
        .map(|info| ClientInfoSummary {
            name: string_field(info, "name"),
            version: string_field(info, "version"),
        })
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(bounded)
}

/// At most `MAX_KEYS` names, each bounded; a trailing entry counts the rest.
fn keys_of(map: &Map<String, Value>) -> Vec<String> {
    let mut keys: Vec<String> = map
        .keys()
        .take(log_limits::MAX_KEYS)
        .map(|k| bounded(k))
        .collect();
    if map.len() > log_limits::MAX_KEYS {
        keys.push(format!("...(+{} more)", map.len() - log_limits::MAX_KEYS));
    }
    keys
}

// Only scalars are logged; containers may carry arbitrary payload.
fn scalar(value: Option<&Value>) -> Option<Value> {
    match value? {
        Value::String(s) => Some(Value::String(bounded(s))),
        v @ (Value::Number(_) | Value::Bool(_)) => Some(v.clone()),
        _ => None,
    }
}

fn bounded(value: &str) -> String {
    truncate_str(value, log_limits::FIELD_BYTES).into_owned()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
