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

//! Request parameter merging: defaults < contextual < caller, credential last

use crate::config::Config;
use crate::core::constants::upstream;
use crate::core::models::{Credential, RequestParameters};
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct ParameterMerger {
    defaults: RequestParameters,
    contextual: RequestParameters,
}

impl ParameterMerger {
    pub fn new(defaults: RequestParameters, contextual: RequestParameters) -> Self {
        Self {
            defaults,
            contextual,
        }
    }

    /// Defaults parsed once from the configured JSON, clinic fields as context.
    pub fn from_config(config: &Config) -> Self {
        let mut contextual = RequestParameters::new();
        if let Some(clinic) = &config.clinic {
            contextual.insert(
                upstream::CLINIC_INFO_PARAM.to_string(),
                serde_json::json!({
                    "clinic_id": clinic.clinic_id,
                    "clinic_code": clinic.clinic_code,
                }),
            );
        }
        Self::new(parse_defaults(&config.default_params_json), contextual)
    }

    /// Three-way merge; later layers win on identical keys.
    ///
    /// Non-object caller input counts as empty.
    pub fn merge(&self, caller: &Value) -> RequestParameters {
        let mut merged = self.defaults.clone();
        merged.extend(self.contextual.clone());
        if let Value::Object(caller) = caller {
            merged.extend(caller.clone());
        }
        merged
    }

    /// Inject the credential under its reserved key, overwriting any caller value.
    pub fn with_credential(params: &RequestParameters, credential: &Credential) -> Value {
        let mut body = params.clone();
        body.insert(
            upstream::CREDENTIAL_PARAM.to_string(),
            Value::String(credential.expose().to_string()),
        );
        Value::Object(body)
    }
}

/// Loose parse: anything but a JSON object yields no defaults.
pub fn parse_defaults(json: &str) -> RequestParameters {
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(map)) => map,
        Ok(_) | Err(_) => {
            if !json.trim().is_empty() {
                warn!("Default parameters are not a JSON object; ignoring them");
            }
            RequestParameters::new()
        }
    }
}
