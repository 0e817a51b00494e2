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

//! Domain models for the movacal gateway.
//!
//! Pure data structures with no I/O: the credential token, sanitized endpoint
//! names, request parameter maps and the basic-auth pair.

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};
use std::fmt;

/// Ordered request body sent to the upstream.
pub type RequestParameters = Map<String, Value>;

/// Short-lived upstream credential token.
///
/// Never printed: `Debug` and `Display` are redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Expose the token for injection into a request body.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"<REDACTED>").finish()
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<REDACTED>")
    }
}

/// An endpoint name reduced to its final path component.
///
/// Can only be built through [`EndpointName::sanitize`], so holding one means
/// null bytes, directory parts and surrounding whitespace are gone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EndpointName(String);

impl EndpointName {
    /// Strip null bytes, keep the last path component, trim whitespace.
    ///
    /// Returns `None` when nothing is left.
    pub fn sanitize(raw: &str) -> Option<Self> {
        let without_nulls: String = raw.chars().filter(|c| *c != '\0').collect();
        let base = basename(&without_nulls).trim();
        if base.is_empty() || base == "." || base == ".." {
            return None;
        }
        Some(Self(base.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EndpointName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EndpointName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Both separators count, so `..\\..\\x` cannot slip past on any platform.
fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    match trimmed.rfind(['/', '\\']) {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// HTTP basic credentials for the upstream.
pub struct BasicAuth {
    pub id: String,
    password: SecretString,
}

impl BasicAuth {
    pub fn new(id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            password: SecretString::new(password.into()),
        }
    }

    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }

    pub fn is_complete(&self) -> bool {
        !self.id.is_empty() && !self.password.expose_secret().is_empty()
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("id", &self.id)
            .field("password", &"<REDACTED>")
            .finish()
    }
}
