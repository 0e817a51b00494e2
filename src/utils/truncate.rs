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

//! Byte-budget truncation for log output.

use crate::core::constants::log_limits::TRUNCATION_MARKER;
use std::borrow::Cow;

/// Cut `value` to at most `max_bytes` bytes (on a char boundary) and append the
/// truncation marker. Values within budget are returned untouched.
pub fn truncate_str(value: &str, max_bytes: usize) -> Cow<'_, str> {
    if max_bytes == 0 {
        return Cow::Borrowed("");
    }
    if value.len() <= max_bytes {
        return Cow::Borrowed(value);
    }

    let mut cut = max_bytes;
    while !value.is_char_boundary(cut) {
        cut -= 1;
    }

    let mut out = String::with_capacity(cut + TRUNCATION_MARKER.len());
    out.push_str(&value[..cut]);
    out.push_str(TRUNCATION_MARKER);
    Cow::Owned(out)
}
