// Copyright 2026 BadCompany
// Licensed under the Apache License, Version 2.0

#![no_main]

use libfuzzer_sys::fuzz_target;
use movacal_gateway::core::constants::log_limits;
use movacal_gateway::mcp::sanitizer::{summarize, LogSummary};

fuzz_target!(|data: &[u8]| {
    // Arbitrary request bodies must never panic the sanitizer or escape its size budget.
    match summarize(data, None) {
        Some(LogSummary::Request(summary)) => {
            assert!(
                summary.sanitized_json.len()
                    <= log_limits::SANITIZED_JSON_BYTES + log_limits::TRUNCATION_MARKER.len()
            );
        }
        Some(LogSummary::DecodeFailure { raw_preview, .. }) => {
            assert!(
                raw_preview.len()
                    <= log_limits::RAW_PREVIEW_BYTES + log_limits::TRUNCATION_MARKER.len()
            );
        }
        None => {}
    }
});
