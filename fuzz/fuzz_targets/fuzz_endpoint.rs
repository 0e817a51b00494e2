// Copyright 2026 BadCompany
// Licensed under the Apache License, Version 2.0

#![no_main]

use libfuzzer_sys::fuzz_target;
use movacal_gateway::core::constants::upstream::DEFAULT_ALLOWED_ENDPOINTS;
use movacal_gateway::gateway::policy::AllowlistPolicy;

fuzz_target!(|data: &str| {
    let policy = AllowlistPolicy::new(DEFAULT_ALLOWED_ENDPOINTS.iter().copied());

    // Anything that passes must be an exact allowlist entry.
    if let Ok(name) = policy.check_endpoint(data) {
        assert!(DEFAULT_ALLOWED_ENDPOINTS.contains(&name.as_str()));
    }
});
