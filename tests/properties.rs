use movacal_gateway::core::constants::log_limits::TRUNCATION_MARKER;
use movacal_gateway::core::models::EndpointName;
use movacal_gateway::gateway::policy::AllowlistPolicy;
use movacal_gateway::mcp::sanitizer::{summarize, LogSummary};
use movacal_gateway::utils::truncate::truncate_str;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_traversal_reduced_to_final_component(
        segments in prop::collection::vec("(\\.\\.|[a-z]{1,8}|\\.)", 0..6),
        separators in prop::collection::vec(prop_oneof![Just('/'), Just('\\')], 6),
        name in "get[A-Za-z]{1,12}\\.php",
        absolute in any::<bool>()
    ) {
        let mut raw = String::new();
        if absolute {
            raw.push('/');
        }
        for (segment, sep) in segments.iter().zip(separators.iter()) {
            raw.push_str(segment);
            raw.push(*sep);
        }
        raw.push_str(&name);

        let sanitized = EndpointName::sanitize(&raw).unwrap();
        prop_assert_eq!(sanitized.as_str(), name.as_str());
    }

    #[test]
    fn test_sanitized_never_contains_separators(raw in "\\PC*") {
        if let Some(name) = EndpointName::sanitize(&raw) {
            prop_assert!(!name.as_str().contains('/'));
            prop_assert!(!name.as_str().contains('\\'));
            prop_assert!(!name.as_str().contains('\0'));
            prop_assert!(name.as_str() != "..");
        }
    }

    #[test]
    fn test_unlisted_endpoint_never_passes(raw in "\\PC*") {
        let policy = AllowlistPolicy::new(["getVersion.php"]);
        if let Ok(name) = policy.check_endpoint(&raw) {
            prop_assert_eq!(name.as_str(), "getVersion.php");
        }
    }

    #[test]
    fn test_truncation_bounded_prefix(value in "\\PC*", max in 1usize..64) {
        let out = truncate_str(&value, max);
        if value.len() <= max {
            prop_assert_eq!(out.as_ref(), value.as_str());
        } else {
            let body = out.strip_suffix(TRUNCATION_MARKER).unwrap();
            prop_assert!(body.len() <= max);
            prop_assert!(value.starts_with(body));
        }
    }

    #[test]
    fn test_tools_call_argument_values_never_logged(
        secret in "[a-z0-9]{12,24}",
        key in "[a-z]{3,10}"
    ) {
        prop_assume!(key != "operation" && key != "args");
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": {
                "name": "movacal_get",
                "arguments": {"operation": "get_version", "args": {"patient": secret.clone()}, key.clone(): secret.clone()}
            }
        })
        .to_string();

        match summarize(body.as_bytes(), None) {
            Some(LogSummary::Request(summary)) => {
                let serialized = serde_json::to_string(&summary).unwrap();
                prop_assert!(!serialized.contains(&secret));
            }
            other => prop_assert!(false, "unexpected summary {:?}", other),
        }
    }
}
