use criterion::{black_box, criterion_group, criterion_main, Criterion};
use movacal_gateway::core::models::EndpointName;
use movacal_gateway::gateway::params::ParameterMerger;
use movacal_gateway::gateway::policy::AllowlistPolicy;
use movacal_gateway::core::constants::upstream::DEFAULT_ALLOWED_ENDPOINTS;
use movacal_gateway::mcp::sanitizer::summarize;
use serde_json::json;

fn bench_sanitizer(c: &mut Criterion) {
    let tools_call = br#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"movacal_get","arguments":{"operation":"get_version","args":{"patient_id":"12345","from":"2026-01-01"},"secret":"s3cr3t"},"_meta":{"progressToken":7}}}"#;
    let initialize = br#"{"jsonrpc":"2.0","id":0,"method":"initialize","params":{"protocolVersion":"2025-06-18","clientInfo":{"name":"openai-mcp","version":"1.0.0"},"capabilities":{"roots":{"listChanged":true},"sampling":{}}}}"#;

    c.bench_function("sanitize_tools_call", |b| {
        b.iter(|| summarize(black_box(tools_call), None))
    });
    c.bench_function("sanitize_initialize", |b| {
        b.iter(|| summarize(black_box(initialize), None))
    });
    c.bench_function("sanitize_invalid_body", |b| {
        b.iter(|| summarize(black_box(b"{\"jsonrpc\":\"2.0\",\"method\":"), None))
    });
}

fn bench_endpoint_check(c: &mut Criterion) {
    let policy = AllowlistPolicy::new(DEFAULT_ALLOWED_ENDPOINTS.iter().copied());

    c.bench_function("endpoint_sanitize_traversal", |b| {
        b.iter(|| EndpointName::sanitize(black_box("../../..\\admin/getPatient.php\0")))
    });
    c.bench_function("endpoint_check_allowlisted", |b| {
        b.iter(|| policy.check_endpoint(black_box("getDiagdata.php")))
    });
}

fn bench_merge(c: &mut Criterion) {
    let defaults = json!({"clinic": "c1", "lang": "ja", "limit": 50});
    let contextual = json!({"clinic_info": {"clinic_id": "C01", "clinic_code": "X9"}});
    let merger = ParameterMerger::new(
        defaults.as_object().cloned().unwrap_or_default(),
        contextual.as_object().cloned().unwrap_or_default(),
    );
    let caller = json!({"patient_id": "12345", "limit": 10});

    c.bench_function("merge_three_layers", |b| {
        b.iter(|| merger.merge(black_box(&caller)))
    });
}

criterion_group!(benches, bench_sanitizer, bench_endpoint_check, bench_merge);
criterion_main!(benches);
