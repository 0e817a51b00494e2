// Shared test fixtures: a scripted, call-counting upstream stub.
#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use movacal_gateway::config::Config;
use movacal_gateway::core::errors::GatewayError;
use movacal_gateway::core::models::BasicAuth;
use movacal_gateway::gateway::client::GatewayClient;
use movacal_gateway::gateway::credential::CredentialManager;
use movacal_gateway::gateway::transport::{UpstreamResponse, UpstreamTransport};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const BASE_URL: &str = "https://upstream.test/service/api/v1";

/// Stub upstream. `credential.php` mints `token-N`; every other endpoint
/// answers with the next scripted status (200 once the script runs out).
pub struct StubTransport {
    credential_calls: AtomicUsize,
    endpoint_calls: AtomicUsize,
    credential_status: u16,
    endpoint_statuses: Mutex<VecDeque<u16>>,
    endpoint_response: (Option<String>, Bytes),
    endpoint_bodies: Mutex<Vec<Value>>,
    endpoint_urls: Mutex<Vec<String>>,
    timeouts: Mutex<Vec<(String, u64)>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self {
            credential_calls: AtomicUsize::new(0),
            endpoint_calls: AtomicUsize::new(0),
            credential_status: 200,
            endpoint_statuses: Mutex::new(VecDeque::new()),
            endpoint_response: (
                Some("application/json".to_string()),
                Bytes::from_static(br#"{"version":"1.0"}"#),
            ),
            endpoint_bodies: Mutex::new(Vec::new()),
            endpoint_urls: Mutex::new(Vec::new()),
            timeouts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_endpoint_statuses(self, statuses: &[u16]) -> Self {
        *self.endpoint_statuses.lock().unwrap() = statuses.iter().copied().collect();
        self
    }

    pub fn with_credential_status(mut self, status: u16) -> Self {
        self.credential_status = status;
        self
    }

    pub fn with_endpoint_response(mut self, content_type: Option<&str>, body: &'static [u8]) -> Self {
        self.endpoint_response = (content_type.map(str::to_string), Bytes::from_static(body));
        self
    }

    pub fn credential_calls(&self) -> usize {
        self.credential_calls.load(Ordering::SeqCst)
    }

    pub fn endpoint_calls(&self) -> usize {
        self.endpoint_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.credential_calls() + self.endpoint_calls()
    }

    pub fn endpoint_bodies(&self) -> Vec<Value> {
        self.endpoint_bodies.lock().unwrap().clone()
    }

    pub fn endpoint_urls(&self) -> Vec<String> {
        self.endpoint_urls.lock().unwrap().clone()
    }

    /// `(endpoint file name, timeout seconds)` for every call, in order.
    pub fn timeouts(&self) -> Vec<(String, u64)> {
        self.timeouts.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamTransport for StubTransport {
    async fn post_json(
        &self,
        url: &str,
        _auth: &BasicAuth,
        body: &Value,
        timeout: Duration,
    ) -> Result<UpstreamResponse, GatewayError> {
        let endpoint = url.rsplit('/').next().unwrap_or(url).to_string();
        self.timeouts.lock().unwrap().push((endpoint, timeout.as_secs()));

        if url.ends_with("/credential.php") {
            let n = self.credential_calls.fetch_add(1, Ordering::SeqCst) + 1;
            // widen the race window for single-flight tests
            tokio::time::sleep(Duration::from_millis(20)).await;
            if self.credential_status != 200 {
                return Ok(status_only(self.credential_status));
            }
            return Ok(UpstreamResponse {
                status: 200,
                content_type: Some("application/json".to_string()),
                body: Bytes::from(json!({ "credential": format!("token-{}", n) }).to_string()),
            });
        }

        self.endpoint_calls.fetch_add(1, Ordering::SeqCst);
        self.endpoint_bodies.lock().unwrap().push(body.clone());
        self.endpoint_urls.lock().unwrap().push(url.to_string());

        let status = self.endpoint_statuses.lock().unwrap().pop_front().unwrap_or(200);
        if status != 200 {
            return Ok(status_only(status));
        }
        Ok(UpstreamResponse {
            status,
            content_type: self.endpoint_response.0.clone(),
            body: self.endpoint_response.1.clone(),
        })
    }
}

fn status_only(status: u16) -> UpstreamResponse {
    UpstreamResponse {
        status,
        content_type: Some("text/html".to_string()),
        body: Bytes::from_static(b"<html>denied</html>"),
    }
}

pub fn test_config() -> Config {
    Config::new(BASE_URL, "basic-id", "basic-pw", "test-provider", "test-secret")
}

pub fn build_client(config: Config, stub: Arc<StubTransport>) -> GatewayClient {
    let config = Arc::new(config);
    let transport: Arc<dyn UpstreamTransport> = stub;
    let credentials = Arc::new(
        CredentialManager::new(config.clone(), transport.clone()).expect("credential manager"),
    );
    GatewayClient::new(config, transport, credentials).expect("gateway client")
}

pub fn build_credentials(config: Config, stub: Arc<StubTransport>) -> CredentialManager {
    CredentialManager::new(Arc::new(config), stub).expect("credential manager")
}
