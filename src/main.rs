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

// Main entry point for the Movacal gateway CLI
use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::io::Read;
use std::sync::Arc;
use tracing::info;

use movacal_gateway::config::Config;
use movacal_gateway::core::errors::GatewayError;
use movacal_gateway::gateway::client::GatewayClient;
use movacal_gateway::mcp::sanitizer;
use movacal_gateway::router::operations::LogicalOperation;
use movacal_gateway::router::OperationRouter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one logical operation (e.g. get_version)
    Call {
        operation: String,

        /// Operation arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },

    /// Call an allowlisted get* endpoint directly
    Get {
        endpoint: String,

        /// Request parameters as a JSON object
        #[arg(long, default_value = "{}")]
        params: String,

        /// HTTP timeout in seconds (clamped to 1..=60)
        #[arg(long)]
        timeout: Option<i64>,
    },

    /// List the available logical operations
    Operations,

    /// Read a JSON-RPC body from stdin and print its redacted summary
    Summarize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    install_panic_hook();
    init_tracing();

    match cli.command {
        Command::Call { operation, args } => {
            let args = parse_json_arg("--args", &args)?;
            let router = build_router()?;
            let result = router.execute(&operation, &args).await.map_err(user_error)?;
            print_json(&result)?;
        }
        Command::Get {
            endpoint,
            params,
            timeout,
        } => {
            let params = parse_json_arg("--params", &params)?;
            let client = build_client()?;
            let result = client
                .call(&endpoint, &params, timeout)
                .await
                .map_err(user_error)?;
            print_json(&result)?;
        }
        Command::Operations => {
            for op in LogicalOperation::ALL {
                println!("{}\t{}\t{}", op, op.endpoint(), op.description());
            }
        }
        Command::Summarize => {
            let mut raw = Vec::new();
            std::io::stdin()
                .read_to_end(&mut raw)
                .context("Failed to read stdin")?;
            let summary = sanitizer::summarize(&raw, None);
            print_json(&summary)?;
        }
    }

    Ok(())
}

fn build_client() -> anyhow::Result<Arc<GatewayClient>> {
    let config = Arc::new(Config::from_env().map_err(user_error)?);
    info!(base_url = %config.base_url, endpoints = config.allowed_endpoints.len(), "Configuration loaded");
    Ok(Arc::new(GatewayClient::from_config(config).map_err(user_error)?))
}

fn build_router() -> anyhow::Result<OperationRouter> {
    OperationRouter::new(build_client()?).map_err(user_error)
}

// Configuration errors keep their detail on the CLI; the operator owns the env.
fn user_error(e: GatewayError) -> anyhow::Error {
    match e {
        GatewayError::ConfigurationError(_) => anyhow!(e),
        other => anyhow!(other.user_message()),
    }
}

fn parse_json_arg(flag: &str, raw: &str) -> anyhow::Result<Value> {
    let value: Value =
        serde_json::from_str(raw).with_context(|| format!("{} must be valid JSON", flag))?;
    if !value.is_object() {
        return Err(anyhow!("{} must be a JSON object", flag));
    }
    Ok(value)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("PANIC: {} at {}", message, location);
    }));
}

// Unvalidated load: `operations` and `summarize` must work without upstream settings.
fn init_tracing() {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let (level, format) = match Config::from_lookup(|key| std::env::var(key).ok()) {
        Ok(config) => (config.log_level, config.log_format),
        Err(e) => {
            eprintln!("Warning: invalid configuration, logging with defaults: {}", e);
            ("info".to_string(), "text".to_string())
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
