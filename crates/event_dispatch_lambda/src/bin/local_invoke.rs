use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;
use event_dispatch_lambda::adapters::log::{install_json_subscriber, TracingEventLog};
use event_dispatch_lambda::adapters::notify::NoopNotifier;
use event_dispatch_lambda::adapters::secrets::UnavailableSecretStore;
use event_dispatch_lambda::handlers::dispatch::{handle_event, DispatchDeps};
use event_dispatch_lambda::runtime::config::HandlerConfig;
use event_dispatch_lambda::runtime::context::InvocationContext;
use serde_json::{json, Value};

/// Runs the dispatcher once, outside Lambda, and prints the outcome.
#[derive(Parser)]
#[command(name = "local_invoke")]
struct Cli {
    /// JSON event file; a sample direct invocation is used when omitted
    #[arg(long)]
    event: Option<PathBuf>,
    #[arg(long, default_value = "test-request-id")]
    request_id: String,
    #[arg(long, env = "AWS_LAMBDA_FUNCTION_NAME", default_value = "test-function")]
    function_name: String,
}

fn sample_event() -> Value {
    json!({
        "test": true,
        "message": "Local test run",
        "data": {"key": "value"},
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = HandlerConfig::from_env()?;
    install_json_subscriber(config.log_level);

    let event = match &cli.event {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => sample_event(),
    };
    let context = InvocationContext::new(cli.request_id, cli.function_name, Utc::now());

    let log = TracingEventLog::new("local_invoke");
    let deps = DispatchDeps {
        config: &config,
        log: &log,
        secrets: &UnavailableSecretStore,
        notifier: &NoopNotifier,
    };

    let outcome = handle_event(&event, &context, &deps);
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
