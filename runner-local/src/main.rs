use anyhow::{Context, Result};
use clap::Parser;
use function_core::{FunctionResponse, HelloFunction, HelloRequest, load_config, telemetry};
use tracing::info;

/// Invokes the hello function once, outside any serverless runtime, and
/// prints the response envelope to stdout.
///
/// What it does at a high-level:
///     Load config (file path, or YAML in HELLO_FUNCTION_CONFIG).
///     Build one request from the flags, the way an HTTP trigger would.
///     Run the handler and print status, headers and body as JSON.
#[derive(Parser, Debug)]
#[command(name = "hello-local", version, about = "Invoke the hello function locally")]
struct Args {
    /// Value of the `name` query string parameter.
    #[arg(long)]
    name: Option<String>,

    /// Raw request body, e.g. '{"name": "Functions"}'.
    #[arg(long)]
    body: Option<String>,

    /// YAML config file.
    #[arg(long, env = "HELLO_FUNCTION_CONFIG_PATH")]
    config: Option<String>,
}

fn invoke(function: &HelloFunction, args: &Args) -> FunctionResponse {
    let request = HelloRequest::from_parts(
        args.name.clone(),
        args.body.as_deref().map(str::as_bytes),
    );
    function.handle(&request)
}

fn main() -> Result<()> {
    telemetry::init_tracing();
    let args = Args::parse();

    let config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    info!(
        "Invoking function '{}' version {} locally",
        config.function_name, config.version
    );

    let function = HelloFunction::new(config);
    let response = invoke(&function, &args);

    let rendered = serde_json::to_string_pretty(&response).context("Failed to render response")?;
    println!("{}", rendered);
    Ok(())
}
