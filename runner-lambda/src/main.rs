use anyhow::Context;
use function_core::{FunctionResponse, HelloFunction, HelloRequest, load_config, telemetry};
use lambda_http::{Body, Error, Request, RequestExt, Response, service_fn};
use std::env;
use tracing::info;

/// Path to a YAML config file; without it the config is read from the
/// environment.
const CONFIG_PATH_ENV_VAR: &str = "HELLO_FUNCTION_CONFIG_PATH";

async fn function_handler(
    function: &HelloFunction,
    event: Request,
) -> Result<Response<Body>, Error> {
    let request = hello_request(&event);
    into_http_response(function.handle(&request))
}

fn hello_request(event: &Request) -> HelloRequest {
    let query_name = event
        .query_string_parameters_ref()
        .and_then(|params| params.first("name"))
        .map(str::to_string);

    let raw_body: &[u8] = event.body().as_ref();
    HelloRequest::from_parts(query_name, Some(raw_body))
}

fn into_http_response(response: FunctionResponse) -> Result<Response<Body>, Error> {
    let (status_code, headers, body) = response.into_parts();

    let mut builder = Response::builder().status(status_code);
    for (name, value) in headers {
        builder = builder.header(name, value);
    }

    let response = builder.body(Body::from(body)).map_err(Box::new)?;
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init_tracing();

    let config_path = env::var(CONFIG_PATH_ENV_VAR).ok();
    let config = load_config(config_path.as_deref()).context("Failed to load configuration")?;
    info!(
        "Starting function '{}' version {}",
        config.function_name, config.version
    );

    let function = HelloFunction::new(config);
    let function = &function;
    lambda_http::run(service_fn(move |event: Request| async move {
        function_handler(function, event).await
    }))
    .await
}
