use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const DEFAULT_LOG_FILTER: &str = "function_core=info,runner_lambda=info,runner_local=info";

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
/// Later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        // stdout belongs to the local runner's output
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
