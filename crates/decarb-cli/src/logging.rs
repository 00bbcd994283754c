use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_DIRECTIVES: &str = "warn";
const VERBOSE_LOG_DIRECTIVES: &str = "warn,decarb=debug";

/// Install the stderr subscriber. `RUST_LOG` wins unless `--verbose` is set.
pub fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new(VERBOSE_LOG_DIRECTIVES)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVES))
    };

    // Stdout carries the report; logs stay on stderr.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .without_time(),
        )
        .try_init();
}
