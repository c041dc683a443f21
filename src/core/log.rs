use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

const CRATE_TARGET: &str = "fxconv";

/// Level applied to `fxconv` events and used as the `RUST_LOG` fallback.
fn verbosity(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    }
}

/// Sends diagnostics to stderr so stdout stays reserved for tables and
/// conversion results. Quiet unless `--verbose` or `RUST_LOG` is set.
pub fn init_logging(verbose: bool) {
    let level = verbosity(verbose);
    let crate_filter = Targets::new().with_target(CRATE_TARGET, level);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));

    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time().with_writer(std::io::stderr))
        .with(crate_filter)
        .with(env_filter)
        .init();
}
