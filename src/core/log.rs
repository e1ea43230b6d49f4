use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// `verbose` turns on debug output for this crate only; otherwise `RUST_LOG`
/// decides and the default is silence.
pub fn init_logging(verbose: bool) {
    let (app_filter, level) = if verbose {
        (
            Targets::new().with_target("btc_housing", LevelFilter::DEBUG),
            "debug",
        )
    } else {
        (Targets::new().with_default(LevelFilter::TRACE), "off")
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time())
        .with(app_filter)
        .with(env_filter)
        .init();
}
