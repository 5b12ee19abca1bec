use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is unset. `level` applies to this crate and
/// to anything not listed; actix's own request chatter stays at `warn`
/// because the access logger already records every request.
pub fn default_directives(level: &str) -> String {
    format!("{level},backend={level},actix_web=warn,actix_server=info")
}

/// Build the filter for `level`, falling back to `info` when `LOGGER_LEVEL`
/// is not a valid directive.
pub fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_new(default_directives(level))
        .unwrap_or_else(|_| EnvFilter::new(default_directives("info")))
}

/// Install the global JSON subscriber. `RUST_LOG` wins over `level`.
///
/// Each line carries the enclosing `request` span, so `request_id`,
/// `method` and `path` travel with handler logs.
pub fn init_tracing(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| filter_for(level));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .json()
        .with_current_span(true)
        .with_span_list(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
