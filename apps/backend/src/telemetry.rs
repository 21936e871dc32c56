//! Process-wide tracing subscriber for the server binary.

use tracing::Subscriber;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer};

const DEFAULT_FILTER: &str = "info,actix_web=info,sqlx=warn,sea_orm=warn";

/// One JSON object per event, with the enclosing span's fields.
pub fn json_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .json()
        .with_target(false)
        .with_ansi(false)
        .with_current_span(true)
}

/// JSON logs by default; `LOG_FORMAT=compact` for human-readable local output.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let compact = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("compact"));

    let registry = tracing_subscriber::registry().with(env_filter);
    if compact {
        registry
            .with(fmt::layer().with_target(false).compact())
            .init();
    } else {
        registry.with(json_layer()).init();
    }
}
