//! Console logging for the server.
//!
//! Verbosity follows `RUST_LOG` and defaults to `info`. Request events are
//! emitted inside a `request` span carrying the txid, so every line logged
//! while handling a request can be traced back to it.

use crate::{Result, config::LogFormat};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub fn init_telemetry(format: LogFormat) -> Result<()> {
    let pretty = (format == LogFormat::Pretty).then(|| {
        fmt::layer()
            .with_thread_ids(true)
            .with_line_number(true)
            .with_target(false)
            .with_timer(ChronoLocal::rfc_3339())
            .with_file(true)
            .pretty()
    });

    let json = (format == LogFormat::Json).then(|| {
        fmt::layer()
            .with_timer(ChronoLocal::rfc_3339())
            .json()
            .with_current_span(true)
            .with_span_list(false)
    });

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(pretty)
        .with(json)
        .try_init()?;

    Ok(())
}
