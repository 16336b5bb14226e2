//! Errors raised while configuring and starting the txid server.
//!
//! Request handling itself never fails because of txids: a request that
//! cannot be tagged is served untagged.

use axum::http::header::InvalidHeaderName;
use tracing_subscriber::util::TryInitError;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The configured response header is not a valid HTTP header name.
    #[error("invalid header name `{name}`")]
    InvalidHeader {
        name: String,
        #[source]
        source: InvalidHeaderName,
    },

    /// The tick epoch lies after the current wall-clock time.
    #[error("epoch {epoch_ms}ms is later than the current time")]
    EpochInFuture { epoch_ms: u64 },

    /// Ticks counted from the epoch no longer fit the txid timestamp field.
    #[error("epoch {epoch_ms}ms is too old: ticks would exceed {max_tick}ms and wrap")]
    EpochTooOld { epoch_ms: u64, max_tick: u64 },

    /// A global tracing subscriber was already installed.
    #[error("failed to initialise logging: {0}")]
    Telemetry(#[from] TryInitError),
}
