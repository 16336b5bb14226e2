use crate::{DEFAULT_HEADER, Error, Result, TxidTagger};
use axum::http::HeaderName;
use clap::{Parser, ValueEnum};
use std::{
    sync::Arc,
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use txid::{
    Alphabet, AtomicTicker, DefaultTxidGenerator, MonotonicClock, TICK_MASK, ThreadRandom,
    TxidGenerator,
};

/// Text alphabet txids are rendered in.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlphabetArg {
    /// RFC 4648 base32hex, lowercase. Text sorts like the bytes.
    #[default]
    HexLower,
    /// RFC 4648 base32hex, uppercase.
    Hex,
    /// RFC 4648 standard base32 (`A-Z2-7`).
    Standard,
}

impl AlphabetArg {
    pub fn alphabet(self) -> &'static Alphabet {
        match self {
            Self::HexLower => &Alphabet::HEX_LOWER,
            Self::Hex => &Alphabet::HEX,
            Self::Standard => &Alphabet::STANDARD,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line human readable output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Runtime configuration for the `txid-server` binary.
///
/// Every setting can be passed as a flag or through the environment (a
/// `.env` file in the working directory is loaded first).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "txid-server",
    version,
    about = "An HTTP service tagging every request with a sortable txid"
)]
pub struct CliArgs {
    /// Address to listen on.
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from("0.0.0.0:3000"))]
    pub server_addr: String,

    /// Response header carrying the request's txid.
    ///
    /// Environment variable: `TXID_HEADER`
    #[arg(long, env = "TXID_HEADER", default_value_t = String::from(DEFAULT_HEADER))]
    pub header: String,

    /// Echo the txid back in the response headers.
    ///
    /// Environment variable: `TXID_ECHO_HEADER`
    #[arg(
        long,
        env = "TXID_ECHO_HEADER",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub echo_header: bool,

    /// Alphabet txids are encoded with.
    ///
    /// Environment variable: `TXID_ALPHABET`
    #[arg(long, env = "TXID_ALPHABET", value_enum, default_value_t)]
    pub alphabet: AlphabetArg,

    /// Milliseconds since the Unix epoch that tick zero corresponds to.
    ///
    /// A recent epoch delays the point at which the 42-bit tick wraps.
    ///
    /// Environment variable: `TXID_EPOCH_MS`
    #[arg(long, env = "TXID_EPOCH_MS", default_value_t = 0)]
    pub epoch_ms: u64,

    /// Log output format.
    ///
    /// Environment variable: `LOG_FORMAT`
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_addr: String,
    pub header: HeaderName,
    pub echo_header: bool,
    pub alphabet: AlphabetArg,
    pub epoch: Duration,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Validates `args` against the wall-clock time `now_ms`.
    pub fn from_args_at(args: CliArgs, now_ms: u64) -> Result<Self> {
        let header = HeaderName::try_from(args.header.as_str()).map_err(|source| {
            Error::InvalidHeader {
                name: args.header.clone(),
                source,
            }
        })?;

        let Some(elapsed) = now_ms.checked_sub(args.epoch_ms) else {
            return Err(Error::EpochInFuture {
                epoch_ms: args.epoch_ms,
            });
        };
        if elapsed > TICK_MASK {
            return Err(Error::EpochTooOld {
                epoch_ms: args.epoch_ms,
                max_tick: TICK_MASK,
            });
        }

        Ok(Self {
            server_addr: args.server_addr,
            header,
            echo_header: args.echo_header,
            alphabet: args.alphabet,
            epoch: Duration::from_millis(args.epoch_ms),
            log_format: args.log_format,
        })
    }

    /// Builds the shared generator every request draws from.
    pub fn generator(&self) -> DefaultTxidGenerator {
        TxidGenerator::new(
            AtomicTicker::new(MonotonicClock::with_epoch(self.epoch)),
            ThreadRandom,
        )
        .with_alphabet(self.alphabet.alphabet())
    }

    pub fn tagger(&self) -> TxidTagger {
        TxidTagger::new(Arc::new(self.generator()))
            .with_header(self.header.clone())
            .echo_header(self.echo_header)
    }
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = Error;

    fn try_from(args: CliArgs) -> Result<Self> {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64);
        Self::from_args_at(args, now_ms)
    }
}
