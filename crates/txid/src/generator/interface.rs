use crate::{Result, Txid};

/// The per-request boundary between a host server and txid generation.
///
/// Hosts hold a `dyn TxidSource` (or a concrete [`crate::TxidGenerator`])
/// and call [`TxidSource::generate`] once per request.
pub trait TxidSource {
    /// Mints a new identifier.
    fn next_txid(&self) -> Txid;

    /// Mints a new identifier and returns its text form.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ResourceExhausted`] if the output could not be
    /// allocated. Treat it as "no txid for this request".
    fn generate(&self) -> Result<String>;
}
