use crate::{
    Alphabet, AtomicTicker, MonotonicClock, RandSource, Result, TXID_LEN, TXID_SIZE, ThreadRandom,
    TickSource, Txid, TxidSource,
};
#[cfg(feature = "tracing")]
use tracing::instrument;

/// The generator most hosts want: a shared lock-free ticker over the
/// background [`MonotonicClock`] and the thread-local CSPRNG.
pub type DefaultTxidGenerator = TxidGenerator<AtomicTicker<MonotonicClock>, ThreadRandom>;

/// Mints [`Txid`]s from a [`TickSource`] and a [`RandSource`].
///
/// The generator owns both sources, so tests can inject a fake clock or a
/// deterministic RNG and independent generators never share hidden state.
/// It is `Sync` whenever both sources are, e.g. [`DefaultTxidGenerator`].
///
/// # Example
/// ```
/// use txid::{AtomicTicker, MonotonicClock, TXID_LEN, ThreadRandom, TxidGenerator};
///
/// let generator = TxidGenerator::new(
///     AtomicTicker::new(MonotonicClock::default()),
///     ThreadRandom,
/// );
///
/// let a = generator.next_txid();
/// let b = generator.next_txid();
/// assert_ne!(a, b);
/// assert_eq!(a.to_string().len(), TXID_LEN);
/// ```
#[derive(Debug)]
pub struct TxidGenerator<K, R> {
    ticker: K,
    rng: R,
    alphabet: &'static Alphabet,
}

impl Default for DefaultTxidGenerator {
    fn default() -> Self {
        Self::new(AtomicTicker::new(MonotonicClock::default()), ThreadRandom)
    }
}

impl<K, R> TxidGenerator<K, R>
where
    K: TickSource,
    R: RandSource,
{
    /// Creates a generator encoding with [`Alphabet::HEX_LOWER`].
    pub fn new(ticker: K, rng: R) -> Self {
        Self {
            ticker,
            rng,
            alphabet: &Alphabet::HEX_LOWER,
        }
    }

    /// Switches the alphabet used by [`Self::generate`] and
    /// [`Self::generate_to_buf`].
    #[must_use]
    pub fn with_alphabet(mut self, alphabet: &'static Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// The alphabet text is encoded with.
    pub fn alphabet(&self) -> &'static Alphabet {
        self.alphabet
    }

    /// The tick source.
    pub fn ticker(&self) -> &K {
        &self.ticker
    }

    /// Mints a new [`Txid`]: the current tick laid over 96 fresh random bits.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_txid(&self) -> Txid {
        let tick = self.ticker.next_tick();
        let mut random = [0u8; TXID_SIZE];
        self.rng.fill_bytes(&mut random);
        Txid::from_parts(tick, random)
    }

    /// Mints a new txid and encodes it into `buf` without allocating.
    pub fn generate_to_buf(&self, buf: &mut [u8; TXID_LEN]) -> Txid {
        let txid = self.next_txid();
        txid.encode_to_buf(self.alphabet, buf);
        txid
    }

    /// Mints a new txid and returns its [`TXID_LEN`]-character text form.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ResourceExhausted`] if the output string could
    /// not be allocated. Nothing is retried.
    pub fn generate(&self) -> Result<String> {
        let mut out = Vec::new();
        out.try_reserve_exact(TXID_LEN)?;

        let mut buf = [0u8; TXID_LEN];
        self.generate_to_buf(&mut buf);
        out.extend_from_slice(&buf);

        // SAFETY: alphabet symbols are always ASCII
        Ok(unsafe { String::from_utf8_unchecked(out) })
    }
}

impl<K, R> TxidSource for TxidGenerator<K, R>
where
    K: TickSource,
    R: RandSource,
{
    fn next_txid(&self) -> Txid {
        self.next_txid()
    }

    fn generate(&self) -> Result<String> {
        self.generate()
    }
}
