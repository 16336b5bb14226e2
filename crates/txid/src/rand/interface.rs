/// A trait for sources of random bytes.
///
/// This abstraction allows you to plug in a real random source or a mocked
/// random source in tests. Production sources must be cryptographically
/// strong: the random suffix is the only thing that keeps txids minted in the
/// same tick apart, and it must not be predictable.
///
/// # Example
/// ```
/// use txid::RandSource;
///
/// struct FixedRand;
/// impl RandSource for FixedRand {
///     fn fill_bytes(&self, dest: &mut [u8]) {
///         dest.fill(0xAB);
///     }
/// }
///
/// let mut buf = [0u8; 4];
/// FixedRand.fill_bytes(&mut buf);
/// assert_eq!(buf, [0xAB; 4]);
/// ```
pub trait RandSource {
    /// Fills `dest` entirely with random bytes.
    fn fill_bytes(&self, dest: &mut [u8]);
}

impl<R: RandSource + ?Sized> RandSource for &R {
    fn fill_bytes(&self, dest: &mut [u8]) {
        (**self).fill_bytes(dest);
    }
}

impl<R: RandSource + ?Sized> RandSource for std::sync::Arc<R> {
    fn fill_bytes(&self, dest: &mut [u8]) {
        (**self).fill_bytes(dest);
    }
}
