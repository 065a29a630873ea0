//! Sources of the non-secret polynomial samples used by split.
//!
//! The padding is what hides the secret, so production splits use
//! [`OsRandom`], which draws fresh system entropy on every call. The other
//! sources exist for reproducible tests.

use crate::error::{Result, ShareError};
use rand::rngs::OsRng;
use rand_chacha::ChaCha20Rng;
use rand_core::{CryptoRng, RngCore, SeedableRng};

/// Fills split padding buffers
pub trait RandomSource {
    /// Overwrites every byte of `buf`
    fn fill_padding(&mut self, buf: &mut [u8]) -> Result<()>;
}

/// ChaCha20 seeded from the operating system, reseeded on every fill
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_padding(&mut self, buf: &mut [u8]) -> Result<()> {
        let mut rng =
            ChaCha20Rng::try_from_rng(&mut OsRng).map_err(|e| ShareError::Entropy(e.to_string()))?;
        rng.fill_bytes(buf);
        Ok(())
    }
}

/// Replays a caller-supplied padding buffer
///
/// The buffer must be exactly as long as the padding requested.
///
/// # Example
/// ```
/// use nimshare::{FixedRandom, Scheme};
///
/// let scheme = Scheme::new(5, 3).unwrap();
/// let padding = [0u8; 2 * 4];
/// let shares = scheme
///     .split_with(b"abcd", &mut FixedRandom::new(&padding))
///     .unwrap();
/// assert_eq!(shares[2].data, b"abcd");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom<'a> {
    bytes: &'a [u8],
}

impl<'a> FixedRandom<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }
}

impl RandomSource for FixedRandom<'_> {
    fn fill_padding(&mut self, buf: &mut [u8]) -> Result<()> {
        if buf.len() != self.bytes.len() {
            return Err(ShareError::InvalidRandomBuffer {
                expected: buf.len(),
                got: self.bytes.len(),
            });
        }
        buf.copy_from_slice(self.bytes);
        Ok(())
    }
}

/// Adapts a caller-owned cryptographic RNG
#[derive(Debug, Clone)]
pub struct RngRandom<R>(pub R);

impl<R: CryptoRng> RandomSource for RngRandom<R> {
    fn fill_padding(&mut self, buf: &mut [u8]) -> Result<()> {
        self.0.fill_bytes(buf);
        Ok(())
    }
}
