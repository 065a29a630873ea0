use crate::coefficients::CrossCoefficients;
use crate::config::{Config, QuorumPolicy};
use crate::error::{Result, ShareError};
use crate::evaluator::evaluate;
use crate::finite_field::{FieldTables, tables};
use crate::random::{FixedRandom, OsRandom, RandomSource};
use tracing::debug;

#[cfg(feature = "zeroize")]
use zeroize::{Zeroize, ZeroizeOnDrop};

/// One sample of the hidden polynomial for every byte of the secret
///
/// All bytes of `data` are taken at the same `point`. Point 0 holds the secret
/// itself and is never handed out by [`Scheme::split`].
///
/// # Example
/// ```
/// use nimshare::Scheme;
///
/// let scheme = Scheme::new(5, 3).unwrap();
/// let shares = scheme.split(b"secret").unwrap();
/// assert_eq!(shares[0].point, 1);
/// assert_eq!(shares[0].data.len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "zeroize", derive(Zeroize, ZeroizeOnDrop))]
pub struct Share {
    /// Evaluation point of this share (1..=255)
    pub point: u8,
    /// One field element per secret byte
    pub data: Vec<u8>,
}

/// A (m, k) threshold scheme over the nimber field
///
/// Any `k` of the `m` shares produced by [`split`](Self::split) recover the
/// secret through [`join`](Self::join); fewer reveal nothing about it.
///
/// # Example
/// ```
/// use nimshare::Scheme;
///
/// let scheme = Scheme::new(5, 3).unwrap();
/// let secret = b"my secret data";
/// let shares = scheme.split(secret).unwrap();
///
/// let picked = [shares[4].clone(), shares[0].clone(), shares[2].clone()];
/// assert_eq!(scheme.join(&picked).unwrap(), secret);
/// ```
#[derive(Debug, Clone)]
pub struct Scheme {
    /// Number of shares produced by split (m)
    total_shares: u8,
    /// Number of shares needed by join (k)
    threshold: u8,
    config: Config,
    tables: &'static FieldTables,
}

/// Builder for [`Scheme`] instances with custom configuration
///
/// # Example
/// ```
/// use nimshare::{Config, QuorumPolicy, Scheme, SplitMode};
///
/// let config = Config::new()
///     .with_mode(SplitMode::Parallel)
///     .with_quorum(QuorumPolicy::Permissive);
///
/// let scheme = Scheme::builder(5, 3).with_config(config).build().unwrap();
/// assert_eq!(scheme.threshold(), 3);
/// ```
#[derive(Debug)]
pub struct SchemeBuilder {
    total_shares: u16,
    threshold: u16,
    config: Config,
}

impl SchemeBuilder {
    /// * `total_shares` - shares to create (1-255)
    /// * `threshold` - shares required to join (1-total_shares)
    pub fn new(total_shares: u16, threshold: u16) -> Self {
        Self {
            total_shares,
            threshold,
            config: Config::default(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Validates the parameters and builds the scheme
    ///
    /// # Errors
    /// - `total_shares` outside 1..=255
    /// - `threshold` is 0 or greater than `total_shares`
    /// - configuration validation fails
    pub fn build(self) -> Result<Scheme> {
        if self.total_shares == 0 || self.total_shares > 255 {
            return Err(ShareError::InvalidShareCount(self.total_shares));
        }
        if self.threshold == 0 {
            return Err(ShareError::InvalidThreshold(self.threshold));
        }
        if self.threshold > self.total_shares {
            return Err(ShareError::ThresholdTooLarge {
                threshold: self.threshold,
                total_shares: self.total_shares,
            });
        }

        self.config.validate()?;

        Ok(Scheme {
            total_shares: self.total_shares as u8,
            threshold: self.threshold as u8,
            config: self.config,
            tables: tables(),
        })
    }
}

/// Padding storage, wiped on drop when zeroize is enabled
#[cfg(feature = "zeroize")]
type PaddingBuf = zeroize::Zeroizing<Vec<u8>>;
#[cfg(not(feature = "zeroize"))]
type PaddingBuf = Vec<u8>;

/// Zero-filled buffer whose allocation failure is reported, not aborted on
fn zeroed_buffer(len: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)?;
    buf.resize(len, 0);
    Ok(buf)
}

/// Bytes of padding a split of `len` bytes needs at `threshold`
fn padding_len(threshold: u8, len: usize) -> Result<usize> {
    (threshold as usize - 1)
        .checked_mul(len)
        .ok_or(ShareError::SecretTooLarge { len, threshold })
}

impl Scheme {
    /// Creates a scheme with the default configuration
    pub fn new(total_shares: u16, threshold: u16) -> Result<Self> {
        SchemeBuilder::new(total_shares, threshold).build()
    }

    pub fn builder(total_shares: u16, threshold: u16) -> SchemeBuilder {
        SchemeBuilder::new(total_shares, threshold)
    }

    pub fn total_shares(&self) -> u8 {
        self.total_shares
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Splits a secret into `m` shares at points 1..=m
    ///
    /// Padding is drawn from fresh system entropy on every call.
    pub fn split(&self, secret: &[u8]) -> Result<Vec<Share>> {
        self.split_with(secret, &mut OsRandom)
    }

    /// Splits using a caller-supplied padding buffer of `(k - 1) * secret.len()`
    /// bytes. Only for reproducible tests; the padding is what protects the
    /// secret.
    pub fn split_with_padding(&self, secret: &[u8], padding: &[u8]) -> Result<Vec<Share>> {
        self.split_with(secret, &mut FixedRandom::new(padding))
    }

    /// Splits a secret, drawing padding from `source`
    ///
    /// The secret sits at point 0 and `k - 1` padding streams at points
    /// 1..k; the shares are the interpolating polynomial sampled at 1..=m.
    pub fn split_with<S: RandomSource + ?Sized>(
        &self,
        secret: &[u8],
        source: &mut S,
    ) -> Result<Vec<Share>> {
        let len = secret.len();
        let k = self.threshold as usize;

        let mut padding: PaddingBuf = zeroed_buffer(padding_len(self.threshold, len)?)?.into();
        source.fill_padding(&mut padding)?;

        let in_points: Vec<u8> = (0..self.threshold).collect();
        let out_points: Vec<u8> = (1..=self.total_shares).collect();

        let mut inputs: Vec<&[u8]> = Vec::with_capacity(k);
        inputs.push(secret);
        inputs.extend((0..k - 1).map(|i| &padding[i * len..(i + 1) * len]));

        let coeffs = CrossCoefficients::compute(self.tables, &in_points, &out_points);
        debug!(
            in_points = ?in_points,
            out_points = ?out_points,
            in_cross = ?coeffs.in_cross,
            out_cross = ?coeffs.out_cross,
            len,
            "split"
        );

        let mut outputs = out_points
            .iter()
            .map(|_| zeroed_buffer(len))
            .collect::<Result<Vec<_>>>()?;
        evaluate(
            self.tables,
            &inputs,
            &in_points,
            &out_points,
            &coeffs,
            &mut outputs,
            &self.config,
        );

        Ok(outputs
            .into_iter()
            .zip(out_points)
            .map(|(data, point)| Share { point, data })
            .collect())
    }

    /// Recovers the secret from shares produced by [`split`](Self::split)
    ///
    /// # Errors
    /// - no shares, or fewer than `k` under [`QuorumPolicy::Enforce`]
    /// - shares of differing lengths
    /// - two shares at the same point
    pub fn join(&self, shares: &[Share]) -> Result<Vec<u8>> {
        let pairs: Vec<(u8, &[u8])> = shares
            .iter()
            .map(|share| (share.point, share.data.as_slice()))
            .collect();
        self.join_slices(&pairs)
    }

    /// Recovers the buffer at point 0 from borrowed `(point, buffer)` pairs
    ///
    /// Order of the pairs does not matter. Under [`QuorumPolicy::Permissive`]
    /// fewer than `k` shares still produce a buffer, which is not the secret.
    pub fn join_slices(&self, shares: &[(u8, &[u8])]) -> Result<Vec<u8>> {
        let needed = match self.config.quorum {
            QuorumPolicy::Enforce => self.threshold as usize,
            QuorumPolicy::Permissive => 1,
        };
        if shares.len() < needed {
            return Err(ShareError::InsufficientShares {
                needed,
                got: shares.len(),
            });
        }

        let len = shares[0].1.len();
        if !shares.iter().all(|(_, data)| data.len() == len) {
            return Err(ShareError::InconsistentShareLength);
        }

        let mut seen = [false; 256];
        for &(point, _) in shares {
            if std::mem::replace(&mut seen[point as usize], true) {
                return Err(ShareError::DuplicatePoint(point));
            }
        }

        let in_points: Vec<u8> = shares.iter().map(|&(point, _)| point).collect();
        let inputs: Vec<&[u8]> = shares.iter().map(|&(_, data)| data).collect();
        let out_points = [0u8];

        let coeffs = CrossCoefficients::compute(self.tables, &in_points, &out_points);
        debug!(
            in_points = ?in_points,
            in_cross = ?coeffs.in_cross,
            out_cross = ?coeffs.out_cross,
            len,
            "join"
        );

        let mut outputs = vec![zeroed_buffer(len)?];
        evaluate(
            self.tables,
            &inputs,
            &in_points,
            &out_points,
            &coeffs,
            &mut outputs,
            &self.config,
        );

        Ok(std::mem::take(&mut outputs[0]))
    }
}
