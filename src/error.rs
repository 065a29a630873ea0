use std::collections::TryReserveError;
use std::io;
use thiserror::Error;

/// Error type for secret sharing operations
#[derive(Error, Debug)]
pub enum ShareError {
    /// Invalid total shares count (must be 1..=255)
    #[error("Invalid share count {0}, must be between 1 and 255")]
    InvalidShareCount(u16),

    /// Invalid threshold value (must be >= 1)
    #[error("Invalid threshold value {0}")]
    InvalidThreshold(u16),

    /// Threshold exceeds total shares
    #[error("Threshold {threshold} exceeds total shares {total_shares}")]
    ThresholdTooLarge { threshold: u16, total_shares: u16 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Two supplied shares sit at the same point
    #[error("Duplicate share point {0}")]
    DuplicatePoint(u8),

    /// Fewer shares than the quorum were supplied to join
    #[error("Need at least {needed} shares, got {got}")]
    InsufficientShares { needed: usize, got: usize },

    /// Inconsistent share lengths
    #[error("Inconsistent share lengths")]
    InconsistentShareLength,

    /// Injected padding does not hold exactly (k - 1) * len bytes
    #[error("Random buffer must be {expected} bytes, got {got}")]
    InvalidRandomBuffer { expected: usize, got: usize },

    #[error("Entropy source failure: {0}")]
    Entropy(String),

    /// `(threshold - 1) * len` padding bytes do not fit in memory
    #[error("Secret of {len} bytes is too large to split with threshold {threshold}")]
    SecretTooLarge { len: usize, threshold: u8 },

    #[error("Buffer allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    /// Share file for the given point does not exist
    #[error("Share {0} not found")]
    ShareNotFound(u8),

    /// Share file for the given point has zero length
    #[error("Share {0} has zero length")]
    EmptyShare(u8),

    #[error("Share {point} is {got} bytes, expected {expected}")]
    ShareLengthMismatch {
        point: u8,
        expected: usize,
        got: usize,
    },

    /// General I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ShareError>;
