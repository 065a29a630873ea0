//! Threshold secret sharing over the nimber field of order 256
//!
//! A secret byte buffer is split into `m` shares such that any `k` of them
//! rebuild it exactly while `k - 1` reveal nothing. Every byte of the secret
//! is the value at point 0 of a degree `k - 1` polynomial whose values at
//! points 1..k are random; share `p` holds that polynomial sampled at `p`.
//!
//! # Quick Start
//!
//! ```
//! use nimshare::{FileShareStore, Scheme, ShareStore};
//!
//! // Create a scheme with 5 shares and threshold 3
//! let scheme = Scheme::new(5, 3).unwrap();
//!
//! let secret = b"my secret data";
//! let shares = scheme.split(secret).unwrap();
//!
//! // Store shares next to the secret as secret.bin_<point>.dat
//! let temp_dir = tempfile::tempdir().unwrap();
//! let mut store = FileShareStore::new(temp_dir.path().join("secret.bin"));
//! for share in &shares {
//!     store.store_share(share).unwrap();
//! }
//!
//! // Join any 3 of them
//! let loaded_shares = vec![
//!     store.load_share(1).unwrap(),
//!     store.load_share(3).unwrap(),
//!     store.load_share(4).unwrap(),
//! ];
//! let joined = scheme.join(&loaded_shares).unwrap();
//! assert_eq!(joined, secret);
//! ```

mod coefficients;
mod config;
mod error;
mod evaluator;
mod finite_field;
mod random;
mod scheme;
mod storage;

pub mod operations;

pub use coefficients::CrossCoefficients;
pub use config::{Config, QuorumPolicy, SplitMode};
pub use error::{Result, ShareError};
pub use evaluator::evaluate;
pub use finite_field::{FieldTables, Nimber, tables};
pub use random::{FixedRandom, OsRandom, RandomSource, RngRandom};
pub use scheme::{Scheme, SchemeBuilder, Share};
pub use storage::{FileShareStore, ShareStore};

// Re-export common types for convenience
pub mod prelude {
    pub use super::{
        Config, FileShareStore, QuorumPolicy, Result, Scheme, Share, ShareError, ShareStore,
        SplitMode,
    };
}
