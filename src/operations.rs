//! File-level split and join built on [`FileShareStore`].

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::scheme::{Scheme, Share};
use crate::storage::{FileShareStore, ShareStore};

/// Splits the file at `path` into `<path>_<point>.dat` share files
///
/// Returns the paths written, in point order.
///
/// # Example
/// ```
/// use nimshare::{Scheme, operations};
///
/// let dir = tempfile::tempdir().unwrap();
/// let secret = dir.path().join("plain.txt");
/// std::fs::write(&secret, b"attack at dawn").unwrap();
///
/// let scheme = Scheme::new(4, 2).unwrap();
/// let written = operations::split_file(&secret, &scheme).unwrap();
/// assert_eq!(written.len(), 4);
///
/// let joined = operations::join_file(&secret, &scheme, &[2, 4]).unwrap();
/// assert_eq!(std::fs::read(joined).unwrap(), b"attack at dawn");
/// ```
pub fn split_file<P: AsRef<Path>>(path: P, scheme: &Scheme) -> Result<Vec<PathBuf>> {
    let mut store = FileShareStore::new(path);
    let secret = fs::read(store.secret_path())?;
    let shares = scheme.split(&secret)?;

    let mut written = Vec::with_capacity(shares.len());
    for share in &shares {
        store.store_share(share)?;
        written.push(store.share_path(share.point));
    }

    info!(
        secret = %store.secret_path().display(),
        shares = shares.len(),
        threshold = scheme.threshold(),
        len = secret.len(),
        "split file"
    );
    Ok(written)
}

/// Joins the share files at `points` and writes `<path>.out`
///
/// Share files are checked for presence, non-zero and equal length before
/// any of them is read.
pub fn join_file<P: AsRef<Path>>(path: P, scheme: &Scheme, points: &[u8]) -> Result<PathBuf> {
    let store = FileShareStore::new(path);
    let len = store.check_shares(points)?;

    let shares = points
        .iter()
        .map(|&point| store.load_share(point))
        .collect::<Result<Vec<Share>>>()?;
    let secret = scheme.join(&shares)?;
    let output = store.write_output(&secret)?;

    info!(
        output = %output.display(),
        points = ?points,
        len,
        "joined file"
    );
    Ok(output)
}
