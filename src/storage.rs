use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, ShareError};
use crate::scheme::Share;

/// Trait defining storage operations for shares
///
/// Implement this trait to create custom storage backends
///
/// # Example
/// ```
/// use nimshare::{ShareStore, Share};
///
/// struct MemoryStore;
///
/// impl ShareStore for MemoryStore {
///     fn store_share(&mut self, _: &Share) -> nimshare::Result<()> { Ok(()) }
///     fn load_share(&self, _: u8) -> nimshare::Result<Share> { unimplemented!() }
///     fn list_shares(&self) -> nimshare::Result<Vec<u8>> { Ok(Vec::new()) }
///     fn delete_share(&mut self, _: u8) -> nimshare::Result<()> { Ok(()) }
/// }
/// ```
pub trait ShareStore {
    /// Stores a share in persistent storage
    fn store_share(&mut self, share: &Share) -> Result<()>;

    /// Retrieves a share from storage by point
    fn load_share(&self, point: u8) -> Result<Share>;

    /// Lists all available share points, sorted
    fn list_shares(&self) -> Result<Vec<u8>>;

    /// Deletes a share from storage
    fn delete_share(&mut self, point: u8) -> Result<()>;
}

/// File system implementation of ShareStore
///
/// Shares of the secret file `<name>` live next to it as `<name>_<point>.dat`.
/// Each file holds exactly the share bytes with no header, so the point is
/// only recoverable from the file name. A reconstruction is written to
/// `<name>.out`.
///
/// # Example
/// ```
/// use nimshare::{FileShareStore, Share, ShareStore};
/// use tempfile::tempdir;
///
/// let temp_dir = tempdir().unwrap();
/// let mut store = FileShareStore::new(temp_dir.path().join("secret.txt"));
///
/// let share = Share { point: 1, data: vec![1, 2, 3] };
///
/// store.store_share(&share).unwrap();
/// assert!(temp_dir.path().join("secret.txt_1.dat").exists());
/// let loaded = store.load_share(1).unwrap();
/// assert_eq!(loaded.data, vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct FileShareStore {
    /// Path of the secret the shares belong to
    secret_path: PathBuf,
}

impl FileShareStore {
    pub fn new<P: AsRef<Path>>(secret_path: P) -> Self {
        Self {
            secret_path: secret_path.as_ref().to_path_buf(),
        }
    }

    pub fn secret_path(&self) -> &Path {
        &self.secret_path
    }

    fn with_suffix(&self, suffix: &str) -> PathBuf {
        let mut name = OsString::from(self.secret_path.as_os_str());
        name.push(suffix);
        PathBuf::from(name)
    }

    /// Gets the path for a share file
    pub fn share_path(&self, point: u8) -> PathBuf {
        self.with_suffix(&format!("_{point}.dat"))
    }

    /// Gets the path the joined secret is written to
    pub fn output_path(&self) -> PathBuf {
        self.with_suffix(".out")
    }

    /// Checks that every listed share file exists, is readable, is not
    /// empty, and that all have the same size.
    ///
    /// Returns the common share length, 0 for an empty list.
    pub fn check_shares(&self, points: &[u8]) -> Result<usize> {
        let mut expected = None;

        for &point in points {
            let path = self.share_path(point);
            let metadata = fs::metadata(&path).map_err(|e| not_found_as(e, point))?;
            File::open(&path)?;

            let len = metadata.len() as usize;
            if len == 0 {
                return Err(ShareError::EmptyShare(point));
            }
            match expected {
                None => expected = Some(len),
                Some(expected) if expected != len => {
                    return Err(ShareError::ShareLengthMismatch {
                        point,
                        expected,
                        got: len,
                    });
                }
                Some(_) => {}
            }
        }

        Ok(expected.unwrap_or(0))
    }

    /// Writes a joined secret to [`output_path`](Self::output_path)
    pub fn write_output(&self, data: &[u8]) -> Result<PathBuf> {
        let path = self.output_path();
        write_file(&path, data)?;
        Ok(path)
    }

    fn share_dir(&self) -> &Path {
        match self.secret_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

fn not_found_as(e: io::Error, point: u8) -> ShareError {
    if e.kind() == io::ErrorKind::NotFound {
        ShareError::ShareNotFound(point)
    } else {
        e.into()
    }
}

fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(data)?;
    writer.flush()?;
    Ok(())
}

impl ShareStore for FileShareStore {
    fn store_share(&mut self, share: &Share) -> Result<()> {
        write_file(&self.share_path(share.point), &share.data)
    }

    fn load_share(&self, point: u8) -> Result<Share> {
        let data = fs::read(self.share_path(point)).map_err(|e| not_found_as(e, point))?;
        Ok(Share { point, data })
    }

    fn list_shares(&self) -> Result<Vec<u8>> {
        let Some(stem) = self.secret_path.file_name() else {
            return Ok(Vec::new());
        };
        let prefix = format!("{}_", stem.to_string_lossy());
        let mut points = Vec::new();

        for entry in fs::read_dir(self.share_dir())? {
            let entry = entry?;
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();

            let point = file_name
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_suffix(".dat"))
                .and_then(|digits| {
                    // only the canonical spelling maps back to share_path
                    digits
                        .parse::<u8>()
                        .ok()
                        .filter(|point| point.to_string() == digits)
                });
            if let Some(point) = point.filter(|&p| p != 0) {
                points.push(point);
            }
        }

        points.sort_unstable();
        Ok(points)
    }

    fn delete_share(&mut self, point: u8) -> Result<()> {
        fs::remove_file(self.share_path(point)).map_err(|e| not_found_as(e, point))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_store() -> Result<()> {
        let temp_dir = tempdir()?;
        let mut store = FileShareStore::new(temp_dir.path().join("secret"));

        let share = Share {
            point: 1,
            data: vec![1, 2, 3, 4, 5],
        };

        store.store_share(&share)?;
        assert_eq!(fs::read(temp_dir.path().join("secret_1.dat"))?, vec![1, 2, 3, 4, 5]);

        let points = store.list_shares()?;
        assert_eq!(points, vec![1]);

        let loaded = store.load_share(1)?;
        assert_eq!(loaded, share);

        store.delete_share(1)?;
        assert!(store.load_share(1).is_err());
        assert!(store.list_shares()?.is_empty());

        Ok(())
    }

    #[test]
    fn test_invalid_share_access() {
        let temp_dir = tempdir().unwrap();
        let mut store = FileShareStore::new(temp_dir.path().join("secret"));

        assert!(matches!(
            store.load_share(1),
            Err(ShareError::ShareNotFound(1))
        ));
        assert!(matches!(
            store.delete_share(1),
            Err(ShareError::ShareNotFound(1))
        ));
    }

    #[test]
    fn test_multiple_shares() -> Result<()> {
        let temp_dir = tempdir()?;
        let mut store = FileShareStore::new(temp_dir.path().join("data.bin"));

        for i in [12u8, 3, 1, 200] {
            store.store_share(&Share {
                point: i,
                data: vec![i; 5],
            })?;
        }
        // unrelated files are ignored
        fs::write(temp_dir.path().join("data.bin"), b"plain")?;
        fs::write(temp_dir.path().join("data.bin_0.dat"), b"x")?;
        fs::write(temp_dir.path().join("data.bin_999.dat"), b"x")?;
        fs::write(temp_dir.path().join("other_4.dat"), b"x")?;
        fs::write(temp_dir.path().join("data.bin_007.dat"), b"x")?;
        fs::write(temp_dir.path().join("data.bin_+9.dat"), b"x")?;

        assert_eq!(store.list_shares()?, vec![1, 3, 12, 200]);

        for i in [1u8, 3, 12, 200] {
            let share = store.load_share(i)?;
            assert_eq!(share.point, i);
            assert_eq!(share.data, vec![i; 5]);
        }

        Ok(())
    }

    #[test]
    fn test_special_characters_path() -> Result<()> {
        let temp_dir = tempdir()?;
        let dir_path = temp_dir.path().join("special!@#$%^&()_-=+ chars");
        fs::create_dir_all(&dir_path)?;
        let mut store = FileShareStore::new(dir_path.join("my secret.txt"));

        let share = Share {
            point: 7,
            data: vec![1, 2, 3],
        };

        store.store_share(&share)?;
        assert!(dir_path.join("my secret.txt_7.dat").exists());
        assert_eq!(store.load_share(7)?.data, share.data);
        Ok(())
    }

    #[test]
    fn test_paths() {
        let store = FileShareStore::new("dir/plain.txt");
        assert_eq!(store.share_path(3), PathBuf::from("dir/plain.txt_3.dat"));
        assert_eq!(store.output_path(), PathBuf::from("dir/plain.txt.out"));
        assert_eq!(store.share_dir(), Path::new("dir"));
        assert_eq!(FileShareStore::new("plain").share_dir(), Path::new("."));
    }

    #[test]
    fn test_check_shares() -> Result<()> {
        let temp_dir = tempdir()?;
        let mut store = FileShareStore::new(temp_dir.path().join("s"));
        for point in 1..=3 {
            store.store_share(&Share {
                point,
                data: vec![point; 4],
            })?;
        }

        assert_eq!(store.check_shares(&[1, 2, 3])?, 4);
        assert_eq!(store.check_shares(&[])?, 0);
        assert!(matches!(
            store.check_shares(&[1, 4]),
            Err(ShareError::ShareNotFound(4))
        ));

        fs::write(store.share_path(5), b"")?;
        assert!(matches!(
            store.check_shares(&[5]),
            Err(ShareError::EmptyShare(5))
        ));

        fs::write(store.share_path(6), b"longer")?;
        assert!(matches!(
            store.check_shares(&[1, 6]),
            Err(ShareError::ShareLengthMismatch {
                point: 6,
                expected: 4,
                got: 6
            })
        ));
        Ok(())
    }

    #[test]
    fn test_write_output() -> Result<()> {
        let temp_dir = tempdir()?;
        let store = FileShareStore::new(temp_dir.path().join("s"));
        let path = store.write_output(b"joined")?;
        assert_eq!(path, temp_dir.path().join("s.out"));
        assert_eq!(fs::read(path)?, b"joined");
        Ok(())
    }
}
