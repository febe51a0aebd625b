//! Fixture file loading
//!
//! Reads a whole file into an owned buffer. On any failure no buffer is
//! handed out; partially filled buffers are dropped before returning.

use crate::error::{LoadError, LoadResult};
use std::fs::File;
use std::io::Read;
use std::ops::Deref;
use std::path::Path;

/// Contents of a fixture file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    data: Vec<u8>,
}

impl LoadedFile {
    /// Size in bytes (never zero)
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

impl Deref for LoadedFile {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl AsRef<[u8]> for LoadedFile {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// Load a whole file
///
/// Fails on an empty path, a file that cannot be opened or sized, an empty
/// file, a buffer that cannot be allocated, or a read that comes up short.
/// Nothing is logged here; [`Session::load_file`](crate::Session::load_file)
/// wraps this and reports the failure with the caller's location.
pub fn load_file(path: impl AsRef<Path>) -> LoadResult<LoadedFile> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(LoadError::InvalidArguments);
    }

    let mut file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let size = file
        .metadata()
        .map_err(|source| LoadError::Size {
            path: path.to_path_buf(),
            source,
        })?
        .len();

    if size == 0 {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    let allocation_failed = || LoadError::Allocation {
        path: path.to_path_buf(),
        size,
    };
    let len = usize::try_from(size).map_err(|_| allocation_failed())?;
    let mut data = Vec::new();
    data.try_reserve_exact(len).map_err(|_| allocation_failed())?;
    data.resize(len, 0);

    file.read_exact(&mut data).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(LoadedFile { data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.bin");
        let bytes: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        fs::write(&path, &bytes).unwrap();

        let loaded = load_file(&path).unwrap();
        assert_eq!(loaded.size(), 1000);
        assert_eq!(loaded.as_bytes(), bytes.as_slice());
        assert_eq!(loaded.into_bytes(), bytes);
    }

    #[test]
    fn test_load_single_byte() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("one.bin");
        fs::write(&path, [0u8]).unwrap();

        let loaded = load_file(&path).unwrap();
        assert_eq!(&*loaded, &[0u8]);
    }

    #[test]
    fn test_load_empty_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.bin");
        fs::write(&path, b"").unwrap();

        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::Empty { .. }));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_file(temp_dir.path().join("nope.bin")).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }

    #[test]
    fn test_load_empty_path_fails() {
        let err = load_file("").unwrap_err();
        assert!(matches!(err, LoadError::InvalidArguments));
    }

    #[cfg(unix)]
    #[test]
    fn test_load_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_file(temp_dir.path()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Read { .. } | LoadError::Empty { .. }
        ));
    }

    proptest! {
        #[test]
        fn prop_load_returns_written_bytes(bytes in proptest::collection::vec(any::<u8>(), 1..4096)) {
            let temp_dir = TempDir::new().unwrap();
            let path = temp_dir.path().join("fixture.bin");
            fs::write(&path, &bytes).unwrap();

            let loaded = load_file(&path).unwrap();
            prop_assert_eq!(loaded.size(), bytes.len() as u64);
            prop_assert_eq!(loaded.into_bytes(), bytes);
        }
    }
}
