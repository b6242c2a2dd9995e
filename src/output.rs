//! Writes a finished image to disk without ever leaving a partial file.

use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;

use crate::error::OutputError;

/// Extension appended to the output base name.
pub const EXTENSION: &str = "png";

/// `<basename>.png`, keeping any directories in `basename`.
pub fn png_path(basename: &str) -> PathBuf {
    PathBuf::from(format!("{basename}.{EXTENSION}"))
}

fn parent_dir_or_dot(path: &Path) -> &Path {
    // `Path::parent` gives `Some("")` for bare names like `result.png`.
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// Writes `bytes` to a temp file next to `dest`, then renames it over `dest`.
///
/// On error the temp file is dropped (and removed) and `dest` is untouched.
pub fn write_atomic(dest: &Path, bytes: &[u8]) -> Result<(), OutputError> {
    let dir = parent_dir_or_dot(dest);
    let mut tmp = NamedTempFile::new_in(dir).map_err(|source| OutputError::Create {
        path: dest.to_path_buf(),
        source,
    })?;

    let write_err = |source| OutputError::Write {
        path: dest.to_path_buf(),
        source,
    };
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    debug!("Wrote {} bytes to {}", bytes.len(), tmp.path().display());

    tmp.persist(dest).map_err(|err| OutputError::Persist {
        path: dest.to_path_buf(),
        source: err.error,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_png_extension() {
        assert_eq!(png_path("result"), PathBuf::from("result.png"));
        assert_eq!(png_path("out/dir/img"), PathBuf::from("out/dir/img.png"));
    }

    #[test]
    fn bare_name_resolves_to_current_dir() {
        assert_eq!(parent_dir_or_dot(Path::new("result.png")), Path::new("."));
        assert_eq!(parent_dir_or_dot(Path::new("a/b.png")), Path::new("a"));
    }

    #[test]
    fn writes_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.png");
        write_atomic(&dest, b"first").unwrap();
        write_atomic(&dest, b"second").unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"second");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn missing_directory_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("missing").join("out.png");
        let err = write_atomic(&dest, b"data").unwrap_err();
        assert!(matches!(err, OutputError::Create { .. }));
        assert!(!dest.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
