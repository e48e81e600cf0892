//! Handle duplication through descriptor-to-path resolution
//!
//! A duplicate is a fresh, read-only, owned file opened on the path backing
//! the source descriptor and positioned where the source currently is. It
//! has its own cursor, so seeks on one never move the other.
//!
//! Resolving a descriptor to a path needs the `/proc/self/fd` table, which
//! only Linux and Android provide. Elsewhere duplication fails with
//! [`HostError::Unsupported`] instead of aliasing the source descriptor.

use std::fs::File;
use std::path::PathBuf;

use crate::error::HostError;
use crate::handle::FileHandle;

/// Whether this build can resolve descriptors to paths.
pub const DUPLICATION_SUPPORTED: bool = cfg!(any(target_os = "linux", target_os = "android"));

cfg_if::cfg_if! {
    if #[cfg(any(target_os = "linux", target_os = "android"))] {
        /// Resolve the filesystem path an open file was opened from.
        pub fn resolve_descriptor_path(file: &File) -> Result<PathBuf, HostError> {
            use std::os::fd::AsRawFd;
            use std::os::unix::ffi::OsStrExt;

            let link = format!("/proc/self/fd/{}", file.as_raw_fd());
            let path = std::fs::read_link(&link).map_err(|err| HostError::InvalidHandle {
                reason: format!("cannot resolve {}: {}", link, err),
            })?;

            // PATH_MAX includes the terminating NUL.
            if path.as_os_str().as_bytes().len() >= libc::PATH_MAX as usize {
                return Err(HostError::InvalidHandle {
                    reason: format!("resolved path for {} exceeds PATH_MAX", link),
                });
            }

            Ok(path)
        }
    } else {
        pub fn resolve_descriptor_path(_file: &File) -> Result<PathBuf, HostError> {
            Err(HostError::Unsupported {
                operation: "descriptor path resolution",
            })
        }
    }
}

/// Produce an independent owned handle on the same content and position.
///
/// # Errors
/// - `InvalidHandle` if the path cannot be resolved or reopened
/// - `PositionFailed` if the source position cannot be read
/// - `SeekFailed` if the duplicate cannot be positioned
/// - `Unsupported` on platforms without descriptor resolution
///
/// The freshly opened file is closed before any error after step two is
/// returned.
pub fn duplicate_handle(source: &mut FileHandle<'_>) -> Result<FileHandle<'static>, HostError> {
    let span = tracing::debug_span!("duplicate_handle", ownership = ?source.ownership());
    let _entered = span.enter();

    let path = resolve_descriptor_path(source.file())?;
    tracing::debug!("[Duplicate] Resolved descriptor to {}", path.display());

    // Always read-only, whatever mode the source was opened with.
    let file = File::open(&path).map_err(|err| HostError::InvalidHandle {
        reason: format!("cannot reopen {}: {}", path.display(), err),
    })?;
    let mut duplicate = FileHandle::owned(file);

    let position = match source.position() {
        Ok(position) => position,
        Err(err) => {
            discard(duplicate);
            return Err(err);
        }
    };

    if let Err(err) = duplicate.seek(position) {
        discard(duplicate);
        return Err(err);
    }

    tracing::debug!("[Duplicate] Positioned duplicate at offset {}", position);
    Ok(duplicate)
}

fn discard(duplicate: FileHandle<'static>) {
    if let Err(err) = duplicate.close() {
        tracing::warn!("[Duplicate] Failed to close abandoned duplicate: {}", err);
    }
}

#[cfg(all(test, target_os = "linux"))]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolves_named_file_path() {
        let mut named = tempfile::NamedTempFile::new().unwrap();
        named.write_all(b"abc").unwrap();

        let resolved = resolve_descriptor_path(named.as_file()).unwrap();
        let expected = std::fs::canonicalize(named.path()).unwrap();
        assert_eq!(resolved, expected);
    }

    #[test]
    fn test_duplicate_of_unlinked_file_is_invalid_handle() {
        // An anonymous temp file has no reachable path to reopen.
        let file = tempfile::tempfile().unwrap();
        let mut source = FileHandle::borrowed(&file);

        let err = duplicate_handle(&mut source).unwrap_err();
        assert!(matches!(err, HostError::InvalidHandle { .. }));
    }

    #[test]
    fn test_duplicate_is_owned_and_positioned() {
        let mut named = tempfile::NamedTempFile::new().unwrap();
        named.write_all(&[10, 11, 12, 13, 14]).unwrap();

        let file = File::open(named.path()).unwrap();
        let mut source = FileHandle::borrowed(&file);
        source.seek(3).unwrap();

        let mut duplicate = duplicate_handle(&mut source).unwrap();
        assert!(duplicate.is_owned());
        assert_eq!(duplicate.position().unwrap(), 3);
        assert_eq!(duplicate.read_byte().unwrap(), 13);
        assert_eq!(source.position().unwrap(), 3);
        duplicate.close().unwrap();
    }

    #[test]
    fn test_support_flag_matches_target() {
        assert!(DUPLICATION_SUPPORTED);
    }
}
