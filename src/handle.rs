//! File handles handed to the engine core
//!
//! A [`FileHandle`] either borrows a file the caller keeps ownership of, or
//! owns a file the host opened itself during duplication. The two cases are
//! separate variants so a borrowed handle can never close the caller's file
//! and cannot outlive it.
//!
//! Every read is built on [`FileHandle::read_bytes`], so short reads and
//! end-of-file are decided in one place.

use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};

use serde::{Deserialize, Serialize};

use crate::byte_order;
use crate::error::HostError;

/// Whether closing a handle releases the underlying OS resource.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Ownership {
    /// Produced by duplication; close releases the file.
    Owned,
    /// Wraps a caller's file; close releases only the wrapper.
    Borrowed,
}

#[derive(Debug)]
enum Backing<'a> {
    Borrowed(&'a File),
    Owned(File),
}

/// Result status of a best-effort read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    /// The whole buffer was filled.
    Complete,
    /// The resource ran out first; `bytes_read` may be anything below the
    /// requested length, including 0.
    EndOfFile,
}

/// Bytes transferred by [`FileHandle::read_bytes`] plus how the read ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOutcome {
    pub bytes_read: usize,
    pub status: ReadStatus,
}

impl ReadOutcome {
    pub fn is_eof(&self) -> bool {
        self.status == ReadStatus::EndOfFile
    }
}

/// Positioned, byte-order aware reader over a host file.
///
/// Not meant for concurrent use; independent readers each take their own
/// handle via duplication.
#[derive(Debug)]
pub struct FileHandle<'a> {
    backing: Backing<'a>,
}

impl<'a> FileHandle<'a> {
    pub(crate) fn borrowed(file: &'a File) -> Self {
        Self {
            backing: Backing::Borrowed(file),
        }
    }

    pub(crate) fn owned(file: File) -> FileHandle<'static> {
        FileHandle {
            backing: Backing::Owned(file),
        }
    }

    pub fn ownership(&self) -> Ownership {
        match self.backing {
            Backing::Borrowed(_) => Ownership::Borrowed,
            Backing::Owned(_) => Ownership::Owned,
        }
    }

    pub fn is_owned(&self) -> bool {
        self.ownership() == Ownership::Owned
    }

    /// The file every operation runs against, whichever variant holds it.
    pub(crate) fn file(&self) -> &File {
        match &self.backing {
            Backing::Borrowed(file) => *file,
            Backing::Owned(file) => file,
        }
    }

    /// Read up to `buf.len()` bytes.
    ///
    /// # Returns
    /// * `Ok(ReadOutcome)` with status `Complete` when the buffer was filled,
    ///   or `EndOfFile` when the file ran out first
    /// * `Err(HostError::ReadFailed)` on an I/O error, carrying the number of
    ///   bytes already transferred
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<ReadOutcome, HostError> {
        let mut file = self.file();
        let mut filled = 0;

        while filled < buf.len() {
            match file.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Ok(ReadOutcome {
                        bytes_read: filled,
                        status: ReadStatus::EndOfFile,
                    })
                }
                Ok(count) => filled += count,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    return Err(HostError::ReadFailed {
                        bytes_read: filled,
                        details: err.to_string(),
                    })
                }
            }
        }

        Ok(ReadOutcome {
            bytes_read: filled,
            status: ReadStatus::Complete,
        })
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], HostError> {
        let mut bytes = [0u8; N];
        let outcome = self.read_bytes(&mut bytes)?;
        match outcome.status {
            ReadStatus::Complete => Ok(bytes),
            ReadStatus::EndOfFile => Err(HostError::EndOfFile),
        }
    }

    pub fn read_byte(&mut self) -> Result<u8, HostError> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    /// Read a 16-bit value stored most-significant byte first when
    /// `msb_first` is set, least-significant first otherwise.
    pub fn read_word(&mut self, msb_first: bool) -> Result<u16, HostError> {
        let bytes = self.read_array::<2>()?;
        Ok(byte_order::decode_u16(bytes, msb_first))
    }

    /// 32-bit counterpart of [`FileHandle::read_word`].
    pub fn read_dword(&mut self, msb_first: bool) -> Result<u32, HostError> {
        let bytes = self.read_array::<4>()?;
        Ok(byte_order::decode_u32(bytes, msb_first))
    }

    /// Seek to an absolute offset. Offsets past the end are accepted; the
    /// next read reports end-of-file.
    pub fn seek(&mut self, position: u64) -> Result<(), HostError> {
        let mut file = self.file();
        file.seek(SeekFrom::Start(position))
            .map(|_| ())
            .map_err(|err| HostError::SeekFailed {
                details: format!("seek to {}: {}", position, err),
            })
    }

    /// Seek relative to the current position.
    pub fn seek_relative(&mut self, offset: i64) -> Result<(), HostError> {
        let mut file = self.file();
        file.seek(SeekFrom::Current(offset))
            .map(|_| ())
            .map_err(|err| HostError::SeekFailed {
                details: format!("seek by {}: {}", offset, err),
            })
    }

    pub fn position(&mut self) -> Result<u64, HostError> {
        let mut file = self.file();
        file.stream_position()
            .map_err(|err| HostError::PositionFailed {
                details: err.to_string(),
            })
    }

    /// Dispose of the handle, releasing the OS file only when owned.
    pub(crate) fn close(self) -> Result<(), HostError> {
        match self.backing {
            Backing::Borrowed(_) => Ok(()),
            Backing::Owned(file) => release(file).map_err(|err| HostError::InvalidHandle {
                reason: format!("close failed: {}", err),
            }),
        }
    }
}

/// Release an owned file, surfacing the OS result that dropping a `File`
/// would discard.
fn release(file: File) -> std::io::Result<()> {
    cfg_if::cfg_if! {
        if #[cfg(unix)] {
            use std::os::fd::IntoRawFd;

            let fd = file.into_raw_fd();
            // SAFETY: `fd` was just taken out of an owned `File`, so nothing
            // else refers to it and it is closed exactly once here.
            if unsafe { libc::close(fd) } != 0 {
                return Err(std::io::Error::last_os_error());
            }
            Ok(())
        } else {
            drop(file);
            Ok(())
        }
    }
}
