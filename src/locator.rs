//! Driver-side file locators
//!
//! A driver opens an asset by path and hands the resulting [`FileLocator`]
//! to the host, which only ever borrows it. The locator also exposes the
//! positioned-read and size callbacks the engine uses for bulk access.

use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// An asset file kept open by the driver.
#[derive(Debug)]
pub struct FileLocator {
    path: Option<PathBuf>,
    file: Option<File>,
}

impl FileLocator {
    /// Open `path` for binary reading.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            file: Some(file),
        })
    }

    /// Wrap a file the driver opened some other way.
    pub fn from_file(file: File) -> Self {
        Self {
            path: None,
            file: Some(file),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn file(&self) -> Option<&File> {
        self.file.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Read up to `buf.len()` bytes starting at `offset`.
    ///
    /// Returns the number of bytes read; 0 if the locator is closed, the seek
    /// fails, or `offset` is at or past the end.
    pub fn read_at(&self, offset: u64, buf: &mut [u8]) -> usize {
        let Some(mut file) = self.file.as_ref() else {
            return 0;
        };
        if file.seek(SeekFrom::Start(offset)).is_err() {
            return 0;
        }

        let mut filled = 0;
        while filled < buf.len() {
            match file.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(count) => filled += count,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    log::warn!("[Locator] Read at offset {} failed: {}", offset, err);
                    break;
                }
            }
        }
        filled
    }

    /// Total length of the asset in bytes. Does not move the file cursor.
    pub fn size(&self) -> Result<u64> {
        let file = self.file.as_ref().context("locator is closed")?;
        let metadata = file.metadata().context("querying asset size")?;
        Ok(metadata.len())
    }

    /// Release the driver's file. Handles borrowing it must be closed first,
    /// which the borrow checker enforces.
    pub fn close(&mut self) {
        self.file = None;
    }
}

/// Mixer configuration published by the synthesis engine.
///
/// Read-only from the host's point of view; a driver uses it to size the
/// PCM buffer it renders into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LibConfig {
    /// Frames produced per render call
    pub mix_buffer_size: usize,
    pub num_channels: usize,
    pub sample_rate: u32,
}

impl Default for LibConfig {
    fn default() -> Self {
        Self {
            mix_buffer_size: 128,
            num_channels: 2,
            sample_rate: 22_050,
        }
    }
}

impl LibConfig {
    /// Interleaved samples in one render call.
    pub fn pcm_buffer_len(&self) -> usize {
        self.mix_buffer_size * self.num_channels
    }

    /// Bytes in one render call of 16-bit PCM.
    pub fn pcm_buffer_bytes(&self) -> usize {
        self.pcm_buffer_len() * std::mem::size_of::<i16>()
    }
}
