// HostContext: explicit host instance passed to every engine call
// Replaces process-wide engine state with a value the caller owns

use std::fs::File;

use crate::config::HostConfig;
use crate::duplicate::duplicate_handle;
use crate::error::{log_host_error, HostError};
use crate::handle::FileHandle;
use crate::locator::FileLocator;
use crate::memory::{self, HostBlock};
use crate::telemetry::{HandlePhase, TelemetryCollector};

/// Host instance handed to the synthesis engine
///
/// Created by [`HostContext::init`] and consumed by
/// [`HostContext::shutdown`]. Holds no file state of its own: every handle
/// it produces is a separate value whose disposal goes through
/// [`HostContext::close_file`].
pub struct HostContext {
    config: HostConfig,
    telemetry: TelemetryCollector,
}

impl HostContext {
    /// Create a host instance and install logging at the configured level.
    ///
    /// Logging is process-wide; if a subscriber is already installed the
    /// existing one is kept.
    pub fn init(config: HostConfig) -> Result<Self, HostError> {
        crate::init_logging(config.logging.level_filter());
        let telemetry = TelemetryCollector::new(
            config.telemetry.channel_capacity,
            config.telemetry.history_capacity,
        );
        log::debug!("[HostContext] Initialized");
        Ok(Self { config, telemetry })
    }

    /// Tear down the context. Nothing is held that could fail to release.
    pub fn shutdown(self) -> Result<(), HostError> {
        log::debug!(
            "[HostContext] Shutdown after {} events",
            self.telemetry.snapshot().total_events
        );
        Ok(())
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn telemetry(&self) -> &TelemetryCollector {
        &self.telemetry
    }

    fn report(&self, err: HostError, context: &str) -> HostError {
        log_host_error(&err, context);
        self.telemetry.record_error(&err, context);
        err
    }

    // ========================================================================
    // FILE LIFECYCLE
    // ========================================================================

    /// Open a borrowed handle on the driver's locator.
    ///
    /// # Errors
    /// `InvalidHandle` if the driver has already released the locator's file
    pub fn open_file<'a>(&self, locator: &'a FileLocator) -> Result<FileHandle<'a>, HostError> {
        let file = locator.file().ok_or_else(|| {
            self.report(
                HostError::InvalidHandle {
                    reason: "locator has no open file".to_string(),
                },
                "open_file",
            )
        })?;
        Ok(self.open_borrowed(file))
    }

    /// Open a borrowed handle directly on a caller-owned file.
    pub fn open_borrowed<'a>(&self, file: &'a File) -> FileHandle<'a> {
        let handle = FileHandle::borrowed(file);
        self.telemetry
            .record_handle(HandlePhase::Opened, handle.ownership());
        log::debug!("[HostContext] Opened borrowed handle");
        handle
    }

    /// Duplicate `handle` into an independent owned handle.
    ///
    /// See [`crate::duplicate::duplicate_handle`] for the error contract.
    pub fn duplicate(&self, handle: &mut FileHandle<'_>) -> Result<FileHandle<'static>, HostError> {
        let duplicate = duplicate_handle(handle).map_err(|err| self.report(err, "duplicate"))?;
        self.telemetry
            .record_handle(HandlePhase::Duplicated, duplicate.ownership());
        log::debug!("[HostContext] Duplicated handle");
        Ok(duplicate)
    }

    /// Close a handle. Owned handles release their file; borrowed handles
    /// leave the caller's file open.
    ///
    /// # Errors
    /// `InvalidHandle` if releasing an owned file fails
    pub fn close_file(&self, handle: FileHandle<'_>) -> Result<(), HostError> {
        let ownership = handle.ownership();
        handle.close().map_err(|err| self.report(err, "close_file"))?;
        self.telemetry.record_handle(HandlePhase::Closed, ownership);
        log::debug!("[HostContext] Closed {:?} handle", ownership);
        Ok(())
    }

    // ========================================================================
    // MEMORY
    // ========================================================================

    pub fn allocate(&self, size: i32) -> Option<HostBlock> {
        let block = memory::allocate(size);
        if block.is_none() {
            log::warn!("[HostContext] Allocation of {} bytes refused", size);
        }
        block
    }

    pub fn release(&self, block: HostBlock) {
        memory::release(block);
    }
}
