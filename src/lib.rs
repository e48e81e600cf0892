// Wavetable Host - platform abstraction layer for a wavetable synthesis engine
// File access, byte-ordered reads, memory services and device stubs

// Module declarations
pub mod byte_order;
pub mod config;
pub mod context;
pub mod device;
pub mod duplicate;
pub mod error;
pub mod handle;
pub mod locator;
pub mod memory;
pub mod telemetry;

// Re-exports for convenience
pub use config::HostConfig;
pub use context::HostContext;
pub use error::{ErrorCode, HostError, HostErrorCodes};
pub use handle::{FileHandle, Ownership, ReadOutcome, ReadStatus};
pub use locator::{FileLocator, LibConfig};

use tracing::level_filters::LevelFilter;

fn tracing_level(level: log::LevelFilter) -> LevelFilter {
    match level {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    }
}

/// Initialize Android logging
///
/// Safe to call more than once; later calls are ignored.
#[cfg(target_os = "android")]
pub fn init_logging(level: log::LevelFilter) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    if let Ok(layer) = tracing_android::layer("WavetableHost") {
        let _ = tracing_subscriber::registry()
            .with(layer)
            .with(tracing_level(level))
            .try_init();
    }
}

/// Initialize desktop logging; `log` records are bridged into `tracing`.
///
/// Safe to call more than once; later calls are ignored.
#[cfg(not(target_os = "android"))]
pub fn init_logging(level: log::LevelFilter) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing_level(level))
        .with_writer(std::io::stderr)
        .try_init();
}
