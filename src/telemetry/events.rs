//! Diagnostic event types published by the host layer to an external
//! reporting sink.

use serde::{Deserialize, Serialize};

use crate::handle::Ownership;

/// Category code carried by every device-feedback event.
pub const DEVICE_CATEGORY: u32 = 0x1a54_b6e8;

/// Report severities, lowest number most severe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Always reported, bypassing severity filtering
    NoFilter,
    Fatal,
    Error,
    Warning,
    Info,
    Detail,
}

/// Device-feedback outputs the engine can toggle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Vibrate,
    Led,
    Backlight,
}

impl DeviceKind {
    /// Code reported alongside [`DEVICE_CATEGORY`].
    pub fn code(self) -> u32 {
        match self {
            DeviceKind::Vibrate => 0x0000_0001,
            DeviceKind::Led => 0x0000_0002,
            DeviceKind::Backlight => 0x0000_0003,
        }
    }
}

/// Points in a file handle's life that get reported.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HandlePhase {
    Opened,
    Duplicated,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum MetricEvent {
    Device {
        device: DeviceKind,
        severity: Severity,
        category: u32,
        code: u32,
        state: bool,
    },
    HandleLifecycle {
        phase: HandlePhase,
        ownership: Ownership,
    },
    Error {
        code: i32,
        context: String,
    },
}
