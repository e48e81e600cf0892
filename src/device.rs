//! Device-feedback stubs
//!
//! No vibration motor, LED or backlight is driven. Each request is reported
//! as a diagnostic event so a reporting sink can observe what the engine
//! asked for.

use crate::context::HostContext;
use crate::error::HostError;
use crate::telemetry::{DeviceKind, DEVICE_CATEGORY};

impl HostContext {
    fn report_device(&self, device: DeviceKind, state: bool) -> Result<(), HostError> {
        log::info!(
            "[Device] category=0x{:08x} code=0x{:08x} state={}",
            DEVICE_CATEGORY,
            device.code(),
            state
        );
        self.telemetry().record_device(device, state);
        Ok(())
    }

    pub fn vibrate(&self, state: bool) -> Result<(), HostError> {
        self.report_device(DeviceKind::Vibrate, state)
    }

    pub fn led(&self, state: bool) -> Result<(), HostError> {
        self.report_device(DeviceKind::Led, state)
    }

    pub fn backlight(&self, state: bool) -> Result<(), HostError> {
        self.report_device(DeviceKind::Backlight, state)
    }

    /// Cooperative yield hook. The host runs the engine on a preemptively
    /// scheduled thread, so it never asks for a reschedule.
    pub fn yield_now(&self) -> bool {
        false
    }
}
