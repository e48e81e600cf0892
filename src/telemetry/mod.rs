//! Diagnostics telemetry collector.
//!
//! The collector keeps a bounded history of host events and fans them out
//! over a broadcast channel to any attached reporting sink. It is owned by
//! a [`crate::HostContext`]; there is no process-wide instance.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;

use crate::error::{ErrorCode, HostError};
use crate::handle::Ownership;

pub mod events;

pub use events::{DeviceKind, HandlePhase, MetricEvent, Severity, DEVICE_CATEGORY};

/// Snapshot of collector state for reporting.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TelemetrySnapshot {
    pub recent: Vec<MetricEvent>,
    pub total_events: u64,
    pub dropped_events: u64,
}

/// Broadcast-based collector retaining a bounded history of events.
pub struct TelemetryCollector {
    tx: broadcast::Sender<MetricEvent>,
    history: Mutex<VecDeque<MetricEvent>>,
    history_capacity: usize,
    total_events: AtomicU64,
    dropped_history: AtomicU64,
}

impl TelemetryCollector {
    /// Both capacities are clamped to at least one.
    pub fn new(buffer: usize, history_capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer.max(1));
        let history_capacity = history_capacity.max(1);
        Self {
            tx,
            history: Mutex::new(VecDeque::with_capacity(history_capacity)),
            history_capacity,
            total_events: AtomicU64::new(0),
            dropped_history: AtomicU64::new(0),
        }
    }

    // A panic while holding the history lock leaves it in a usable state,
    // so poisoning is ignored.
    fn lock_history(&self) -> MutexGuard<'_, VecDeque<MetricEvent>> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn publish(&self, event: MetricEvent) {
        self.total_events.fetch_add(1, Ordering::Relaxed);
        {
            let mut history = self.lock_history();
            if history.len() == self.history_capacity {
                history.pop_front();
                self.dropped_history.fetch_add(1, Ordering::Relaxed);
            }
            history.push_back(event.clone());
        }

        // No subscribers is not an error.
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MetricEvent> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        let history = self.lock_history();
        TelemetrySnapshot {
            recent: history.iter().cloned().collect(),
            total_events: self.total_events.load(Ordering::Relaxed),
            dropped_events: self.dropped_history.load(Ordering::Relaxed),
        }
    }

    pub fn record_device(&self, device: DeviceKind, state: bool) {
        self.publish(MetricEvent::Device {
            device,
            severity: Severity::NoFilter,
            category: DEVICE_CATEGORY,
            code: device.code(),
            state,
        });
    }

    pub fn record_handle(&self, phase: HandlePhase, ownership: Ownership) {
        self.publish(MetricEvent::HandleLifecycle { phase, ownership });
    }

    pub fn record_error(&self, err: &HostError, context: impl Into<String>) {
        self.publish(MetricEvent::Error {
            code: err.code(),
            context: context.into(),
        });
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new(256, 64)
    }
}
