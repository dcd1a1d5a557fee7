use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use super::events::SpinEvent;

const DEFAULT_PICKER_CAPACITY: usize = 100;

/// Event bus carrying best-effort spin notifications, one channel per picker
#[derive(Debug, Clone)]
pub struct EventBus {
    /// Picker-specific event channels: picker_id -> sender
    picker_channels: Arc<RwLock<HashMap<String, broadcast::Sender<SpinEvent>>>>,
    capacity: usize,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_PICKER_CAPACITY)
    }

    /// Creates a bus whose per-picker channels buffer `capacity` events.
    /// Subscribers that fall further behind skip the oldest events.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            picker_channels: Arc::new(RwLock::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    /// Sender for a picker's channel, creating the channel if needed.
    ///
    /// Spin tasks grab this once so they can publish from synchronous
    /// callbacks.
    pub async fn sender(&self, picker_id: &str) -> broadcast::Sender<SpinEvent> {
        let picker_channels = self.picker_channels.read().await;
        if let Some(sender) = picker_channels.get(picker_id) {
            return sender.clone();
        }
        drop(picker_channels);

        debug!(picker_id = %picker_id, "No picker channel found - creating one");
        let mut picker_channels = self.picker_channels.write().await;
        picker_channels
            .entry(picker_id.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .clone()
    }

    /// Emits an event to all subscribers of a picker
    pub async fn emit_to_picker(&self, picker_id: &str, event: SpinEvent) {
        let event_type = event.event_type();
        match self.sender(picker_id).await.send(event) {
            Ok(receiver_count) => {
                debug!(
                    picker_id = %picker_id,
                    event_type,
                    receivers = receiver_count,
                    "Spin event emitted"
                );
            }
            Err(_) => {
                debug!(picker_id = %picker_id, event_type, "Spin event emitted with no receivers");
            }
        }
    }

    /// Subscribe to events for a specific picker
    pub async fn subscribe_to_picker(&self, picker_id: &str) -> broadcast::Receiver<SpinEvent> {
        self.sender(picker_id).await.subscribe()
    }
}
