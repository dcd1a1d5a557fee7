use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use luckypicker::{
    event::SpinEventError, Participant, PickerError, SpinCompletionHandler, SpinEvent,
    SpinEventHandler,
};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Completion handler that remembers every winner it was given
#[derive(Clone, Default)]
pub struct RecordingCompletionHandler {
    winners: Arc<RwLock<Vec<Participant>>>,
}

#[allow(dead_code)]
impl RecordingCompletionHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn winners(&self) -> Vec<Participant> {
        self.winners.read().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.winners.read().await.len()
    }
}

#[async_trait]
impl SpinCompletionHandler for RecordingCompletionHandler {
    async fn on_spin_complete(&self, winner: &Participant) -> Result<(), PickerError> {
        self.winners.write().await.push(winner.clone());
        Ok(())
    }

    fn handler_name(&self) -> &'static str {
        "RecordingCompletionHandler"
    }
}

/// Side-channel handler that keeps every event it receives
#[derive(Clone, Default)]
pub struct RecordingEventHandler {
    events: Arc<RwLock<Vec<SpinEvent>>>,
}

#[allow(dead_code)]
impl RecordingEventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<SpinEvent> {
        self.events.read().await.clone()
    }

    pub async fn event_types(&self) -> Vec<&'static str> {
        self.events
            .read()
            .await
            .iter()
            .map(|e| e.event_type())
            .collect()
    }
}

#[async_trait]
impl SpinEventHandler for RecordingEventHandler {
    async fn handle_spin_event(
        &self,
        _picker_id: &str,
        event: SpinEvent,
    ) -> Result<(), SpinEventError> {
        self.events.write().await.push(event);
        Ok(())
    }

    fn handler_name(&self) -> &'static str {
        "RecordingEventHandler"
    }
}
