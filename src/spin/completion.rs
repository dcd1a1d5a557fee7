use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::participant::{Participant, ParticipantRegistry, WinnerHistory};
use crate::shared::PickerError;

/// Receives the winner of every completed spin, exactly once per spin.
///
/// The session waits for this to return before going back to `Idle`, so a
/// handler that edits the participant list finishes before the next spin
/// can snapshot it. Errors are logged and do not change the outcome.
#[async_trait]
pub trait SpinCompletionHandler: Send + Sync {
    async fn on_spin_complete(&self, winner: &Participant) -> Result<(), PickerError>;

    fn handler_name(&self) -> &'static str;
}

/// Handler for hosts that only care about the returned outcome
pub struct NoOpCompletionHandler;

#[async_trait]
impl SpinCompletionHandler for NoOpCompletionHandler {
    async fn on_spin_complete(&self, _winner: &Participant) -> Result<(), PickerError> {
        Ok(())
    }

    fn handler_name(&self) -> &'static str {
        "NoOpCompletionHandler"
    }
}

/// Records winners and optionally takes them out of the draw
pub struct RegistryCompletionHandler {
    registry: Arc<dyn ParticipantRegistry>,
    history: WinnerHistory,
    remove_winner: bool,
}

impl RegistryCompletionHandler {
    pub fn new(registry: Arc<dyn ParticipantRegistry>, history: WinnerHistory) -> Self {
        Self {
            registry,
            history,
            remove_winner: true,
        }
    }

    /// Keep winners in the registry so they can win again
    pub fn keep_winners(mut self) -> Self {
        self.remove_winner = false;
        self
    }

    pub fn history(&self) -> &WinnerHistory {
        &self.history
    }
}

#[async_trait]
impl SpinCompletionHandler for RegistryCompletionHandler {
    #[instrument(skip(self, winner), fields(winner = %winner.id))]
    async fn on_spin_complete(&self, winner: &Participant) -> Result<(), PickerError> {
        self.history.record(winner.clone()).await;

        if self.remove_winner {
            self.registry.remove(&winner.id).await?;
            info!(
                winner = %winner.id,
                name = %winner.display_name,
                "Winner removed from registry"
            );
        }

        Ok(())
    }

    fn handler_name(&self) -> &'static str {
        "RegistryCompletionHandler"
    }
}
