use async_trait::async_trait;
use thiserror::Error;

use super::events::SpinEvent;

/// Errors that can occur when handling spin events
#[derive(Debug, Error)]
pub enum SpinEventError {
    #[error("Handler error: {0}")]
    HandlerError(String),
}

impl SpinEventError {
    pub fn handler(msg: impl Into<String>) -> Self {
        SpinEventError::HandlerError(msg.into())
    }
}

/// Trait for components that react to a picker's spin events
///
/// Handlers sit on the best-effort side channel: a failing or slow handler
/// never affects which winner is chosen or when the spin completes.
#[async_trait]
pub trait SpinEventHandler: Send + Sync {
    async fn handle_spin_event(
        &self,
        picker_id: &str,
        event: SpinEvent,
    ) -> Result<(), SpinEventError>;

    /// Get a human-readable name for this handler (for logging/debugging)
    fn handler_name(&self) -> &'static str;
}
