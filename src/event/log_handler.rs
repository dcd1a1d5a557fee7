use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

use super::events::SpinEvent;
use super::handler::{SpinEventError, SpinEventHandler};

/// Writes spin events to the log; stands in for sound effects in headless hosts
#[derive(Debug, Default)]
pub struct LoggingSpinHandler {
    ticks: AtomicU64,
}

impl LoggingSpinHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks seen since the handler was created
    pub fn tick_count(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SpinEventHandler for LoggingSpinHandler {
    async fn handle_spin_event(
        &self,
        picker_id: &str,
        event: SpinEvent,
    ) -> Result<(), SpinEventError> {
        match event {
            SpinEvent::SpinStarted {
                spin_id,
                participant_count,
                duration_ms,
            } => {
                info!(picker_id, spin_id, participant_count, duration_ms, "Spin started");
            }
            SpinEvent::Tick {
                spin_id,
                index,
                progress,
            } => {
                self.ticks.fetch_add(1, Ordering::Relaxed);
                debug!(picker_id, spin_id, index, progress, "tick");
            }
            SpinEvent::SpinCompleted { spin_id, winner } => {
                info!(
                    picker_id,
                    spin_id,
                    winner = %winner.display_name,
                    "And the winner is"
                );
            }
            SpinEvent::SpinCancelled {
                spin_id,
                resting_value,
            } => {
                info!(picker_id, spin_id, resting_value, "Spin stopped early");
            }
        }
        Ok(())
    }

    fn handler_name(&self) -> &'static str {
        "LoggingSpinHandler"
    }
}
