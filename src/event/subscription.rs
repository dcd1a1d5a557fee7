use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{bus::EventBus, handler::SpinEventHandler};

/// Routes a picker's spin events to a handler
pub struct PickerSubscription {
    picker_id: String,
    handler: Arc<dyn SpinEventHandler>,
    event_bus: EventBus,
}

impl PickerSubscription {
    pub fn new(picker_id: String, handler: Arc<dyn SpinEventHandler>, event_bus: EventBus) -> Self {
        Self {
            picker_id,
            handler,
            event_bus,
        }
    }

    /// Start the subscription - spawns a background task that listens to
    /// picker events and routes them to the handler.
    ///
    /// The receiver is registered before this returns, so events emitted
    /// afterwards are never missed unless the handler falls behind.
    pub async fn start(self) -> JoinHandle<()> {
        let picker_id = self.picker_id.clone();
        let handler_name = self.handler.handler_name();

        info!(
            picker_id = %picker_id,
            handler = handler_name,
            "Starting picker subscription"
        );

        let mut receiver = self.event_bus.subscribe_to_picker(&picker_id).await;

        tokio::spawn(async move {
            loop {
                let event = match receiver.recv().await {
                    Ok(event) => event,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(
                            picker_id = %picker_id,
                            handler = handler_name,
                            skipped,
                            "Subscription lagging, skipped events"
                        );
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };

                debug!(
                    picker_id = %picker_id,
                    handler = handler_name,
                    event_type = event.event_type(),
                    "Received spin event"
                );

                if let Err(e) = self.handler.handle_spin_event(&picker_id, event).await {
                    warn!(
                        picker_id = %picker_id,
                        handler = handler_name,
                        error = %e,
                        "Spin event handler failed"
                    );
                }
            }

            info!(
                picker_id = %picker_id,
                handler = handler_name,
                "Picker subscription ended - no more events"
            );
        })
    }
}
