use tokio::sync::oneshot;
use tracing::debug;

use super::state::SpinOutcome;
use crate::shared::PickerError;

/// Handle to a running spin.
///
/// Dropping the ticket does not stop the spin; the session keeps animating
/// and still calls its completion handler.
#[derive(Debug)]
pub struct SpinTicket {
    spin_id: u64,
    outcome_rx: oneshot::Receiver<SpinOutcome>,
    cancel_tx: Option<oneshot::Sender<()>>,
}

impl SpinTicket {
    pub(crate) fn new(
        spin_id: u64,
        outcome_rx: oneshot::Receiver<SpinOutcome>,
        cancel_tx: oneshot::Sender<()>,
    ) -> Self {
        Self {
            spin_id,
            outcome_rx,
            cancel_tx: Some(cancel_tx),
        }
    }

    pub fn spin_id(&self) -> u64 {
        self.spin_id
    }

    /// Asks the spin to stop where it is.
    ///
    /// Returns false if the request could not be delivered, either because
    /// it was already sent or because the spin has finished. A delivered
    /// request can still lose the race against natural completion; the
    /// outcome says which one won.
    pub fn cancel(&mut self) -> bool {
        match self.cancel_tx.take() {
            Some(tx) => {
                let delivered = tx.send(()).is_ok();
                debug!(spin_id = self.spin_id, delivered, "Spin cancellation requested");
                delivered
            }
            None => false,
        }
    }

    /// Waits for the spin's terminal outcome
    pub async fn outcome(self) -> Result<SpinOutcome, PickerError> {
        self.outcome_rx
            .await
            .map_err(|_| PickerError::SpinInterrupted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_outcome_is_delivered() {
        let (outcome_tx, outcome_rx) = oneshot::channel();
        let (cancel_tx, _cancel_rx) = oneshot::channel();
        let ticket = SpinTicket::new(4, outcome_rx, cancel_tx);

        outcome_tx
            .send(SpinOutcome::Cancelled { resting_value: 3.5 })
            .unwrap();

        assert_eq!(
            ticket.outcome().await,
            Ok(SpinOutcome::Cancelled { resting_value: 3.5 })
        );
    }

    #[tokio::test]
    async fn test_dropped_spin_reports_interrupted() {
        let (outcome_tx, outcome_rx) = oneshot::channel::<SpinOutcome>();
        let (cancel_tx, _cancel_rx) = oneshot::channel();
        let ticket = SpinTicket::new(4, outcome_rx, cancel_tx);

        drop(outcome_tx);

        assert_eq!(ticket.outcome().await, Err(PickerError::SpinInterrupted));
    }

    #[test]
    fn test_cancel_only_sends_once() {
        let (_outcome_tx, outcome_rx) = oneshot::channel();
        let (cancel_tx, mut cancel_rx) = oneshot::channel();
        let mut ticket = SpinTicket::new(1, outcome_rx, cancel_tx);

        assert!(ticket.cancel());
        assert!(!ticket.cancel());
        assert!(cancel_rx.try_recv().is_ok());
    }

    #[test]
    fn test_cancel_after_spin_finished() {
        let (_outcome_tx, outcome_rx) = oneshot::channel();
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let mut ticket = SpinTicket::new(1, outcome_rx, cancel_tx);

        drop(cancel_rx);

        assert!(!ticket.cancel());
    }
}
