use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::AbortHandle;
use tracing::{debug, error, info, instrument, warn};

use super::completion::SpinCompletionHandler;
use super::state::{ActiveSpin, IgnoredReason, SpinOutcome, SpinRequest, SpinState};
use super::ticket::SpinTicket;
use crate::animation::{AnimationController, AnimationSpec, Easing};
use crate::config::{PickerConfig, PresentationMode};
use crate::event::{EventBus, SpinEvent};
use crate::layout::{mapper_for, LayoutMapper};
use crate::participant::Participant;
use crate::selector;
use crate::shared::PickerError;

/// Mutable session state; never held across an await
#[derive(Debug, Default)]
struct SessionInner {
    state: SpinState,
    resting_value: f64,
    next_spin_id: u64,
    active: Option<ActiveSpin>,
    task: Option<AbortHandle>,
}

impl SessionInner {
    fn holds(&self, spin_id: u64) -> bool {
        self.active
            .as_ref()
            .is_some_and(|spin| spin.spin_id == spin_id)
    }

    /// Frees the spin slot if `spin_id` still owns it
    fn release(&mut self, spin_id: u64) -> bool {
        if !self.holds(spin_id) {
            return false;
        }
        self.state = SpinState::Idle;
        self.active = None;
        self.task = None;
        true
    }
}

fn lock(inner: &Mutex<SessionInner>) -> MutexGuard<'_, SessionInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Coordinates selection, layout and animation for one picker.
///
/// A session owns a single spin slot. Requests made while a spin is in
/// flight are ignored rather than queued.
pub struct SpinSession {
    picker_id: String,
    inner: Arc<Mutex<SessionInner>>,
    mapper: Arc<dyn LayoutMapper>,
    animator: Arc<AnimationController>,
    rng: Mutex<Box<dyn RngCore + Send>>,
    completion: Arc<dyn SpinCompletionHandler>,
    event_bus: EventBus,
}

impl SpinSession {
    /// Creates a session seeded from `config.seed`, or from the OS when unset
    pub fn new(
        picker_id: impl Into<String>,
        config: &PickerConfig,
        completion: Arc<dyn SpinCompletionHandler>,
        event_bus: EventBus,
    ) -> Result<Self, PickerError> {
        let rng: Box<dyn RngCore + Send> = match config.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(StdRng::from_os_rng()),
        };
        Self::with_rng(picker_id, config, completion, event_bus, rng)
    }

    pub fn with_rng(
        picker_id: impl Into<String>,
        config: &PickerConfig,
        completion: Arc<dyn SpinCompletionHandler>,
        event_bus: EventBus,
        rng: Box<dyn RngCore + Send>,
    ) -> Result<Self, PickerError> {
        config.validate()?;
        let picker_id = picker_id.into();
        info!(
            picker_id = %picker_id,
            mode = %config.mode,
            handler = completion.handler_name(),
            "Spin session created"
        );

        Ok(Self {
            picker_id,
            inner: Arc::new(Mutex::new(SessionInner::default())),
            mapper: mapper_for(config),
            animator: Arc::new(AnimationController::new(&config.animation)),
            rng: Mutex::new(rng),
            completion,
            event_bus,
        })
    }

    pub fn picker_id(&self) -> &str {
        &self.picker_id
    }

    pub fn mode(&self) -> PresentationMode {
        self.mapper.mode()
    }

    pub fn state(&self) -> SpinState {
        lock(&self.inner).state
    }

    /// Visual value the last spin came to rest at
    pub fn resting_value(&self) -> f64 {
        lock(&self.inner).resting_value
    }

    /// Details of the spin in flight, if any
    pub fn active_spin(&self) -> Option<ActiveSpin> {
        lock(&self.inner).active.clone()
    }

    /// Animation frames for renderers
    pub fn subscribe_frames(&self) -> watch::Receiver<f64> {
        self.animator.subscribe()
    }

    /// Starts a spin over a snapshot of `participants`.
    ///
    /// The winner and the resting geometry are fixed before this returns;
    /// only the animation runs in the background. Must be called from
    /// within a tokio runtime.
    #[instrument(skip(self, participants), fields(picker_id = %self.picker_id, count = participants.len()))]
    pub fn request_spin(&self, participants: &[Participant]) -> Result<SpinRequest, PickerError> {
        let mut inner = lock(&self.inner);

        if inner.state != SpinState::Idle {
            debug!(state = %inner.state, "Spin already in progress - ignoring request");
            return Ok(SpinRequest::Ignored(IgnoredReason::Busy(inner.state)));
        }
        if participants.is_empty() {
            debug!("No participants - ignoring spin request");
            return Ok(SpinRequest::Ignored(IgnoredReason::EmptyList));
        }
        ensure_unique_ids(participants)?;

        inner.state = SpinState::Selecting;
        let spin_id = inner.next_spin_id;
        let spin = match self.plan_spin(spin_id, participants, inner.resting_value) {
            Ok(spin) => spin,
            Err(e) => {
                inner.state = SpinState::Idle;
                return Err(e);
            }
        };

        inner.next_spin_id += 1;
        inner.state = SpinState::Animating;
        inner.active = Some(spin.clone());

        info!(
            spin_id,
            winner = %spin.winner().id,
            start = spin.start_value,
            end = spin.target.end_value(),
            duration_ms = spin.duration.as_millis() as u64,
            "Spin started"
        );

        // The guard travels with the task future, so the slot is released even
        // if the task is aborted before its first poll.
        let guard = AbortGuard {
            inner: self.inner.clone(),
            animator: self.animator.clone(),
            spin_id,
        };
        drop(inner);

        let (outcome_tx, outcome_rx) = oneshot::channel();
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let task = SpinTask {
            picker_id: self.picker_id.clone(),
            inner: self.inner.clone(),
            animator: self.animator.clone(),
            completion: self.completion.clone(),
            event_bus: self.event_bus.clone(),
            easing: self.mapper.easing(),
            settle_delay: self.mapper.settle_delay(),
            spin,
            _guard: guard,
        };
        let handle = tokio::spawn(task.run(cancel_rx, outcome_tx));

        let mut inner = lock(&self.inner);
        if inner.holds(spin_id) {
            inner.task = Some(handle.abort_handle());
        }

        Ok(SpinRequest::Started(SpinTicket::new(
            spin_id, outcome_rx, cancel_tx,
        )))
    }

    /// Selects a winner and computes where the animation must stop
    fn plan_spin(
        &self,
        spin_id: u64,
        participants: &[Participant],
        resting_value: f64,
    ) -> Result<ActiveSpin, PickerError> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        let winner_index = selector::select(participants, &mut **rng)?;
        let start_value = self.mapper.start_value(resting_value);
        let target = self
            .mapper
            .compute_target(participants, winner_index, start_value, &mut **rng);

        let resolved = self.mapper.resolve_winner(participants, &target);
        if resolved != Some(winner_index) {
            error!(
                spin_id,
                expected = winner_index,
                resolved = ?resolved,
                "Resting geometry does not show the selected winner"
            );
            return Err(PickerError::GeometryMismatch {
                expected: winner_index,
                resolved,
            });
        }

        let duration = self.mapper.spin_duration(&mut **rng);

        Ok(ActiveSpin {
            spin_id,
            snapshot: participants.to_vec(),
            winner_index,
            target,
            start_value,
            duration,
        })
    }

    /// Stops the spin in flight without reporting an outcome.
    ///
    /// The session is `Idle` again when this returns. The ticket, if still
    /// held, resolves to `SpinInterrupted`.
    pub fn shutdown(&self) {
        let task = {
            let mut inner = lock(&self.inner);
            let Some(spin_id) = inner.active.as_ref().map(|spin| spin.spin_id) else {
                return;
            };
            warn!(picker_id = %self.picker_id, spin_id, "Aborting spin in progress");

            let task = inner.task.take();
            inner.release(spin_id);
            inner.resting_value = self.animator.position();
            task
        };

        if let Some(task) = task {
            task.abort();
        }
    }
}

impl Drop for SpinSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn ensure_unique_ids(participants: &[Participant]) -> Result<(), PickerError> {
    let mut seen = HashSet::with_capacity(participants.len());
    for participant in participants {
        if !seen.insert(&participant.id) {
            return Err(PickerError::DuplicateParticipant(participant.id.clone()));
        }
    }
    Ok(())
}

/// Returns the session to `Idle` if its spin task goes away early
struct AbortGuard {
    inner: Arc<Mutex<SessionInner>>,
    animator: Arc<AnimationController>,
    spin_id: u64,
}

impl Drop for AbortGuard {
    fn drop(&mut self) {
        let mut inner = lock(&self.inner);
        if inner.release(self.spin_id) {
            inner.resting_value = self.animator.position();
        }
    }
}

/// Background half of a spin: animates, then reports
struct SpinTask {
    picker_id: String,
    inner: Arc<Mutex<SessionInner>>,
    animator: Arc<AnimationController>,
    completion: Arc<dyn SpinCompletionHandler>,
    event_bus: EventBus,
    easing: Easing,
    settle_delay: Duration,
    spin: ActiveSpin,
    _guard: AbortGuard,
}

impl SpinTask {
    async fn run(
        self,
        mut cancel_rx: oneshot::Receiver<()>,
        outcome_tx: oneshot::Sender<SpinOutcome>,
    ) {
        let spin_id = self.spin.spin_id;
        let events = self.event_bus.sender(&self.picker_id).await;
        let _ = events.send(SpinEvent::SpinStarted {
            spin_id,
            participant_count: self.spin.snapshot.len(),
            duration_ms: self.spin.duration.as_millis() as u64,
        });

        let animation = AnimationSpec {
            from: self.spin.start_value,
            to: self.spin.target.end_value(),
            duration: self.spin.duration,
            easing: self.easing,
        };
        let settled = async {
            let value = self
                .animator
                .animate(animation, |tick| {
                    let _ = events.send(SpinEvent::Tick {
                        spin_id,
                        index: tick.index,
                        progress: tick.progress,
                    });
                })
                .await;
            tokio::time::sleep(self.settle_delay).await;
            value
        };

        let outcome = tokio::select! {
            biased;
            Ok(()) = &mut cancel_rx => {
                let resting_value = self.animator.position();
                info!(picker_id = %self.picker_id, spin_id, resting_value, "Spin cancelled");

                {
                    let mut inner = lock(&self.inner);
                    if inner.holds(spin_id) {
                        inner.resting_value = resting_value;
                    }
                }
                let _ = events.send(SpinEvent::SpinCancelled { spin_id, resting_value });
                SpinOutcome::Cancelled { resting_value }
            }
            value = settled => {
                let winner = self.spin.winner().clone();
                {
                    let mut inner = lock(&self.inner);
                    if inner.holds(spin_id) {
                        inner.state = SpinState::Completed;
                        inner.resting_value = value;
                    }
                }
                info!(
                    picker_id = %self.picker_id,
                    spin_id,
                    winner = %winner.id,
                    name = %winner.display_name,
                    "Spin completed"
                );
                let _ = events.send(SpinEvent::SpinCompleted {
                    spin_id,
                    winner: winner.clone(),
                });
                SpinOutcome::Completed {
                    winner,
                    target: self.spin.target.clone(),
                }
            }
        };
        drop(cancel_rx);

        if let SpinOutcome::Completed { winner, .. } = &outcome {
            if let Err(e) = self.completion.on_spin_complete(winner).await {
                error!(
                    picker_id = %self.picker_id,
                    spin_id,
                    handler = self.completion.handler_name(),
                    error = %e,
                    "Completion handler failed"
                );
            }
        }

        lock(&self.inner).release(spin_id);

        if outcome_tx.send(outcome).is_err() {
            debug!(picker_id = %self.picker_id, spin_id, "Spin ticket dropped before outcome");
        }
    }
}
