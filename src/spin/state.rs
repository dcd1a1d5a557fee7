use serde::Serialize;
use std::time::Duration;
use strum_macros::Display;

use super::ticket::SpinTicket;
use crate::layout::SpinTarget;
use crate::participant::Participant;

/// Lifecycle of the picker's single spin slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SpinState {
    #[default]
    Idle,
    Selecting,
    Animating,
    Completed,
}

/// Why a spin request did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    EmptyList,
    /// Another spin holds the slot; carries its state at request time
    Busy(SpinState),
}

/// Result of asking the session to spin
#[derive(Debug)]
pub enum SpinRequest {
    Started(SpinTicket),
    Ignored(IgnoredReason),
}

impl SpinRequest {
    pub fn is_started(&self) -> bool {
        matches!(self, SpinRequest::Started(_))
    }

    pub fn ticket(self) -> Option<SpinTicket> {
        match self {
            SpinRequest::Started(ticket) => Some(ticket),
            SpinRequest::Ignored(_) => None,
        }
    }
}

/// Terminal outcome of a started spin. Exactly one is reported per spin.
#[derive(Debug, Clone, PartialEq)]
pub enum SpinOutcome {
    Completed {
        winner: Participant,
        target: SpinTarget,
    },
    Cancelled {
        /// Visual value the animation stopped at
        resting_value: f64,
    },
}

impl SpinOutcome {
    pub fn winner(&self) -> Option<&Participant> {
        match self {
            SpinOutcome::Completed { winner, .. } => Some(winner),
            SpinOutcome::Cancelled { .. } => None,
        }
    }
}

/// Everything fixed for a spin when it leaves `Idle`
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSpin {
    pub spin_id: u64,
    /// Copy of the participant list taken at request time
    pub snapshot: Vec<Participant>,
    pub winner_index: usize,
    pub target: SpinTarget,
    pub start_value: f64,
    pub duration: Duration,
}

impl ActiveSpin {
    pub fn winner(&self) -> &Participant {
        &self.snapshot[self.winner_index]
    }
}
