use serde::{Deserialize, Serialize};

use crate::participant::Participant;

/// Notifications published while a picker spins.
///
/// These are facts about things that already happened. Delivery is best
/// effort: the completion handler, not this stream, is the authoritative
/// report of a winner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpinEvent {
    /// A spin left `Idle`; the target is fixed from here on
    SpinStarted {
        spin_id: u64,
        participant_count: usize,
        duration_ms: u64,
    },

    /// Periodic tick while animating, for ambient sound effects
    Tick {
        spin_id: u64,
        index: u64,
        progress: f64,
    },

    /// The animation settled on the winner
    SpinCompleted { spin_id: u64, winner: Participant },

    /// The spin was cancelled before settling
    SpinCancelled { spin_id: u64, resting_value: f64 },
}

impl SpinEvent {
    pub fn spin_id(&self) -> u64 {
        match self {
            SpinEvent::SpinStarted { spin_id, .. } => *spin_id,
            SpinEvent::Tick { spin_id, .. } => *spin_id,
            SpinEvent::SpinCompleted { spin_id, .. } => *spin_id,
            SpinEvent::SpinCancelled { spin_id, .. } => *spin_id,
        }
    }

    /// Get a human-readable description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            SpinEvent::SpinStarted { .. } => "spin_started",
            SpinEvent::Tick { .. } => "tick",
            SpinEvent::SpinCompleted { .. } => "spin_completed",
            SpinEvent::SpinCancelled { .. } => "spin_cancelled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_type_tag() {
        let event = SpinEvent::Tick {
            spin_id: 3,
            index: 1,
            progress: 0.5,
        };

        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "TICK");
        assert_eq!(json["spin_id"], 3);
        assert_eq!(event.event_type(), "tick");
        assert_eq!(event.spin_id(), 3);
    }
}
