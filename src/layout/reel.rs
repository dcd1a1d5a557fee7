use rand::seq::SliceRandom;
use rand::RngCore;
use std::time::Duration;
use tracing::{debug, warn};

use super::{LayoutMapper, SpinTarget};
use crate::animation::Easing;
use crate::config::{PresentationMode, ReelConfig};
use crate::participant::Participant;

/// Builds the display sequence for the reel.
///
/// The snapshot is reshuffled once per repeat and the repeats are
/// concatenated until the sequence holds at least `min_sequence_len` entries
/// and at least `min_shuffles` repeats. Entries are indices into
/// `participants`.
pub fn extended_sequence(
    participants: &[Participant],
    config: &ReelConfig,
    rng: &mut dyn RngCore,
) -> Vec<usize> {
    let count = participants.len();
    if count == 0 {
        return Vec::new();
    }

    let repeats = config.min_shuffles.max(config.min_sequence_len.div_ceil(count));
    let mut sequence = Vec::with_capacity(repeats * count);
    let mut round: Vec<usize> = (0..count).collect();
    for _ in 0..repeats {
        round.shuffle(rng);
        sequence.extend_from_slice(&round);
    }
    sequence
}

/// Finds the slot the reel should stop on for `winner`.
///
/// Uses the first occurrence at or after the midpoint. When there is none the
/// midpoint slot is overwritten with the winner so the resting row still shows
/// it; the second value reports whether that happened.
pub fn place_winner(sequence: &mut Vec<usize>, winner: usize) -> (usize, bool) {
    let midpoint = sequence.len() / 2;
    if let Some(offset) = sequence[midpoint..].iter().position(|&i| i == winner) {
        return (midpoint + offset, false);
    }

    warn!(
        winner,
        midpoint,
        sequence_len = sequence.len(),
        "Winner missing from second half of reel, reassigning midpoint slot"
    );
    if sequence.is_empty() {
        sequence.push(winner);
        return (0, true);
    }
    sequence[midpoint] = winner;
    (midpoint, true)
}

/// Scroll offset that centers `slot` in the visible window
pub fn offset_for_slot(slot: usize, config: &ReelConfig) -> f64 {
    let center_row = (config.visible_items / 2) as f64;
    -(slot as f64 - center_row) * config.item_height
}

/// Slot centered in the window at `offset`, if it lies on the reel
pub fn centered_slot(offset: f64, config: &ReelConfig) -> Option<usize> {
    let rows_scrolled = (-offset / config.item_height).round() as i64;
    let slot = rows_scrolled + (config.visible_items / 2) as i64;
    usize::try_from(slot).ok()
}

/// Scrolling slot-machine layout
#[derive(Debug, Clone)]
pub struct ReelLayout {
    config: ReelConfig,
}

impl ReelLayout {
    pub fn new(config: ReelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReelConfig {
        &self.config
    }
}

impl LayoutMapper for ReelLayout {
    fn mode(&self) -> PresentationMode {
        PresentationMode::Reel
    }

    // Every spin scrolls a freshly built sequence from the top.
    fn start_value(&self, _resting: f64) -> f64 {
        0.0
    }

    fn compute_target(
        &self,
        participants: &[Participant],
        winner: usize,
        _start: f64,
        rng: &mut dyn RngCore,
    ) -> SpinTarget {
        let mut sequence = extended_sequence(participants, &self.config, rng);
        let (winner_slot, used_fallback) = place_winner(&mut sequence, winner);
        let target_offset = offset_for_slot(winner_slot, &self.config);

        debug!(
            winner,
            winner_slot,
            sequence_len = sequence.len(),
            target_offset,
            "Reel target computed"
        );

        SpinTarget::Reel {
            target_offset,
            winner_slot,
            sequence,
            used_fallback,
        }
    }

    fn resolve_winner(&self, participants: &[Participant], target: &SpinTarget) -> Option<usize> {
        match target {
            SpinTarget::Reel {
                target_offset,
                sequence,
                ..
            } => centered_slot(*target_offset, &self.config)
                .and_then(|slot| sequence.get(slot).copied())
                .filter(|&index| index < participants.len()),
            SpinTarget::Wheel { .. } => None,
        }
    }

    fn spin_duration(&self, _rng: &mut dyn RngCore) -> Duration {
        Duration::from_millis(self.config.duration_ms)
    }

    fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.config.settle_delay_ms)
    }

    fn easing(&self) -> Easing {
        self.config.easing
    }
}
