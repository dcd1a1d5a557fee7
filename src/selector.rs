// Weighted winner selection.
//
// A uniform draw in [0, 1) is scaled to [0, total_weight) and matched against
// the cumulative weight prefix sums. Each participant owns the half-open
// interval [cumulative_before, cumulative_after), so a draw sitting exactly on
// a boundary belongs to the participant whose interval starts there.

use rand::Rng;
use tracing::trace;

use crate::participant::Participant;
use crate::shared::PickerError;

/// Sum of effective weights
pub fn total_weight(participants: &[Participant]) -> f64 {
    participants.iter().map(Participant::effective_weight).sum()
}

/// Probability of each participant being selected, in list order
pub fn probabilities(participants: &[Participant]) -> Vec<f64> {
    let total = total_weight(participants);
    participants
        .iter()
        .map(|p| p.effective_weight() / total)
        .collect()
}

/// Picks the index of the winner for a fixed draw in `[0, 1)`.
///
/// Draws outside the unit interval are clamped. Round-off that runs past the
/// last cumulative bucket resolves to the last participant.
pub fn select_with_draw(participants: &[Participant], draw: f64) -> Result<usize, PickerError> {
    if participants.is_empty() {
        return Err(PickerError::EmptyParticipants);
    }

    let draw = if draw.is_nan() { 0.0 } else { draw.clamp(0.0, 1.0) };
    let target = draw * total_weight(participants);

    let mut cumulative = 0.0;
    for (index, participant) in participants.iter().enumerate() {
        cumulative += participant.effective_weight();
        if target < cumulative {
            trace!(index, draw, target, "Draw resolved");
            return Ok(index);
        }
    }

    Ok(participants.len() - 1)
}

/// Picks the index of the winner using a uniform draw from `rng`
pub fn select<R: Rng + ?Sized>(
    participants: &[Participant],
    rng: &mut R,
) -> Result<usize, PickerError> {
    if participants.is_empty() {
        return Err(PickerError::EmptyParticipants);
    }
    let draw: f64 = rng.random();
    select_with_draw(participants, draw)
}
