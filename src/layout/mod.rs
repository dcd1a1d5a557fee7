// Layout mappers turn a chosen winner into the visual value the animation
// must come to rest on. The session owns one mapper, picked by presentation
// mode; selection and animation are shared by both.

pub use reel::{centered_slot, extended_sequence, offset_for_slot, place_winner, ReelLayout};
pub use wheel::{pointer_angle, resting_index, segments, Segment, WheelLayout};

mod reel;
mod wheel;

use rand::RngCore;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::animation::Easing;
use crate::config::{PickerConfig, PresentationMode};
use crate::participant::Participant;

/// Where a spin comes to rest
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum SpinTarget {
    Wheel {
        start_rotation: f64,
        /// Accumulated degrees, never normalized
        target_rotation: f64,
    },
    Reel {
        /// Pixels; the reel scrolls up from offset 0
        target_offset: f64,
        /// Slot of `sequence` centered when the reel stops
        winner_slot: usize,
        /// Indices into the participant snapshot, in display order
        sequence: Vec<usize>,
        /// Set when the winner had to be written into the midpoint slot
        used_fallback: bool,
    },
}

impl SpinTarget {
    /// Value the animation interpolates towards
    pub fn end_value(&self) -> f64 {
        match self {
            SpinTarget::Wheel {
                target_rotation, ..
            } => *target_rotation,
            SpinTarget::Reel { target_offset, .. } => *target_offset,
        }
    }
}

/// Strategy for computing the visual target of a spin
pub trait LayoutMapper: Send + Sync {
    fn mode(&self) -> PresentationMode;

    /// Value a new spin starts from, given where the last one came to rest
    fn start_value(&self, resting: f64) -> f64;

    /// Computes the resting geometry for `winner` (an index into
    /// `participants`). Must not fail for any valid index.
    fn compute_target(
        &self,
        participants: &[Participant],
        winner: usize,
        start: f64,
        rng: &mut dyn RngCore,
    ) -> SpinTarget;

    /// Decodes which participant the resting geometry shows
    fn resolve_winner(&self, participants: &[Participant], target: &SpinTarget) -> Option<usize>;

    fn spin_duration(&self, rng: &mut dyn RngCore) -> Duration;

    /// Pause between the animation settling and the winner being reported
    fn settle_delay(&self) -> Duration {
        Duration::ZERO
    }

    fn easing(&self) -> Easing;
}

/// Builds the mapper for the configured presentation mode
pub fn mapper_for(config: &PickerConfig) -> Arc<dyn LayoutMapper> {
    match config.mode {
        PresentationMode::Wheel => Arc::new(WheelLayout::new(config.wheel.clone())),
        PresentationMode::Reel => Arc::new(ReelLayout::new(config.reel.clone())),
    }
}
