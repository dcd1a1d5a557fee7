use rand::{Rng, RngCore};
use std::time::Duration;
use tracing::debug;

use super::{LayoutMapper, SpinTarget};
use crate::animation::Easing;
use crate::config::{PresentationMode, SegmentSizing, WheelConfig};
use crate::participant::Participant;
use crate::selector;

const FULL_TURN: f64 = 360.0;

/// Angular range `[start, end)` of one participant, in wheel-frame degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
}

impl Segment {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn mid(&self) -> f64 {
        self.start + self.width() / 2.0
    }

    pub fn contains(&self, angle: f64) -> bool {
        angle >= self.start && angle < self.end
    }
}

/// Segments in list order, starting at angle 0
pub fn segments(participants: &[Participant], sizing: SegmentSizing) -> Vec<Segment> {
    let count = participants.len();
    if count == 0 {
        return Vec::new();
    }

    let bounds: Vec<f64> = match sizing {
        SegmentSizing::Equal => {
            let size = FULL_TURN / count as f64;
            (0..=count).map(|i| i as f64 * size).collect()
        }
        SegmentSizing::Weighted => {
            let total = selector::total_weight(participants);
            std::iter::once(0.0)
                .chain(participants.iter().scan(0.0, |acc, p| {
                    *acc += p.effective_weight();
                    Some(*acc / total * FULL_TURN)
                }))
                .collect()
        }
    };

    let mut segments: Vec<Segment> = bounds
        .windows(2)
        .map(|w| Segment {
            start: w[0],
            end: w[1],
        })
        .collect();

    // Close the circle exactly regardless of accumulated round-off.
    if let Some(last) = segments.last_mut() {
        last.end = FULL_TURN;
    }
    segments
}

/// Wheel-frame angle sitting under the pointer after rotating by `rotation`.
///
/// The pointer is fixed at the top; rotating the wheel forward moves lower
/// angles past it, so the angle under it is `-rotation mod 360`.
pub fn pointer_angle(rotation: f64) -> f64 {
    let angle = (-rotation).rem_euclid(FULL_TURN);
    if angle >= FULL_TURN {
        0.0
    } else {
        angle
    }
}

/// Index of the segment under the pointer
pub fn resting_index(segments: &[Segment], rotation: f64) -> Option<usize> {
    let angle = pointer_angle(rotation);
    segments.iter().position(|s| s.contains(angle))
}

/// Circular picker layout
#[derive(Debug, Clone)]
pub struct WheelLayout {
    config: WheelConfig,
}

impl WheelLayout {
    pub fn new(config: WheelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }
}

impl LayoutMapper for WheelLayout {
    fn mode(&self) -> PresentationMode {
        PresentationMode::Wheel
    }

    fn start_value(&self, resting: f64) -> f64 {
        resting
    }

    fn compute_target(
        &self,
        participants: &[Participant],
        winner: usize,
        start: f64,
        rng: &mut dyn RngCore,
    ) -> SpinTarget {
        let segments = segments(participants, self.config.segment_sizing);
        let segment = segments[winner];

        let current = start.rem_euclid(FULL_TURN);
        let delta_to_align = (FULL_TURN - segment.mid() - current).rem_euclid(FULL_TURN);

        let extra_spins = rng.random_range(self.config.min_extra_spins..=self.config.max_extra_spins);

        let max_jitter = self.config.jitter_fraction * segment.width() / 2.0;
        let jitter = (rng.random::<f64>() * 2.0 - 1.0) * max_jitter;

        // A negative jitter on an already aligned wheel would shorten the spin
        // below its minimum; one more turn keeps the resting angle.
        let mut forward = delta_to_align + jitter;
        if forward < 0.0 {
            forward += FULL_TURN;
        }

        let target_rotation = start + FULL_TURN * f64::from(extra_spins) + forward;

        debug!(
            winner,
            segment_start = segment.start,
            segment_end = segment.end,
            extra_spins,
            jitter,
            target_rotation,
            "Wheel target computed"
        );

        SpinTarget::Wheel {
            start_rotation: start,
            target_rotation,
        }
    }

    fn resolve_winner(&self, participants: &[Participant], target: &SpinTarget) -> Option<usize> {
        match target {
            SpinTarget::Wheel {
                target_rotation, ..
            } => resting_index(
                &segments(participants, self.config.segment_sizing),
                *target_rotation,
            ),
            SpinTarget::Reel { .. } => None,
        }
    }

    fn spin_duration(&self, rng: &mut dyn RngCore) -> Duration {
        let variance = Duration::from_millis(self.config.duration_variance_ms);
        Duration::from_millis(self.config.base_duration_ms) + variance.mul_f64(rng.random::<f64>())
    }

    fn easing(&self) -> Easing {
        self.config.easing
    }
}
