use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::{debug, info};

use crate::animation::Easing;
use crate::shared::PickerError;

/// How the picker presents the spin
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PresentationMode {
    #[default]
    Wheel,
    Reel,
}

/// How wheel segments are sized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SegmentSizing {
    /// Every participant gets `360 / N` degrees
    #[default]
    Equal,
    /// Segments proportional to effective weight share
    Weighted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WheelConfig {
    pub min_extra_spins: u32,
    pub max_extra_spins: u32,
    /// Jitter bound as a fraction of half a segment
    pub jitter_fraction: f64,
    pub segment_sizing: SegmentSizing,
    pub base_duration_ms: u64,
    /// Upper bound of the random extra duration
    pub duration_variance_ms: u64,
    pub easing: Easing,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            min_extra_spins: 5,
            max_extra_spins: 7,
            jitter_fraction: 0.3,
            segment_sizing: SegmentSizing::Equal,
            base_duration_ms: 4000,
            duration_variance_ms: 2000,
            easing: Easing::WHEEL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReelConfig {
    pub visible_items: usize,
    /// Row height in pixels
    pub item_height: f64,
    pub min_sequence_len: usize,
    pub min_shuffles: usize,
    pub duration_ms: u64,
    /// Pause after the reel stops before the winner is reported
    pub settle_delay_ms: u64,
    pub easing: Easing,
}

impl Default for ReelConfig {
    fn default() -> Self {
        Self {
            visible_items: 7,
            item_height: 72.0,
            min_sequence_len: 150,
            min_shuffles: 30,
            duration_ms: 4000,
            settle_delay_ms: 300,
            easing: Easing::REEL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationConfig {
    pub frame_interval_ms: u64,
    /// Period of the ambient tick notification
    pub tick_interval_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 16,
            tick_interval_ms: 150,
        }
    }
}

impl AnimationConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Top-level picker configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PickerConfig {
    pub mode: PresentationMode,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
    pub wheel: WheelConfig,
    pub reel: ReelConfig,
    pub animation: AnimationConfig,
}

impl PickerConfig {
    pub fn from_json(json: &str) -> Result<Self, PickerError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| PickerError::invalid_config(format!("malformed JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PickerError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            PickerError::invalid_config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Loads configuration from the environment.
    ///
    /// `PICKER_CONFIG` names a JSON file used as the base; `PICKER_MODE` and
    /// `PICKER_SEED` override individual fields.
    pub fn from_env() -> Result<Self, PickerError> {
        let mut config = match std::env::var("PICKER_CONFIG") {
            Ok(path) => {
                info!(path = %path, "Loading picker configuration file");
                Self::from_file(path)?
            }
            Err(_) => Self::default(),
        };

        if let Ok(mode) = std::env::var("PICKER_MODE") {
            config.mode = PresentationMode::from_str(&mode)
                .map_err(|_| PickerError::invalid_config(format!("unknown mode '{}'", mode)))?;
        }

        if let Ok(seed) = std::env::var("PICKER_SEED") {
            let seed = seed
                .parse::<u64>()
                .map_err(|_| PickerError::invalid_config(format!("invalid seed '{}'", seed)))?;
            config.seed = Some(seed);
        }

        config.validate()?;
        debug!(mode = %config.mode, seed = ?config.seed, "Picker configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PickerError> {
        let wheel = &self.wheel;
        if wheel.min_extra_spins == 0 || wheel.min_extra_spins > wheel.max_extra_spins {
            return Err(PickerError::invalid_config(format!(
                "extra spins range {}..={} is invalid",
                wheel.min_extra_spins, wheel.max_extra_spins
            )));
        }
        if !(0.0..1.0).contains(&wheel.jitter_fraction) {
            return Err(PickerError::invalid_config(
                "jitter fraction must lie in [0, 1)",
            ));
        }
        if wheel.base_duration_ms == 0 {
            return Err(PickerError::invalid_config(
                "wheel spin duration must be non-zero",
            ));
        }
        wheel.easing.validate()?;

        let reel = &self.reel;
        if reel.visible_items == 0 {
            return Err(PickerError::invalid_config("reel needs at least one visible item"));
        }
        if !(reel.item_height.is_finite() && reel.item_height > 0.0) {
            return Err(PickerError::invalid_config("reel item height must be positive"));
        }
        if reel.min_shuffles == 0 {
            return Err(PickerError::invalid_config("reel needs at least one shuffle"));
        }
        if reel.duration_ms == 0 {
            return Err(PickerError::invalid_config(
                "reel spin duration must be non-zero",
            ));
        }
        reel.easing.validate()?;

        if self.animation.frame_interval_ms == 0 || self.animation.tick_interval_ms == 0 {
            return Err(PickerError::invalid_config(
                "animation intervals must be non-zero",
            ));
        }
        Ok(())
    }
}
