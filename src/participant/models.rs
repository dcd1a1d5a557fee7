use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Weight assigned to participants that carry no usable weight
pub const MIN_VALID_WEIGHT: f64 = 1.0;

/// Colours handed out to new participants, cycled by list position
pub const PALETTE: [&str; 8] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEEAD", "#D4A5A5", "#9B59B6", "#3498DB",
];

pub fn palette_color(position: usize) -> &'static str {
    PALETTE[position % PALETTE.len()]
}

/// Opaque participant identifier, stable across reorderings
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ParticipantId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

fn default_weight() -> f64 {
    MIN_VALID_WEIGHT
}

/// A single entry on the wheel or reel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: ParticipantId,
    pub display_name: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
    pub color: String,
}

impl Participant {
    /// Creates a participant with a generated id and the default weight
    pub fn new(display_name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: ParticipantId::generate(),
            display_name: display_name.into(),
            weight: MIN_VALID_WEIGHT,
            color: color.into(),
        }
    }

    pub fn with_id(
        id: impl Into<ParticipantId>,
        display_name: impl Into<String>,
        weight: f64,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            weight,
            color: palette_color(0).to_string(),
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Weight used by selection and weighted layouts.
    ///
    /// Zero, negative and non-finite weights are clamped to [`MIN_VALID_WEIGHT`]
    /// so the cumulative walk stays monotonic.
    pub fn effective_weight(&self) -> f64 {
        if self.weight.is_finite() && self.weight > 0.0 {
            self.weight
        } else {
            MIN_VALID_WEIGHT
        }
    }
}
