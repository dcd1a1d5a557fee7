use thiserror::Error;

use crate::participant::ParticipantId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PickerError {
    #[error("Participant list is empty")]
    EmptyParticipants,

    #[error("Duplicate participant id: {0}")]
    DuplicateParticipant(ParticipantId),

    #[error("Participant not found: {0}")]
    ParticipantNotFound(ParticipantId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid easing curve: {0}")]
    InvalidEasing(String),

    #[error("Spin interrupted before completion")]
    SpinInterrupted,

    #[error("Layout resolves to {resolved:?} but participant {expected} was selected")]
    GeometryMismatch {
        expected: usize,
        resolved: Option<usize>,
    },
}

impl PickerError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        PickerError::InvalidConfig(msg.into())
    }
}
