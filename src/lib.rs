// Weighted random picker with wheel and reel presentations.
// This file exposes the public API for hosts and integration tests

pub mod animation;
pub mod config;
pub mod event;
pub mod layout;
pub mod participant;
pub mod selector;
pub mod shared;
pub mod spin;

// Re-export commonly used types for easier access in tests
pub use config::{PickerConfig, PresentationMode, SegmentSizing};
pub use event::{EventBus, PickerSubscription, SpinEvent, SpinEventHandler};
pub use layout::{LayoutMapper, SpinTarget};
pub use participant::{
    InMemoryParticipantRegistry, Participant, ParticipantId, ParticipantRegistry, WinnerHistory,
};
pub use shared::PickerError;
pub use spin::{
    RegistryCompletionHandler, SpinCompletionHandler, SpinOutcome, SpinRequest, SpinSession,
    SpinState,
};
