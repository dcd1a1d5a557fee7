pub mod builders;
pub mod mocks;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use builders::{ParticipantListBuilder, TestPicker, TestPickerBuilder};
#[allow(unused_imports)]
pub use mocks::{RecordingCompletionHandler, RecordingEventHandler};
