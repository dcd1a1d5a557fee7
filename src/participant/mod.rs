// Participants are owned by the host application. The picker reads snapshots
// of the list; the registry and history here are the host-side pieces.

pub use history::{WinnerHistory, WinnerRecord, DEFAULT_HISTORY_CAPACITY};
pub use models::{palette_color, Participant, ParticipantId, MIN_VALID_WEIGHT, PALETTE};
pub use registry::{InMemoryParticipantRegistry, ParticipantRegistry};

mod history;
mod models;
mod registry;
