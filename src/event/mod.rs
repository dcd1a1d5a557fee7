// Best-effort spin notifications
//
// Spins publish started/tick/completed/cancelled events per picker. Hosts use
// them for ambient effects; correctness never depends on anyone listening.

// Public API - what other modules can use
pub use bus::EventBus;
pub use events::SpinEvent;
pub use handler::{SpinEventError, SpinEventHandler};
pub use log_handler::LoggingSpinHandler;
pub use subscription::PickerSubscription;

// Internal modules
mod bus;
mod events;
mod handler;
mod log_handler;
mod subscription;
