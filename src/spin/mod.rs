// The spin state machine shared by every presentation mode.
//
// Idle -> Selecting -> Animating -> Completed -> Idle. Selection and layout
// happen synchronously inside `request_spin`; only the animation suspends.

pub use completion::{NoOpCompletionHandler, RegistryCompletionHandler, SpinCompletionHandler};
pub use session::SpinSession;
pub use state::{ActiveSpin, IgnoredReason, SpinOutcome, SpinRequest, SpinState};
pub use ticket::SpinTicket;

mod completion;
mod session;
mod state;
mod ticket;
