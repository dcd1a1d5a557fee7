// Timer-driven interpolation of the picker's visual state

pub use controller::{AnimationController, AnimationSpec, Tick};
pub use easing::Easing;

mod controller;
mod easing;
