// Input system: action bindings and per-frame key state

pub mod action;
pub mod state;

pub use action::Action;
pub use state::InputState;
