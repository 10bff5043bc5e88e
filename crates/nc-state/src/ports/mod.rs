//! Ports exposed by the state subsystem.

pub mod state_view;

pub use state_view::*;
