//! Adapters implementing the state ports.

pub mod memory;

pub use memory::*;
