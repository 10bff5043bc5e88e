//! Domain layer: wire codec, envelope, signatures, and the kind handlers.

pub mod crypto;
pub mod envelope;
pub mod kinds;
pub mod rlp;

pub use crypto::*;
pub use envelope::*;
pub use kinds::*;
pub use rlp::{RlpError, RlpItem};
