//! Player registry: lazy creation, the guest singleton, and per-player
//! serialization of rating updates

pub mod registry;

// Re-export commonly used types
pub use registry::{PlayerRegistry, GUEST_ID};
