//! Ports (trait boundaries) for external collaborators.
//!
//! These traits are owned by the core and implemented by adapters: move
//! sources on one side, run observers on the other.

pub mod actor;
pub mod observer;

pub use actor::ActionProvider;
pub use observer::Observer;
