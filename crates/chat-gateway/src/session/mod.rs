//! Session lifecycle
//!
//! Drives one connection from token redemption to teardown.

mod gateway;
mod guard;
mod phase;

pub use gateway::{CloseReason, SessionEnd, SessionGateway};
pub use guard::CleanupGuard;
pub use phase::SessionPhase;
