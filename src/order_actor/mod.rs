//! Order-specific domain logic: the lifecycle state machine and rating attachment.

mod actions;
pub mod entity;
pub mod error;
pub mod lifecycle;

pub use actions::*;
pub use error::*;
pub use lifecycle::*;
