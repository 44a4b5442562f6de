//! Cook-specific domain logic: account moderation and the aggregate counters.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
