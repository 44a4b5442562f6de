//! Listing-specific domain logic: the inventory ledger and moderation actions.

mod actions;
mod dtos;
pub mod entity;
pub mod error;
mod ledger;

pub use actions::*;
pub use dtos::*;
pub use error::*;
