//! Core of a hyperlocal home-cooked meal marketplace: proximity matching of
//! listings around a customer, an atomic inventory ledger, the order
//! lifecycle and cook rating aggregation.
//!
//! Each entity type lives in its own [`actor_framework::ResourceActor`]; the
//! typed clients in [`clients`] are the public surface.

pub mod actor_framework;
pub mod app_system;
pub mod clients;
pub mod cook_actor;
pub mod customer_actor;
pub mod domain;
pub mod error;
pub mod listing_actor;
pub mod matcher;
pub mod order_actor;

#[cfg(test)]
mod mock_framework;

pub use app_system::{setup_tracing, MarketConfig, MarketSystem};
pub use error::MarketError;
