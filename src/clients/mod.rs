//! Typed handles over the resource actors. Clients validate input, check who
//! is acting, and orchestrate multi-actor flows such as order placement.

#[macro_use]
mod macros;

mod cook_client;
mod customer_client;
mod discovery_client;
mod listing_client;
mod order_client;

pub use cook_client::*;
pub use customer_client::*;
pub use discovery_client::*;
pub use listing_client::*;
pub use order_client::*;

use crate::domain::Role;
use crate::error::MarketError;

fn require_admin(role: &Role, what: &str) -> Result<(), MarketError> {
    if role.is_admin() {
        Ok(())
    } else {
        Err(MarketError::NotAuthorized(format!("only an admin can {what}")))
    }
}
