use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::cook_actor::CookError;
use crate::customer_actor::CustomerError;
use crate::domain::{InvalidLocation, InvalidScore, OrderStatus};
use crate::listing_actor::InventoryError;
use crate::order_actor::{OrderError, OrderTransition};

/// The structured reason an operation was rejected.
///
/// Every variant is scoped to the single requested operation and is raised
/// before, or instead of, any mutation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MarketError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("Listing unavailable: {0}")]
    ListingUnavailable(String),
    #[error("Insufficient inventory: requested {requested}, available {available}")]
    InsufficientInventory { requested: u32, available: u32 },
    #[error("Cannot {transition} an order that is {from}")]
    IllegalTransition {
        from: OrderStatus,
        transition: OrderTransition,
    },
    #[error("Order not completed: {0}")]
    OrderNotCompleted(String),
    #[error("Order already rated: {0}")]
    AlreadyRated(String),
    #[error("Not authorized: {0}")]
    NotAuthorized(String),
    #[error("Not owner: {0}")]
    NotOwner(String),
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl MarketError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound { kind, id: id.into() }
    }
}

impl<E: Into<MarketError>> From<FrameworkError<E>> for MarketError {
    fn from(err: FrameworkError<E>) -> Self {
        match err {
            FrameworkError::NotFound { kind, id } => Self::NotFound { kind, id },
            FrameworkError::ActorClosed => Self::ActorCommunication("Actor closed".to_string()),
            FrameworkError::ActorDropped => Self::ActorCommunication("Actor dropped".to_string()),
            FrameworkError::Entity(e) => e.into(),
        }
    }
}

impl From<InventoryError> for MarketError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::Insufficient {
                requested, available, ..
            } => Self::InsufficientInventory { requested, available },
            InventoryError::Unavailable(id) => Self::ListingUnavailable(id),
            InventoryError::InvalidQuantity(_) | InventoryError::ValidationError(_) => {
                Self::Validation(err.to_string())
            }
        }
    }
}

impl From<OrderError> for MarketError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::IllegalTransition { from, transition, .. } => {
                Self::IllegalTransition { from, transition }
            }
            OrderError::NotAuthorized(reason) => Self::NotAuthorized(reason),
            OrderError::NotOwner(id) => Self::NotOwner(id),
            OrderError::NotCompleted(id) => Self::OrderNotCompleted(id),
            OrderError::AlreadyRated(id) => Self::AlreadyRated(id),
            OrderError::ValidationError(reason) => Self::Validation(reason),
        }
    }
}

impl From<CookError> for MarketError {
    fn from(err: CookError) -> Self {
        match err {
            CookError::ValidationError(reason) => Self::Validation(reason),
        }
    }
}

impl From<CustomerError> for MarketError {
    fn from(err: CustomerError) -> Self {
        match err {
            CustomerError::ValidationError(reason) => Self::Validation(reason),
        }
    }
}

impl From<InvalidScore> for MarketError {
    fn from(err: InvalidScore) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<InvalidLocation> for MarketError {
    fn from(err: InvalidLocation) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framework_errors_map_to_market_errors() {
        let err: MarketError = FrameworkError::<OrderError>::NotFound {
            kind: "Order",
            id: "HB000009".into(),
        }
        .into();
        assert_eq!(err, MarketError::not_found("Order", "HB000009"));

        let err: MarketError = FrameworkError::<OrderError>::ActorClosed.into();
        assert!(matches!(err, MarketError::ActorCommunication(_)));
    }

    #[test]
    fn inventory_errors_keep_their_meaning() {
        let err: MarketError = FrameworkError::Entity(InventoryError::Insufficient {
            listing_id: "listing_1".into(),
            requested: 2,
            available: 1,
        })
        .into();
        assert_eq!(err, MarketError::InsufficientInventory { requested: 2, available: 1 });

        let err: MarketError = InventoryError::Unavailable("listing_1".into()).into();
        assert_eq!(err, MarketError::ListingUnavailable("listing_1".into()));
    }

    #[test]
    fn illegal_transition_message() {
        let err: MarketError = OrderError::IllegalTransition {
            order_id: "HB000001".into(),
            from: OrderStatus::Completed,
            transition: OrderTransition::Cancel,
        }
        .into();
        assert_eq!(err.to_string(), "Cannot cancel an order that is completed");
    }
}
