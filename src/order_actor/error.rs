use thiserror::Error;

use super::OrderTransition;
use crate::domain::OrderStatus;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Cannot {transition} order {order_id} while it is {from}")]
    IllegalTransition {
        order_id: String,
        from: OrderStatus,
        transition: OrderTransition,
    },
    #[error("Not authorized: {0}")]
    NotAuthorized(String),
    #[error("Not the owner of order {0}")]
    NotOwner(String),
    #[error("Order {0} is not completed")]
    NotCompleted(String),
    #[error("Order {0} has already been rated")]
    AlreadyRated(String),
    #[error("Order validation error: {0}")]
    ValidationError(String),
}
