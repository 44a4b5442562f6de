use crate::domain::{Rating, Role};

use super::OrderTransition;

/// Custom actions for Order entities. Every action returns the updated order.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Moves the order along its lifecycle on behalf of `role`.
    Transition { role: Role, transition: OrderTransition },
    /// Attaches the customer's one and only rating to a completed order.
    AttachRating { role: Role, rating: Rating },
}
