use crate::domain::{Order, OrderStatus, Role};

use super::OrderError;

/// The moves an order can make after creation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::AsRefStr,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum OrderTransition {
    Confirm,
    MarkReady,
    Complete,
    Cancel,
}

impl OrderTransition {
    pub fn target(self) -> OrderStatus {
        match self {
            Self::Confirm => OrderStatus::Confirmed,
            Self::MarkReady => OrderStatus::Ready,
            Self::Complete => OrderStatus::Completed,
            Self::Cancel => OrderStatus::Cancelled,
        }
    }

    /// Source states from which the transition is legal.
    ///
    /// `MarkReady` requires `Confirmed` for every caller, admins included.
    pub fn allowed_from(self) -> &'static [OrderStatus] {
        match self {
            Self::Confirm => &[OrderStatus::Pending],
            Self::MarkReady => &[OrderStatus::Confirmed],
            Self::Complete => &[OrderStatus::Ready, OrderStatus::Confirmed],
            Self::Cancel => &[OrderStatus::Pending, OrderStatus::Confirmed],
        }
    }

    fn is_kitchen_action(self) -> bool {
        !matches!(self, Self::Cancel)
    }
}

pub struct OrderLifecycle;

impl OrderLifecycle {
    /// Target status of `transition` from `order`'s current status, or
    /// `IllegalTransition` if the move is not in the table.
    pub fn next_status(order: &Order, transition: OrderTransition) -> Result<OrderStatus, OrderError> {
        if transition.allowed_from().contains(&order.status) {
            Ok(transition.target())
        } else {
            Err(OrderError::IllegalTransition {
                order_id: order.id.clone(),
                from: order.status,
                transition,
            })
        }
    }

    /// Kitchen moves belong to the receiving cook, cancellation to the
    /// ordering customer; an admin may do either.
    pub fn authorize(order: &Order, role: &Role, transition: OrderTransition) -> Result<(), OrderError> {
        let allowed = if transition.is_kitchen_action() {
            role.acts_for_cook(&order.cook_id)
        } else {
            role.acts_for_customer(&order.customer_id)
        };
        if allowed {
            Ok(())
        } else if transition.is_kitchen_action() {
            Err(OrderError::NotAuthorized(format!(
                "only the cook can {transition} order {}",
                order.id
            )))
        } else {
            Err(OrderError::NotAuthorized(format!(
                "you can only cancel your own orders ({})",
                order.id
            )))
        }
    }
}
