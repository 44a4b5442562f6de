use rust_decimal::Decimal;
use tracing::info;

use super::actions::OrderAction;
use super::error::OrderError;
use super::lifecycle::{OrderLifecycle, OrderTransition};
use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderStatus, PaymentMethod, Rating, Role};

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type Patch = ();
    type Action = OrderAction;
    type ActionResult = Order;
    type Error = OrderError;
    const KIND: &'static str = "Order";

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a pending order. The total is computed once here and never recomputed.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, OrderError> {
        if params.quantity == 0 {
            return Err(OrderError::ValidationError("quantity must be positive".to_string()));
        }
        if params.customer_phone.trim().is_empty() {
            return Err(OrderError::ValidationError("contact phone required".to_string()));
        }

        Ok(Self {
            id,
            customer_id: params.customer_id,
            listing_id: params.listing_id,
            cook_id: params.cook_id,
            quantity: params.quantity,
            total_price: params.unit_price * Decimal::from(params.quantity),
            status: OrderStatus::Pending,
            delivery_type: params.delivery_type,
            payment_method: PaymentMethod::Cash,
            customer_phone: params.customer_phone.trim().to_string(),
            notes: params.notes,
            rating: None,
        })
    }

    /// Orders change only through lifecycle actions.
    fn on_update(&mut self, _patch: ()) -> Result<(), OrderError> {
        Err(OrderError::ValidationError(format!(
            "order {} can only change through its lifecycle",
            self.id
        )))
    }

    /// Cancellation is terminal; orders are never removed.
    fn on_delete(&self) -> Result<(), OrderError> {
        Err(OrderError::ValidationError(format!("order {} cannot be deleted", self.id)))
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<Order, OrderError> {
        match action {
            OrderAction::Transition { role, transition } => self.apply_transition(&role, transition)?,
            OrderAction::AttachRating { role, rating } => self.attach_rating(&role, rating)?,
        }
        Ok(self.clone())
    }
}

impl Order {
    fn apply_transition(&mut self, role: &Role, transition: OrderTransition) -> Result<(), OrderError> {
        OrderLifecycle::authorize(self, role, transition)?;
        let next = OrderLifecycle::next_status(self, transition)?;
        info!(order_id = %self.id, from = %self.status, to = %next, "Order transition");
        self.status = next;
        Ok(())
    }

    fn attach_rating(&mut self, role: &Role, rating: Rating) -> Result<(), OrderError> {
        match role {
            Role::Customer { customer_id } if *customer_id == self.customer_id => {}
            Role::Customer { .. } => return Err(OrderError::NotOwner(self.id.clone())),
            _ => {
                return Err(OrderError::NotAuthorized(
                    "only customers can submit ratings".to_string(),
                ))
            }
        }
        if self.status != OrderStatus::Completed {
            return Err(OrderError::NotCompleted(self.id.clone()));
        }
        if self.rating.is_some() {
            return Err(OrderError::AlreadyRated(self.id.clone()));
        }

        info!(order_id = %self.id, meal_rating = rating.meal_rating.get(), "Order rated");
        self.rating = Some(rating);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn sample_order() -> Order {
    Order::from_create_params(
        "HB000001".to_string(),
        OrderCreate {
            customer_id: "customer_1".into(),
            listing_id: "listing_1".into(),
            cook_id: "cook_1".into(),
            quantity: 2,
            unit_price: Decimal::from(400),
            delivery_type: crate::domain::DeliveryType::Pickup,
            customer_phone: "0300-1234567".into(),
            notes: String::new(),
        },
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RatingSubmission;

    fn transition(order: &mut Order, role: &Role, transition: OrderTransition) -> Result<Order, OrderError> {
        order.handle_action(OrderAction::Transition {
            role: role.clone(),
            transition,
        })
    }

    fn rating(meal: u8, cook: u8) -> Rating {
        RatingSubmission {
            meal_rating: meal,
            cook_rating: cook,
            comment: String::new(),
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn created_orders_are_pending_with_fixed_total() {
        let order = sample_order();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_price, Decimal::from(800));
        assert_eq!(order.payment_method, PaymentMethod::Cash);
    }

    #[test]
    fn creation_validation() {
        let mut params = OrderCreate {
            customer_id: "customer_1".into(),
            listing_id: "listing_1".into(),
            cook_id: "cook_1".into(),
            quantity: 0,
            unit_price: Decimal::from(400),
            delivery_type: crate::domain::DeliveryType::Pickup,
            customer_phone: "0300".into(),
            notes: String::new(),
        };
        assert!(Order::from_create_params("HB000002".into(), params.clone()).is_err());

        params.quantity = 1;
        params.customer_phone = "   ".into();
        assert!(Order::from_create_params("HB000002".into(), params).is_err());
    }

    #[test]
    fn full_kitchen_flow() {
        let cook = Role::cook("cook_1");
        let mut order = sample_order();

        assert_eq!(transition(&mut order, &cook, OrderTransition::Confirm).unwrap().status, OrderStatus::Confirmed);
        assert_eq!(transition(&mut order, &cook, OrderTransition::MarkReady).unwrap().status, OrderStatus::Ready);
        assert_eq!(transition(&mut order, &cook, OrderTransition::Complete).unwrap().status, OrderStatus::Completed);

        // Second completion is rejected and changes nothing
        let before = order.clone();
        assert!(matches!(
            transition(&mut order, &cook, OrderTransition::Complete),
            Err(OrderError::IllegalTransition { from: OrderStatus::Completed, .. })
        ));
        assert_eq!(order, before);
    }

    #[test]
    fn unauthorized_transition_leaves_order_unchanged() {
        let mut order = sample_order();
        let before = order.clone();
        assert!(matches!(
            transition(&mut order, &Role::customer("customer_1"), OrderTransition::Confirm),
            Err(OrderError::NotAuthorized(_))
        ));
        assert_eq!(order, before);
    }

    #[test]
    fn rating_guards() {
        let owner = Role::customer("customer_1");
        let mut order = sample_order();

        let attach = |order: &mut Order, role: &Role| {
            order.handle_action(OrderAction::AttachRating {
                role: role.clone(),
                rating: rating(5, 4),
            })
        };

        assert_eq!(attach(&mut order, &owner), Err(OrderError::NotCompleted("HB000001".into())));

        order.status = OrderStatus::Completed;
        assert_eq!(
            attach(&mut order, &Role::customer("customer_2")),
            Err(OrderError::NotOwner("HB000001".into()))
        );
        assert!(matches!(attach(&mut order, &Role::cook("cook_1")), Err(OrderError::NotAuthorized(_))));
        assert!(order.can_be_rated());

        let rated = attach(&mut order, &owner).unwrap();
        assert_eq!(rated.rating, Some(rating(5, 4)));
        assert!(!rated.can_be_rated());

        assert_eq!(attach(&mut order, &owner), Err(OrderError::AlreadyRated("HB000001".into())));
    }

    #[test]
    fn orders_reject_patches_and_deletion() {
        let mut order = sample_order();
        assert!(order.on_update(()).is_err());
        assert!(order.on_delete().is_err());
    }
}
