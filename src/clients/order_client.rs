use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use super::{CookClient, CustomerClient, ListingClient};
use crate::actor_framework::ResourceClient;
use crate::domain::{
    average, Order, OrderCreate, OrderStatus, PlaceOrder, RatingRecord, RatingSubmission, Role,
};
use crate::error::MarketError;
use crate::order_actor::{OrderAction, OrderTransition};

/// Per-cook dashboard numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CookStats {
    pub pending: u32,
    pub confirmed: u32,
    pub ready: u32,
    pub completed: u32,
    pub cancelled: u32,
    /// Sum of `total_price` over completed orders.
    pub revenue: Decimal,
    pub rating: Decimal,
    pub total_ratings: u32,
}

/// Client for interacting with the Order actor.
///
/// This client handles the orchestration around an order: it validates the
/// customer, cook and listing before creating an order, and applies the
/// inventory and cook-aggregate side effects of each transition.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    listing_client: ListingClient,
    cook_client: CookClient,
    customer_client: CustomerClient,
}

impl_client_methods!(OrderClient, Order, order);

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        listing_client: ListingClient,
        cook_client: CookClient,
        customer_client: CustomerClient,
    ) -> Self {
        Self {
            inner,
            listing_client,
            cook_client,
            customer_client,
        }
    }

    /// Places a pending order for the acting customer.
    ///
    /// The listing claim (orderability, price, stock) is a single atomic step
    /// on the listing, so two customers racing for the last portion cannot
    /// both succeed.
    #[instrument(skip(self, request), fields(listing_id = %request.listing_id, quantity = request.quantity))]
    pub async fn place_order(&self, role: &Role, request: PlaceOrder) -> Result<Order, MarketError> {
        info!("Processing place_order request");

        let Role::Customer { customer_id } = role else {
            return Err(MarketError::NotAuthorized("only customers can place orders".to_string()));
        };

        // Step 1: Validate input
        if request.quantity == 0 {
            return Err(MarketError::Validation("quantity must be at least 1".to_string()));
        }
        if request.customer_phone.trim().is_empty() {
            return Err(MarketError::Validation("contact phone required".to_string()));
        }

        // Step 2: Validate customer
        let customer = self.customer_client.get_customer(customer_id.clone()).await?;
        debug!(customer_name = %customer.name, "Customer validation successful");

        // Step 3: Validate listing and its cook
        let listing = self.listing_client.get_listing(request.listing_id.clone()).await?;
        let cook = self.cook_client.get_cook(listing.cook_id.clone()).await?;
        if !cook.is_available() {
            warn!(cook_id = %cook.id, "Cook not accepting orders");
            return Err(MarketError::ListingUnavailable(listing.id));
        }

        // Step 4: Claim the listing (price + reservation)
        let claim = self
            .listing_client
            .claim(listing.id.clone(), request.quantity, request.delivery_type)
            .await?;
        if let Some(reservation) = claim.reservation {
            info!(remaining = reservation.remaining, sold_out = reservation.sold_out, "Stock reserved");
        }

        // Step 5: Create order in ResourceActor
        let payload = OrderCreate {
            customer_id: customer.id,
            listing_id: listing.id.clone(),
            cook_id: claim.cook_id,
            quantity: request.quantity,
            unit_price: claim.unit_price,
            delivery_type: request.delivery_type,
            customer_phone: request.customer_phone,
            notes: request.notes,
        };
        let id = match self.inner.create(payload).await {
            Ok(id) => id,
            Err(e) => {
                error!(error = %e, "Order creation failed");
                if claim.reservation.is_some() {
                    if let Err(release_err) = self.listing_client.release(listing.id, request.quantity).await {
                        error!(error = %release_err, "Failed to return reserved stock");
                    }
                }
                return Err(e.into());
            }
        };

        info!(order_id = %id, "Order placed");
        self.get_order(id).await
    }

    #[instrument(skip(self))]
    pub async fn confirm_order(&self, role: &Role, id: String) -> Result<Order, MarketError> {
        self.transition(role, id, OrderTransition::Confirm).await
    }

    #[instrument(skip(self))]
    pub async fn mark_ready(&self, role: &Role, id: String) -> Result<Order, MarketError> {
        self.transition(role, id, OrderTransition::MarkReady).await
    }

    /// Completes the order and counts it on the cook's aggregate.
    ///
    /// A second `complete` is rejected by the order itself, so the counter is
    /// incremented exactly once.
    #[instrument(skip(self))]
    pub async fn complete_order(&self, role: &Role, id: String) -> Result<Order, MarketError> {
        let order = self.transition(role, id, OrderTransition::Complete).await?;
        match self.cook_client.record_completed_order(order.cook_id.clone()).await {
            Ok(cook) => debug!(total_orders = cook.aggregate.total_orders(), "Cook aggregate updated"),
            Err(e) => {
                error!(order_id = %order.id, cook_id = %order.cook_id, error = %e, "Completed order not counted for cook");
                return Err(e);
            }
        }
        Ok(order)
    }

    /// Cancels the order and returns reserved stock to the listing.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, role: &Role, id: String) -> Result<Order, MarketError> {
        let order = self.transition(role, id, OrderTransition::Cancel).await?;
        if order.delivery_type.uses_inventory() {
            let restock = self
                .listing_client
                .release(order.listing_id.clone(), order.quantity)
                .await?;
            info!(
                listing_id = %order.listing_id,
                available = restock.available,
                reactivated = restock.reactivated,
                "Stock returned"
            );
        }
        Ok(order)
    }

    /// Rates a completed order and folds the cook score into the cook's average.
    #[instrument(skip(self, submission))]
    pub async fn submit_rating(
        &self,
        role: &Role,
        order_id: String,
        submission: RatingSubmission,
    ) -> Result<RatingRecord, MarketError> {
        let rating = submission.validate()?;
        let cook_score = rating.cook_rating;

        debug!("Sending request");
        let order = self
            .inner
            .perform_action(
                order_id,
                OrderAction::AttachRating {
                    role: role.clone(),
                    rating,
                },
            )
            .await?;

        match self.cook_client.record_rating(order.cook_id.clone(), cook_score).await {
            Ok(cook) => info!(cook_id = %cook.id, rating = %cook.rating(), "Cook rating updated"),
            Err(e) => {
                error!(order_id = %order.id, cook_id = %order.cook_id, error = %e, "Rating not folded into cook average");
                return Err(e);
            }
        }

        order
            .rating_record()
            .ok_or_else(|| MarketError::ActorCommunication("Unexpected result".to_string()))
    }

    /// Orders visible to the acting role, newest first.
    ///
    /// Cooks see orders they received, customers see orders they placed and
    /// admins see everything.
    #[instrument(skip(self))]
    pub async fn order_history(&self, role: &Role) -> Result<Vec<Order>, MarketError> {
        let mut orders: Vec<Order> = self
            .list_orders()
            .await?
            .into_iter()
            .filter(|o| visible_to(o, role))
            .collect();
        orders.reverse();
        Ok(orders)
    }

    /// Orders still waiting for the cook to confirm them.
    #[instrument(skip(self))]
    pub async fn active_orders(&self, role: &Role) -> Result<Vec<Order>, MarketError> {
        self.history_with_status(role, OrderStatus::Pending).await
    }

    #[instrument(skip(self))]
    pub async fn completed_orders(&self, role: &Role) -> Result<Vec<Order>, MarketError> {
        self.history_with_status(role, OrderStatus::Completed).await
    }

    /// Ratings the acting customer has submitted, newest first.
    #[instrument(skip(self))]
    pub async fn ratings_given(&self, role: &Role) -> Result<Vec<RatingRecord>, MarketError> {
        if !matches!(role, Role::Customer { .. }) {
            return Err(MarketError::NotAuthorized("only customers give ratings".to_string()));
        }
        self.ratings_visible_to(role).await
    }

    /// Ratings the acting cook has received, newest first.
    #[instrument(skip(self))]
    pub async fn ratings_received(&self, role: &Role) -> Result<Vec<RatingRecord>, MarketError> {
        if !matches!(role, Role::Cook { .. }) {
            return Err(MarketError::NotAuthorized("only cooks receive ratings".to_string()));
        }
        self.ratings_visible_to(role).await
    }

    /// Average meal score for a listing, rounded to one decimal; `0.0` when unrated.
    #[instrument(skip(self))]
    pub async fn meal_rating_average(&self, listing_id: String) -> Result<Decimal, MarketError> {
        let (sum, count) = self
            .list_orders()
            .await?
            .iter()
            .filter(|o| o.listing_id == listing_id)
            .filter_map(|o| o.rating.as_ref())
            .fold((0u64, 0u32), |(sum, count), r| {
                (sum + u64::from(r.meal_rating.get()), count + 1)
            });
        Ok(average(sum, count))
    }

    #[instrument(skip(self))]
    pub async fn cook_stats(&self, role: &Role, cook_id: String) -> Result<CookStats, MarketError> {
        if !role.acts_for_cook(&cook_id) {
            return Err(MarketError::NotAuthorized("you can only view your own dashboard".to_string()));
        }
        let cook = self.cook_client.get_cook(cook_id.clone()).await?;

        let mut stats = CookStats {
            rating: cook.rating(),
            total_ratings: cook.aggregate.total_ratings(),
            ..CookStats::default()
        };
        for order in self.list_orders().await?.iter().filter(|o| o.cook_id == cook_id) {
            match order.status {
                OrderStatus::Pending => stats.pending += 1,
                OrderStatus::Confirmed => stats.confirmed += 1,
                OrderStatus::Ready => stats.ready += 1,
                OrderStatus::Completed => {
                    stats.completed += 1;
                    stats.revenue += order.total_price;
                }
                OrderStatus::Cancelled => stats.cancelled += 1,
            }
        }
        Ok(stats)
    }

    async fn transition(&self, role: &Role, id: String, transition: OrderTransition) -> Result<Order, MarketError> {
        debug!("Sending request");
        let action = OrderAction::Transition {
            role: role.clone(),
            transition,
        };
        Ok(self.inner.perform_action(id, action).await?)
    }

    async fn history_with_status(&self, role: &Role, status: OrderStatus) -> Result<Vec<Order>, MarketError> {
        let mut orders = self.order_history(role).await?;
        orders.retain(|o| o.status == status);
        Ok(orders)
    }

    async fn ratings_visible_to(&self, role: &Role) -> Result<Vec<RatingRecord>, MarketError> {
        Ok(self
            .order_history(role)
            .await?
            .iter()
            .filter_map(Order::rating_record)
            .collect())
    }
}

fn visible_to(order: &Order, role: &Role) -> bool {
    match role {
        Role::Cook { cook_id } => order.cook_id == *cook_id,
        Role::Customer { customer_id } => order.customer_id == *customer_id,
        Role::Admin => true,
    }
}
