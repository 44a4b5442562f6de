use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{error, info};

use super::MarketConfig;
use crate::actor_framework::ResourceActor;
use crate::clients::{CookClient, CustomerClient, DiscoveryClient, ListingClient, OrderClient};
use crate::domain::{Cook, Customer, Listing, Order};

/// Monotonic id generator handed to a `ResourceActor`.
fn id_sequence(format: fn(u64) -> String) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || format(counter.fetch_add(1, Ordering::SeqCst))
}

/// The marketplace core: one actor per entity type plus the clients wired on top.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct MarketSystem {
    pub cook_client: CookClient,
    pub customer_client: CustomerClient,
    pub listing_client: ListingClient,
    pub order_client: OrderClient,
    pub discovery_client: DiscoveryClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl MarketSystem {
    pub fn new(config: MarketConfig) -> Self {
        let buffer = config.channel_buffer;

        // 1. Cooks
        let (cook_actor, cook_resource_client) =
            ResourceActor::<Cook>::new(buffer, id_sequence(|n| format!("cook_{n}")));
        let cook_client = CookClient::new(cook_resource_client);
        let cook_handle = tokio::spawn(cook_actor.run());

        // 2. Customers
        let (customer_actor, customer_resource_client) =
            ResourceActor::<Customer>::new(buffer, id_sequence(|n| format!("customer_{n}")));
        let customer_client = CustomerClient::new(customer_resource_client);
        let customer_handle = tokio::spawn(customer_actor.run());

        // 3. Listings (inventory ledger)
        let (listing_actor, listing_resource_client) =
            ResourceActor::<Listing>::new(buffer, id_sequence(|n| format!("listing_{n}")));
        let listing_client = ListingClient::new(listing_resource_client, cook_client.clone());
        let listing_handle = tokio::spawn(listing_actor.run());

        // 4. Orders, referenced as HB000001, HB000002, ...
        let (order_actor, order_resource_client) =
            ResourceActor::<Order>::new(buffer, id_sequence(|n| format!("HB{n:06}")));
        let order_client = OrderClient::new(
            order_resource_client,
            listing_client.clone(),
            cook_client.clone(),
            customer_client.clone(),
        );
        let order_handle = tokio::spawn(order_actor.run());

        let discovery_client = DiscoveryClient::new(
            listing_client.clone(),
            cook_client.clone(),
            customer_client.clone(),
            config,
        );

        info!("Market system started");
        Self {
            cook_client,
            customer_client,
            listing_client,
            order_client,
            discovery_client,
            handles: vec![cook_handle, customer_handle, listing_handle, order_handle],
        }
    }

    /// Drops every client, which closes the actor channels, then waits for the actors to stop.
    ///
    /// Clients cloned out of the system keep their actor alive, so they must be
    /// dropped before calling this.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.discovery_client);
        drop(self.order_client);
        drop(self.listing_client);
        drop(self.customer_client);
        drop(self.cook_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
