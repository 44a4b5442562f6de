use rust_decimal::Decimal;
use tracing::{error, info, Instrument};

use homebite::clients::NearbyQuery;
use homebite::domain::{CookCreate, CustomerCreate, DeliveryType, Location, PlaceOrder, RatingSubmission, Role};
use homebite::listing_actor::ListingDraft;
use homebite::{setup_tracing, MarketConfig, MarketError, MarketSystem};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting marketplace demo");

    let system = MarketSystem::new(MarketConfig::from_env());

    let span = tracing::info_span!("demo");
    let result = run_demo(&system).instrument(span).await;
    if let Err(e) = &result {
        error!(error = %e, "Demo failed");
    }

    system.shutdown().await?;
    result.map_err(|e| e.to_string())?;

    info!("Application completed successfully");
    Ok(())
}

async fn run_demo(system: &MarketSystem) -> Result<(), MarketError> {
    let admin = Role::Admin;

    // A cook in Gulberg, approved by an admin
    let cook_id = system
        .cook_client
        .register_cook(CookCreate {
            name: "Ammi's Kitchen".to_string(),
            phone: "0300-1111111".to_string(),
            kitchen_location: Some(Location::new(31.5204, 74.3587)?),
            kitchen_address: "Gulberg III, Lahore".to_string(),
            bio: "Home-style Lahori food".to_string(),
        })
        .await?;
    system.cook_client.approve_cook(&admin, cook_id.clone(), true).await?;
    let cook = Role::cook(cook_id.clone());

    let listing_id = system
        .listing_client
        .create_listing(
            &cook,
            ListingDraft {
                name: "Chicken Biryani".to_string(),
                description: "Served with raita".to_string(),
                price: Decimal::from(400),
                quantity: 3,
                dine_in_available: true,
                dine_price: Some(Decimal::from(500)),
            },
        )
        .await?;
    system.listing_client.approve_listing(&admin, listing_id.clone()).await?;

    // A customer working a few hundred meters away
    let customer_id = system
        .customer_client
        .register_customer(CustomerCreate {
            name: "Sara".to_string(),
            phone: "0321-2222222".to_string(),
            office_location: Some(Location::new(31.5180, 74.3550)?),
            office_address: "MM Alam Road".to_string(),
        })
        .await?;
    let customer = Role::customer(customer_id.clone());

    let nearby = system
        .discovery_client
        .find_nearby(NearbyQuery {
            customer_id: Some(customer_id.clone()),
            ..NearbyQuery::default()
        })
        .await?;
    for hit in &nearby {
        info!(
            listing = %hit.listing.name,
            cook = %hit.cook_name,
            distance_km = ?hit.display_distance_km(),
            "Nearby meal"
        );
    }

    let order = system
        .order_client
        .place_order(
            &customer,
            PlaceOrder {
                listing_id: listing_id.clone(),
                quantity: 2,
                delivery_type: DeliveryType::Pickup,
                customer_phone: "0321-2222222".to_string(),
                notes: "Less spicy please".to_string(),
            },
        )
        .await?;
    info!(order_id = %order.id, total = %order.total_price, "Order placed");

    system.order_client.confirm_order(&cook, order.id.clone()).await?;
    system.order_client.mark_ready(&cook, order.id.clone()).await?;
    system.order_client.complete_order(&cook, order.id.clone()).await?;

    let rating = system
        .order_client
        .submit_rating(
            &customer,
            order.id.clone(),
            RatingSubmission {
                meal_rating: 5,
                cook_rating: 4,
                comment: "Just like home".to_string(),
            },
        )
        .await?;
    match serde_json::to_string(&rating) {
        Ok(json) => info!(rating = %json, "Rating recorded"),
        Err(e) => error!(error = %e, "Could not serialize rating"),
    }

    let stats = system.order_client.cook_stats(&cook, cook_id).await?;
    info!(
        completed = stats.completed,
        revenue = %stats.revenue,
        rating = %stats.rating,
        "Cook dashboard"
    );

    let stock = system.listing_client.check_stock(listing_id).await?;
    info!(remaining = stock, "Stock left");
    Ok(())
}
