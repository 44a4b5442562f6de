use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::{CookClient, CustomerClient, ListingClient};
use crate::app_system::MarketConfig;
use crate::domain::Location;
use crate::error::MarketError;
use crate::matcher::{self, Candidate, MatchCriteria, NearbyListing, SortKey};

/// A browse request from the discovery page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NearbyQuery {
    /// Whose saved office location to search around.
    pub customer_id: Option<String>,
    /// Explicit position; overrides the customer's saved location.
    pub location: Option<Location>,
    pub radius_km: Option<f64>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub search: Option<String>,
    #[serde(default)]
    pub dine_in_only: bool,
    #[serde(default)]
    pub sort: SortKey,
}

/// Read-only client that joins listings with their cooks and ranks them
/// around a customer.
#[derive(Clone)]
pub struct DiscoveryClient {
    listing_client: ListingClient,
    cook_client: CookClient,
    customer_client: CustomerClient,
    config: MarketConfig,
}

impl DiscoveryClient {
    pub fn new(
        listing_client: ListingClient,
        cook_client: CookClient,
        customer_client: CustomerClient,
        config: MarketConfig,
    ) -> Self {
        Self {
            listing_client,
            cook_client,
            customer_client,
            config,
        }
    }

    /// Orderable meals around the query origin, filtered and sorted.
    ///
    /// Without any origin, radius filtering is skipped and every orderable
    /// listing is returned with an unknown distance.
    #[instrument(skip(self, query), fields(sort = %query.sort))]
    pub async fn find_nearby(&self, query: NearbyQuery) -> Result<Vec<NearbyListing>, MarketError> {
        let origin = match (query.location, &query.customer_id) {
            (Some(location), _) => Some(location),
            (None, Some(customer_id)) => {
                self.customer_client
                    .get_customer(customer_id.clone())
                    .await?
                    .office_location
            }
            (None, None) => None,
        };

        let cooks: HashMap<String, _> = self
            .cook_client
            .list_cooks()
            .await?
            .into_iter()
            .filter(|cook| cook.is_available())
            .map(|cook| (cook.id.clone(), cook))
            .collect();

        let candidates: Vec<Candidate> = self
            .listing_client
            .list_listings()
            .await?
            .into_iter()
            .filter(|listing| listing.is_orderable())
            .filter_map(|listing| {
                let cook = cooks.get(&listing.cook_id)?;
                Some(Candidate {
                    cook_name: cook.name.clone(),
                    cook_rating: cook.rating(),
                    location: cook.kitchen_location,
                    listing,
                })
            })
            .collect();
        debug!(candidates = candidates.len(), "Candidates collected");

        let criteria = MatchCriteria {
            origin,
            radius_km: self.config.effective_radius(query.radius_km),
            min_price: query.min_price,
            max_price: query.max_price,
            search: query.search,
            dine_in_only: query.dine_in_only,
            sort: query.sort,
        };
        let matches = matcher::rank(candidates, &criteria);
        info!(matches = matches.len(), radius_km = criteria.radius_km, "Nearby search complete");
        Ok(matches)
    }
}
