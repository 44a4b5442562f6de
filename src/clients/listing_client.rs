use tracing::{debug, info, instrument, warn};

use super::{require_admin, CookClient};
use crate::actor_framework::ResourceClient;
use crate::domain::{DeliveryType, Listing, Role};
use crate::error::MarketError;
use crate::listing_actor::{
    Claim, ListingAction, ListingActionResult, ListingCreate, ListingDraft, ListingPatch, Reservation, Restock,
};

fn unexpected() -> MarketError {
    MarketError::ActorCommunication("Unexpected result".to_string())
}

/// Client for interacting with the Listing actor and its inventory ledger.
#[derive(Clone)]
pub struct ListingClient {
    inner: ResourceClient<Listing>,
    cook_client: CookClient,
}

impl_client_methods!(ListingClient, Listing, listing);

impl ListingClient {
    pub fn new(inner: ResourceClient<Listing>, cook_client: CookClient) -> Self {
        Self { inner, cook_client }
    }

    /// Publishes a meal for the acting cook. New listings wait for moderation.
    #[instrument(skip(self, draft), fields(meal = %draft.name))]
    pub async fn create_listing(&self, role: &Role, draft: ListingDraft) -> Result<String, MarketError> {
        let Role::Cook { cook_id } = role else {
            return Err(MarketError::NotAuthorized("only cooks can list meals".to_string()));
        };
        self.cook_client.get_cook(cook_id.clone()).await?;
        debug!("Sending request");
        let id = self
            .inner
            .create(ListingCreate {
                cook_id: cook_id.clone(),
                draft,
            })
            .await?;
        info!(listing_id = %id, "Listing created");
        Ok(id)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_listing(&self, role: &Role, id: String, patch: ListingPatch) -> Result<Listing, MarketError> {
        self.require_owner(role, &id).await?;
        debug!("Sending request");
        Ok(self.inner.update(id, patch).await?)
    }

    /// Cook availability toggle. A paused listing is hidden and cannot be ordered.
    #[instrument(skip(self))]
    pub async fn set_paused(&self, role: &Role, id: String, paused: bool) -> Result<Listing, MarketError> {
        self.require_owner(role, &id).await?;
        self.updated(id, ListingAction::SetPaused(paused)).await
    }

    #[instrument(skip(self))]
    pub async fn approve_listing(&self, role: &Role, id: String) -> Result<Listing, MarketError> {
        self.moderate(role, id, true).await
    }

    #[instrument(skip(self))]
    pub async fn reject_listing(&self, role: &Role, id: String) -> Result<Listing, MarketError> {
        self.moderate(role, id, false).await
    }

    /// Every listing owned by the acting cook, in creation order.
    #[instrument(skip(self))]
    pub async fn my_listings(&self, role: &Role) -> Result<Vec<Listing>, MarketError> {
        let Role::Cook { cook_id } = role else {
            return Err(MarketError::NotAuthorized("only cooks have listings".to_string()));
        };
        let listings = self.list_listings().await?;
        Ok(listings.into_iter().filter(|l| &l.cook_id == cook_id).collect())
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: String) -> Result<u32, MarketError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ListingAction::CheckStock).await? {
            ListingActionResult::StockLevel(level) => Ok(level),
            _ => Err(unexpected()),
        }
    }

    #[instrument(skip(self))]
    pub async fn reserve(&self, id: String, quantity: u32) -> Result<Reservation, MarketError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ListingAction::Reserve(quantity)).await? {
            ListingActionResult::Reserved(reservation) => Ok(reservation),
            _ => Err(unexpected()),
        }
    }

    #[instrument(skip(self))]
    pub async fn release(&self, id: String, quantity: u32) -> Result<Restock, MarketError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ListingAction::Release(quantity)).await? {
            ListingActionResult::Released(restock) => Ok(restock),
            _ => Err(unexpected()),
        }
    }

    /// Atomically checks orderability, prices the order and reserves stock.
    #[instrument(skip(self))]
    pub async fn claim(&self, id: String, quantity: u32, delivery_type: DeliveryType) -> Result<Claim, MarketError> {
        debug!("Sending request");
        let action = ListingAction::Claim {
            quantity,
            delivery_type,
        };
        match self.inner.perform_action(id, action).await {
            Ok(ListingActionResult::Claimed(claim)) => Ok(claim),
            Ok(_) => Err(unexpected()),
            Err(e) => {
                warn!(error = %e, "Claim rejected");
                Err(e.into())
            }
        }
    }

    async fn updated(&self, id: String, action: ListingAction) -> Result<Listing, MarketError> {
        debug!("Sending request");
        match self.inner.perform_action(id, action).await? {
            ListingActionResult::Updated(listing) => Ok(listing),
            _ => Err(unexpected()),
        }
    }

    async fn moderate(&self, role: &Role, id: String, approved: bool) -> Result<Listing, MarketError> {
        require_admin(role, "moderate listings")?;
        let listing = self.updated(id, ListingAction::SetApproved(approved)).await?;
        info!(listing_id = %listing.id, approved, "Listing moderation updated");
        Ok(listing)
    }

    async fn require_owner(&self, role: &Role, id: &str) -> Result<(), MarketError> {
        let listing = self.get_listing(id.to_string()).await?;
        if role.acts_for_cook(&listing.cook_id) {
            Ok(())
        } else {
            Err(MarketError::NotAuthorized("you can only manage your own meals".to_string()))
        }
    }
}
