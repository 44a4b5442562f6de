use tracing::{debug, info, instrument};

use super::require_admin;
use crate::actor_framework::ResourceClient;
use crate::cook_actor::CookAction;
use crate::domain::{Cook, CookCreate, CookPatch, RatingScore, Role};
use crate::error::MarketError;

/// Client for interacting with the Cook actor.
#[derive(Clone)]
pub struct CookClient {
    inner: ResourceClient<Cook>,
}

impl_basic_client!(CookClient, Cook, cook);

impl CookClient {
    /// Registers a cook; the account waits for admin approval.
    #[instrument(skip(self, registration), fields(cook_name = %registration.name))]
    pub async fn register_cook(&self, registration: CookCreate) -> Result<String, MarketError> {
        debug!("Sending request");
        let id = self.inner.create(registration).await?;
        info!(cook_id = %id, "Cook registered");
        Ok(id)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_cook(&self, role: &Role, id: String, patch: CookPatch) -> Result<Cook, MarketError> {
        if !role.acts_for_cook(&id) {
            return Err(MarketError::NotAuthorized("you can only edit your own profile".to_string()));
        }
        Ok(self.inner.update(id, patch).await?)
    }

    #[instrument(skip(self))]
    pub async fn approve_cook(&self, role: &Role, id: String, approved: bool) -> Result<Cook, MarketError> {
        require_admin(role, "approve cooks")?;
        let cook = self.perform(id, CookAction::SetApproved(approved)).await?;
        info!(cook_id = %cook.id, approved, "Cook moderation updated");
        Ok(cook)
    }

    #[instrument(skip(self))]
    pub async fn set_cook_active(&self, role: &Role, id: String, active: bool) -> Result<Cook, MarketError> {
        require_admin(role, "activate or deactivate cooks")?;
        self.perform(id, CookAction::SetActive(active)).await
    }

    /// Counts one more completed order for the cook.
    #[instrument(skip(self))]
    pub async fn record_completed_order(&self, id: String) -> Result<Cook, MarketError> {
        self.perform(id, CookAction::RecordCompletedOrder).await
    }

    /// Folds a new cook rating into the running average.
    #[instrument(skip(self))]
    pub async fn record_rating(&self, id: String, score: RatingScore) -> Result<Cook, MarketError> {
        self.perform(id, CookAction::RecordRating(score)).await
    }

    async fn perform(&self, id: String, action: CookAction) -> Result<Cook, MarketError> {
        debug!("Sending request");
        Ok(self.inner.perform_action(id, action).await?)
    }
}
