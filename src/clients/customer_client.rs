use tracing::{debug, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{Customer, CustomerCreate, CustomerPatch, Role};
use crate::error::MarketError;

/// Client for interacting with the Customer actor.
#[derive(Clone)]
pub struct CustomerClient {
    inner: ResourceClient<Customer>,
}

impl_basic_client!(CustomerClient, Customer, customer);

impl CustomerClient {
    #[instrument(skip(self, registration), fields(customer_name = %registration.name))]
    pub async fn register_customer(&self, registration: CustomerCreate) -> Result<String, MarketError> {
        debug!("Sending request");
        let id = self.inner.create(registration).await?;
        info!(customer_id = %id, "Customer registered");
        Ok(id)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_customer(
        &self,
        role: &Role,
        id: String,
        patch: CustomerPatch,
    ) -> Result<Customer, MarketError> {
        if !role.acts_for_customer(&id) {
            return Err(MarketError::NotAuthorized("you can only edit your own profile".to_string()));
        }
        debug!("Sending request");
        Ok(self.inner.update(id, patch).await?)
    }
}
