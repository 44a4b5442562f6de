use super::actions::CookAction;
use super::error::CookError;
use crate::actor_framework::Entity;
use crate::domain::{Cook, CookAggregate, CookCreate, CookPatch};

fn require_text(value: &str, field: &str) -> Result<(), CookError> {
    if value.trim().is_empty() {
        return Err(CookError::ValidationError(format!("{field} required")));
    }
    Ok(())
}

impl Entity for Cook {
    type Id = String;
    type CreateParams = CookCreate;
    type Patch = CookPatch;
    type Action = CookAction;
    type ActionResult = Cook;
    type Error = CookError;
    const KIND: &'static str = "Cook";

    fn id(&self) -> &String {
        &self.id
    }

    /// Registers a cook. Accounts start active but unapproved.
    fn from_create_params(id: String, params: CookCreate) -> Result<Self, CookError> {
        require_text(&params.name, "name")?;
        require_text(&params.phone, "phone")?;
        Ok(Self {
            id,
            name: params.name,
            phone: params.phone,
            kitchen_location: params.kitchen_location,
            kitchen_address: params.kitchen_address,
            bio: params.bio,
            is_approved: false,
            is_active: true,
            aggregate: CookAggregate::default(),
        })
    }

    fn on_update(&mut self, patch: CookPatch) -> Result<(), CookError> {
        if let Some(name) = &patch.name {
            require_text(name, "name")?;
        }
        if let Some(phone) = &patch.phone {
            require_text(phone, "phone")?;
        }

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(location) = patch.kitchen_location {
            self.kitchen_location = Some(location);
        }
        if let Some(address) = patch.kitchen_address {
            self.kitchen_address = address;
        }
        if let Some(bio) = patch.bio {
            self.bio = bio;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: CookAction) -> Result<Cook, CookError> {
        match action {
            CookAction::RecordCompletedOrder => self.aggregate.record_completed_order(),
            CookAction::RecordRating(score) => self.aggregate.record_rating(score),
            CookAction::SetApproved(approved) => self.is_approved = approved,
            CookAction::SetActive(active) => self.is_active = active,
        }
        Ok(self.clone())
    }
}
