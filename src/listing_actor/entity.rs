use rust_decimal::Decimal;

use super::actions::{ListingAction, ListingActionResult};
use super::dtos::{ListingCreate, ListingPatch};
use super::error::InventoryError;
use crate::actor_framework::Entity;
use crate::domain::Listing;

fn validate_price(price: Decimal, field: &str) -> Result<(), InventoryError> {
    if price < Decimal::ZERO {
        return Err(InventoryError::ValidationError(format!(
            "{field} must be non-negative, got {price}"
        )));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), InventoryError> {
    if name.trim().is_empty() {
        return Err(InventoryError::ValidationError("Meal name required".to_string()));
    }
    Ok(())
}

impl Entity for Listing {
    type Id = String;
    type CreateParams = ListingCreate;
    type Patch = ListingPatch;
    type Action = ListingAction;
    type ActionResult = ListingActionResult;
    type Error = InventoryError;
    const KIND: &'static str = "Listing";

    fn id(&self) -> &String {
        &self.id
    }

    /// New listings start unapproved and wait for moderation.
    fn from_create_params(id: String, params: ListingCreate) -> Result<Self, InventoryError> {
        let draft = params.draft;
        validate_name(&draft.name)?;
        validate_price(draft.price, "price")?;
        if let Some(dine_price) = draft.dine_price {
            validate_price(dine_price, "dine_price")?;
        }

        Ok(Self {
            id,
            cook_id: params.cook_id,
            name: draft.name.trim().to_string(),
            description: draft.description,
            price: draft.price,
            quantity_available: draft.quantity,
            is_approved: false,
            paused: false,
            dine_in_available: draft.dine_in_available,
            dine_price: draft.dine_price,
        })
    }

    /// Applies a cook's edits. All fields are validated before any is written.
    fn on_update(&mut self, patch: ListingPatch) -> Result<(), InventoryError> {
        if let Some(name) = &patch.name {
            validate_name(name)?;
        }
        if let Some(price) = patch.price {
            validate_price(price, "price")?;
        }
        if let Some(Some(dine_price)) = patch.dine_price {
            validate_price(dine_price, "dine_price")?;
        }

        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity_available = quantity;
        }
        if let Some(dine_in_available) = patch.dine_in_available {
            self.dine_in_available = dine_in_available;
        }
        if let Some(dine_price) = patch.dine_price {
            self.dine_price = dine_price;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: ListingAction) -> Result<ListingActionResult, InventoryError> {
        match action {
            ListingAction::CheckStock => Ok(ListingActionResult::StockLevel(self.quantity_available)),
            ListingAction::Reserve(amount) => self.reserve(amount).map(ListingActionResult::Reserved),
            ListingAction::Release(amount) => Ok(ListingActionResult::Released(self.release(amount))),
            ListingAction::Claim {
                quantity,
                delivery_type,
            } => self.claim(quantity, delivery_type).map(ListingActionResult::Claimed),
            ListingAction::SetPaused(paused) => {
                self.paused = paused;
                Ok(ListingActionResult::Updated(self.clone()))
            }
            ListingAction::SetApproved(approved) => {
                self.is_approved = approved;
                Ok(ListingActionResult::Updated(self.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing_actor::ListingDraft;

    fn draft(price: i64) -> ListingDraft {
        ListingDraft {
            name: " Aloo Keema ".into(),
            description: "with naan".into(),
            price: Decimal::from(price),
            quantity: 4,
            dine_in_available: false,
            dine_price: None,
        }
    }

    #[test]
    fn created_listings_await_approval() {
        let listing = Listing::from_create_params(
            "listing_1".into(),
            ListingCreate { cook_id: "cook_1".into(), draft: draft(350) },
        )
        .unwrap();
        assert_eq!(listing.name, "Aloo Keema");
        assert!(!listing.is_approved);
        assert!(listing.is_active());
        assert!(!listing.is_orderable());
    }

    #[test]
    fn negative_prices_are_rejected() {
        let result = Listing::from_create_params(
            "listing_1".into(),
            ListingCreate { cook_id: "cook_1".into(), draft: draft(-1) },
        );
        assert!(matches!(result, Err(InventoryError::ValidationError(_))));
    }

    #[test]
    fn invalid_patch_changes_nothing() {
        let mut listing = Listing::from_create_params(
            "listing_1".into(),
            ListingCreate { cook_id: "cook_1".into(), draft: draft(350) },
        )
        .unwrap();
        let before = listing.clone();

        let patch = ListingPatch {
            quantity: Some(9),
            price: Some(Decimal::from(-5)),
            ..ListingPatch::default()
        };
        assert!(listing.on_update(patch).is_err());
        assert_eq!(listing, before);
    }

    #[test]
    fn pause_and_resume() {
        let mut listing = Listing::from_create_params(
            "listing_1".into(),
            ListingCreate { cook_id: "cook_1".into(), draft: draft(350) },
        )
        .unwrap();

        listing.handle_action(ListingAction::SetPaused(true)).unwrap();
        assert!(!listing.is_active());
        listing.handle_action(ListingAction::SetPaused(false)).unwrap();
        assert!(listing.is_active());
    }
}
