use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DeliveryType;

/// A cook's meal offer.
///
/// Availability is derived: a listing is active while it has stock and the
/// cook has not paused it. Moderation (`is_approved`) is tracked separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub cook_id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity_available: u32,
    pub is_approved: bool,
    /// Cook-controlled availability toggle, independent of stock.
    pub paused: bool,
    pub dine_in_available: bool,
    pub dine_price: Option<Decimal>,
}

impl Listing {
    pub fn is_active(&self) -> bool {
        !self.paused && self.quantity_available > 0
    }

    /// Listing-side half of orderability; the cook's account state is checked by the caller.
    pub fn is_orderable(&self) -> bool {
        self.is_active() && self.is_approved
    }

    /// Per-portion price for the given delivery type.
    ///
    /// Dine-in uses the dine-in price when the listing offers dine-in, falling
    /// back to the base price when no dine-in price is set.
    pub fn unit_price(&self, delivery_type: DeliveryType) -> Decimal {
        match (delivery_type, self.dine_in_available) {
            (DeliveryType::DineIn, true) => self.dine_price.unwrap_or(self.price),
            _ => self.price,
        }
    }

    /// Case-insensitive substring match against name and description.
    pub fn matches_text(&self, needle_lowercase: &str) -> bool {
        self.name.to_lowercase().contains(needle_lowercase)
            || self.description.to_lowercase().contains(needle_lowercase)
    }
}

/// Outward form of a listing: the stored fields plus its derived availability.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ListingView<'a> {
    #[serde(flatten)]
    pub listing: &'a Listing,
    pub is_active: bool,
    pub is_orderable: bool,
}

impl Listing {
    pub fn view(&self) -> ListingView<'_> {
        ListingView {
            listing: self,
            is_active: self.is_active(),
            is_orderable: self.is_orderable(),
        }
    }
}

/// `serialize_with` helper for fields holding a [`Listing`].
pub fn serialize_with_availability<S: serde::Serializer>(listing: &Listing, serializer: S) -> Result<S::Ok, S::Error> {
    listing.view().serialize(serializer)
}

#[cfg(test)]
pub(crate) fn sample_listing(id: &str, cook_id: &str, price: i64, quantity: u32) -> Listing {
    Listing {
        id: id.to_string(),
        cook_id: cook_id.to_string(),
        name: format!("Meal {id}"),
        description: String::new(),
        price: Decimal::from(price),
        quantity_available: quantity,
        is_approved: true,
        paused: false,
        dine_in_available: false,
        dine_price: None,
    }
}
