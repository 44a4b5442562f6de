use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What a cook submits when publishing a meal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub dine_in_available: bool,
    pub dine_price: Option<Decimal>,
}

/// Creation payload: the draft bound to the cook who owns it.
#[derive(Debug, Clone)]
pub struct ListingCreate {
    pub cook_id: String,
    pub draft: ListingDraft,
}

/// Cook edits to an existing listing.
///
/// `dine_price: Some(None)` removes the dine-in price.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<u32>,
    pub dine_in_available: Option<bool>,
    pub dine_price: Option<Option<Decimal>>,
}
