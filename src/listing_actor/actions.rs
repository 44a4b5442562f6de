use rust_decimal::Decimal;

use crate::domain::{DeliveryType, Listing};

/// Custom actions for Listing entities.
///
/// Each action runs to completion inside the listing actor, so a stock check
/// and the decrement that follows it can never interleave with another order.
#[derive(Debug, Clone)]
pub enum ListingAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// Decrements stock, failing if more is requested than available.
    Reserve(u32),
    /// Returns stock, e.g. after a cancellation.
    Release(u32),
    /// Orderability check, pricing and (for stock-backed orders) reservation in one step.
    Claim {
        quantity: u32,
        delivery_type: DeliveryType,
    },
    /// Cook availability toggle.
    SetPaused(bool),
    /// Admin moderation decision.
    SetApproved(bool),
}

/// Results from ListingActions - variants match 1:1 with ListingAction
#[derive(Debug, Clone)]
pub enum ListingActionResult {
    StockLevel(u32),
    Reserved(Reservation),
    Released(Restock),
    Claimed(Claim),
    Updated(Listing),
}

/// Outcome of a successful `reserve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reservation {
    pub remaining: u32,
    /// Stock hit zero with this reservation.
    pub sold_out: bool,
}

/// Outcome of a `release`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Restock {
    pub available: u32,
    /// The listing went from inactive to active with this release.
    pub reactivated: bool,
}

/// A priced claim on a listing, ready to become an order.
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    pub cook_id: String,
    pub unit_price: Decimal,
    /// `None` for dine-in claims, which bypass the ledger.
    pub reservation: Option<Reservation>,
}
