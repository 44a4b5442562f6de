use thiserror::Error;

/// Errors raised by listing creation, updates and the inventory ledger.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InventoryError {
    #[error("Insufficient inventory for {listing_id}: requested {requested}, available {available}")]
    Insufficient {
        listing_id: String,
        requested: u32,
        available: u32,
    },
    #[error("Listing unavailable: {0}")]
    Unavailable(String),
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),
    #[error("Listing validation error: {0}")]
    ValidationError(String),
}
