//! The inventory ledger: stock reservation and restoration on a single listing.

use tracing::{debug, info};

use super::{Claim, InventoryError, Reservation, Restock};
use crate::domain::{DeliveryType, Listing};

impl Listing {
    /// Takes `amount` portions out of stock.
    ///
    /// Fails with [`InventoryError::Insufficient`] and leaves the listing
    /// untouched when `amount` exceeds what is available. Reaching zero makes
    /// the listing inactive through its derived availability.
    pub fn reserve(&mut self, amount: u32) -> Result<Reservation, InventoryError> {
        if amount == 0 {
            return Err(InventoryError::InvalidQuantity(amount));
        }
        if amount > self.quantity_available {
            return Err(InventoryError::Insufficient {
                listing_id: self.id.clone(),
                requested: amount,
                available: self.quantity_available,
            });
        }

        self.quantity_available -= amount;
        let sold_out = self.quantity_available == 0;
        if sold_out {
            info!(listing_id = %self.id, "Listing sold out");
        }
        debug!(listing_id = %self.id, remaining = self.quantity_available, "Stock reserved");
        Ok(Reservation {
            remaining: self.quantity_available,
            sold_out,
        })
    }

    /// Puts `amount` portions back into stock.
    ///
    /// A listing that was inactive only because it had sold out becomes active
    /// again; a listing the cook paused stays paused.
    pub fn release(&mut self, amount: u32) -> Restock {
        let was_active = self.is_active();
        self.quantity_available = self.quantity_available.saturating_add(amount);
        let reactivated = !was_active && self.is_active();
        if reactivated {
            info!(listing_id = %self.id, "Listing back in stock");
        }
        Restock {
            available: self.quantity_available,
            reactivated,
        }
    }

    /// Validates that the listing can take an order right now, prices it and,
    /// unless the order is dine-in, reserves the stock.
    ///
    /// Stock-backed orders report shortage (including zero stock) as
    /// `Insufficient`; every other gate reports `Unavailable`.
    pub fn claim(&mut self, quantity: u32, delivery_type: DeliveryType) -> Result<Claim, InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::InvalidQuantity(quantity));
        }
        if !self.is_approved || self.paused {
            return Err(InventoryError::Unavailable(self.id.clone()));
        }

        let reservation = if delivery_type.uses_inventory() {
            Some(self.reserve(quantity)?)
        } else if self.quantity_available == 0 {
            return Err(InventoryError::Unavailable(self.id.clone()));
        } else {
            None
        };

        Ok(Claim {
            cook_id: self.cook_id.clone(),
            unit_price: self.unit_price(delivery_type),
            reservation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::listing::sample_listing;
    use rust_decimal::Decimal;

    #[test]
    fn reserve_then_release_restores_state() {
        for (stock, amount) in [(3, 1), (3, 3), (10, 7), (1, 1)] {
            let mut listing = sample_listing("listing_1", "cook_1", 400, stock);
            let before = listing.clone();

            listing.reserve(amount).unwrap();
            listing.release(amount);

            assert_eq!(listing, before);
            assert_eq!(listing.is_active(), before.is_active());
        }
    }

    #[test]
    fn reserve_more_than_available_fails_without_change() {
        let mut listing = sample_listing("listing_1", "cook_1", 400, 2);
        let err = listing.reserve(3).unwrap_err();
        assert_eq!(
            err,
            InventoryError::Insufficient {
                listing_id: "listing_1".into(),
                requested: 3,
                available: 2
            }
        );
        assert_eq!(listing.quantity_available, 2);
        assert!(listing.is_active());
    }

    #[test]
    fn reserving_to_zero_deactivates() {
        let mut listing = sample_listing("listing_1", "cook_1", 400, 3);

        let first = listing.reserve(2).unwrap();
        assert_eq!(first, Reservation { remaining: 1, sold_out: false });
        assert!(listing.is_active());

        let second = listing.reserve(1).unwrap();
        assert_eq!(second, Reservation { remaining: 0, sold_out: true });
        assert!(!listing.is_active());
    }

    #[test]
    fn release_reactivates_only_stock_depleted_listings() {
        let mut sold_out = sample_listing("listing_1", "cook_1", 400, 0);
        let restock = sold_out.release(2);
        assert_eq!(restock, Restock { available: 2, reactivated: true });
        assert!(sold_out.is_active());

        let mut paused = sample_listing("listing_2", "cook_1", 400, 0);
        paused.paused = true;
        let restock = paused.release(2);
        assert_eq!(restock, Restock { available: 2, reactivated: false });
        assert!(!paused.is_active());
    }

    #[test]
    fn zero_reservation_is_rejected() {
        let mut listing = sample_listing("listing_1", "cook_1", 400, 3);
        assert_eq!(listing.reserve(0), Err(InventoryError::InvalidQuantity(0)));
    }

    #[test]
    fn claim_prices_and_reserves_stock_backed_orders() {
        let mut listing = sample_listing("listing_1", "cook_1", 400, 3);
        let claim = listing.claim(2, DeliveryType::Pickup).unwrap();
        assert_eq!(claim.unit_price, Decimal::from(400));
        assert_eq!(claim.reservation, Some(Reservation { remaining: 1, sold_out: false }));
        assert_eq!(listing.quantity_available, 1);
    }

    #[test]
    fn dine_in_claim_leaves_stock_alone() {
        let mut listing = sample_listing("listing_1", "cook_1", 400, 3);
        listing.dine_in_available = true;
        listing.dine_price = Some(Decimal::from(500));

        let claim = listing.claim(5, DeliveryType::DineIn).unwrap();
        assert_eq!(claim.unit_price, Decimal::from(500));
        assert_eq!(claim.reservation, None);
        assert_eq!(listing.quantity_available, 3);
    }

    #[test]
    fn claim_gates() {
        let mut unapproved = sample_listing("listing_1", "cook_1", 400, 3);
        unapproved.is_approved = false;
        assert_eq!(
            unapproved.claim(1, DeliveryType::Pickup),
            Err(InventoryError::Unavailable("listing_1".into()))
        );

        let mut empty = sample_listing("listing_2", "cook_1", 400, 0);
        assert!(matches!(
            empty.claim(1, DeliveryType::Delivery),
            Err(InventoryError::Insufficient { available: 0, .. })
        ));
        assert_eq!(
            empty.claim(1, DeliveryType::DineIn),
            Err(InventoryError::Unavailable("listing_2".into()))
        );
    }
}
