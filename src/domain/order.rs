use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DeliveryType {
    #[default]
    Pickup,
    Delivery,
    DineIn,
}

impl DeliveryType {
    /// Dine-in consumes kitchen capacity, not packaged stock.
    pub fn uses_inventory(self) -> bool {
        self != Self::DineIn
    }
}

/// Orders are settled in cash on pickup or delivery; there is no gateway.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Rating must be between 1 and 5, got {0}")]
pub struct InvalidScore(pub u8);

/// A 1..=5 star score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RatingScore(u8);

impl RatingScore {
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for RatingScore {
    type Error = InvalidScore;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidScore(value))
        }
    }
}

impl From<RatingScore> for u8 {
    fn from(score: RatingScore) -> Self {
        score.0
    }
}

/// Customer feedback on a completed order. Immutable once attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub meal_rating: RatingScore,
    pub cook_rating: RatingScore,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Formatted reference, e.g. `HB000042`.
    pub id: String,
    pub customer_id: String,
    pub listing_id: String,
    pub cook_id: String,
    pub quantity: u32,
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub delivery_type: DeliveryType,
    pub payment_method: PaymentMethod,
    pub customer_phone: String,
    pub notes: String,
    pub rating: Option<Rating>,
}

impl Order {
    pub fn can_be_rated(&self) -> bool {
        self.status == OrderStatus::Completed && self.rating.is_none()
    }

    pub fn rating_record(&self) -> Option<RatingRecord> {
        self.rating.as_ref().map(|rating| RatingRecord {
            order_id: self.id.clone(),
            customer_id: self.customer_id.clone(),
            cook_id: self.cook_id.clone(),
            listing_id: self.listing_id.clone(),
            rating: rating.clone(),
        })
    }
}

/// A rating together with the parties it concerns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub order_id: String,
    pub customer_id: String,
    pub cook_id: String,
    pub listing_id: String,
    pub rating: Rating,
}

/// Payload for creating a new order. The unit price is fixed by the listing at claim time.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub customer_id: String,
    pub listing_id: String,
    pub cook_id: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub delivery_type: DeliveryType,
    pub customer_phone: String,
    pub notes: String,
}

/// What a customer submits when placing an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrder {
    pub listing_id: String,
    pub quantity: u32,
    #[serde(default)]
    pub delivery_type: DeliveryType,
    pub customer_phone: String,
    #[serde(default)]
    pub notes: String,
}

/// Raw rating input, validated into [`Rating`] before anything is mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingSubmission {
    pub meal_rating: u8,
    pub cook_rating: u8,
    #[serde(default)]
    pub comment: String,
}

impl RatingSubmission {
    pub fn validate(self) -> Result<Rating, InvalidScore> {
        Ok(Rating {
            meal_rating: RatingScore::try_from(self.meal_rating)?,
            cook_rating: RatingScore::try_from(self.cook_rating)?,
            comment: self.comment.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strings_roundtrip() {
        assert_eq!("pending".parse::<OrderStatus>().ok(), Some(OrderStatus::Pending));
        assert_eq!("cancelled".parse::<OrderStatus>().ok(), Some(OrderStatus::Cancelled));
        assert_eq!(OrderStatus::Ready.to_string(), "ready");
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn dine_in_parses_from_snake_case() {
        assert_eq!("dine_in".parse::<DeliveryType>().ok(), Some(DeliveryType::DineIn));
        assert_eq!(
            serde_json::to_value(DeliveryType::DineIn).unwrap(),
            serde_json::json!("dine_in")
        );
        assert!(!DeliveryType::DineIn.uses_inventory());
        assert!(DeliveryType::Delivery.uses_inventory());
    }

    #[test]
    fn rating_scores_are_bounded() {
        assert!(RatingScore::try_from(0).is_err());
        assert!(RatingScore::try_from(6).is_err());
        assert_eq!(RatingScore::try_from(5).map(RatingScore::get), Ok(5));

        let bad: Result<RatingScore, _> = serde_json::from_str("9");
        assert!(bad.is_err());
    }

    #[test]
    fn submission_validation_rejects_either_score() {
        let submission = RatingSubmission {
            meal_rating: 4,
            cook_rating: 0,
            comment: "ok".into(),
        };
        assert_eq!(submission.validate(), Err(InvalidScore(0)));

        let rating = RatingSubmission {
            meal_rating: 4,
            cook_rating: 5,
            comment: "  great daal  ".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(rating.comment, "great daal");
        assert_eq!(rating.cook_rating.get(), 5);
    }
}
