use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::{Location, RatingScore};

/// Running totals for a cook, updated incrementally by order completion and
/// rating submission.
///
/// Ratings are kept as a raw integer sum and count, so the exposed average is
/// always the exact mean of every recorded score, rounded once for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookAggregate {
    rating_sum: u64,
    total_ratings: u32,
    total_orders: u32,
}

impl CookAggregate {
    pub fn record_completed_order(&mut self) {
        self.total_orders += 1;
    }

    pub fn record_rating(&mut self, score: RatingScore) {
        self.rating_sum += u64::from(score.get());
        self.total_ratings += 1;
    }

    /// Average cook rating to one decimal place, `0.0` before the first rating.
    pub fn rating(&self) -> Decimal {
        average(self.rating_sum, self.total_ratings)
    }

    pub fn total_ratings(&self) -> u32 {
        self.total_ratings
    }

    pub fn total_orders(&self) -> u32 {
        self.total_orders
    }
}

/// Mean of `count` scores summing to `sum`, rounded half-up to one decimal.
pub fn average(sum: u64, count: u32) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(sum) / Decimal::from(count))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// A home cook's profile together with its aggregate counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cook {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub kitchen_location: Option<Location>,
    pub kitchen_address: String,
    pub bio: String,
    /// Cook accounts require admin approval before their meals can be ordered.
    pub is_approved: bool,
    pub is_active: bool,
    pub aggregate: CookAggregate,
}

impl Cook {
    pub fn is_available(&self) -> bool {
        self.is_approved && self.is_active
    }

    pub fn rating(&self) -> Decimal {
        self.aggregate.rating()
    }
}

/// Payload for registering a cook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookCreate {
    pub name: String,
    pub phone: String,
    pub kitchen_location: Option<Location>,
    #[serde(default)]
    pub kitchen_address: String,
    #[serde(default)]
    pub bio: String,
}

/// Payload for a cook editing their own profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CookPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub kitchen_location: Option<Location>,
    pub kitchen_address: Option<String>,
    pub bio: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(n: u8) -> RatingScore {
        RatingScore::try_from(n).unwrap()
    }

    #[test]
    fn unrated_cook_shows_zero() {
        let aggregate = CookAggregate::default();
        assert_eq!(aggregate.rating(), Decimal::ZERO);
        assert_eq!(aggregate.total_ratings(), 0);
    }

    #[test]
    fn running_mean_rounds_half_up() {
        let mut aggregate = CookAggregate::default();
        for n in [5, 4, 4] {
            aggregate.record_rating(score(n));
        }
        // 13 / 3 = 4.333..
        assert_eq!(aggregate.rating(), Decimal::new(43, 1));

        aggregate.record_rating(score(4));
        // 17 / 4 = 4.25
        assert_eq!(aggregate.rating(), Decimal::new(43, 1));
        assert_eq!(aggregate.total_ratings(), 4);
    }

    #[test]
    fn no_drift_against_full_recomputation() {
        let scores: Vec<u8> = (0..1_000).map(|i| (i * 7 % 5 + 1) as u8).collect();
        let mut aggregate = CookAggregate::default();
        for &n in &scores {
            aggregate.record_rating(score(n));
        }
        let sum: u64 = scores.iter().map(|&n| u64::from(n)).sum();
        assert_eq!(aggregate.rating(), average(sum, scores.len() as u32));
        assert_eq!(aggregate.rating(), Decimal::new(30, 1));
    }

    #[test]
    fn completed_orders_count_independently_of_ratings() {
        let mut aggregate = CookAggregate::default();
        aggregate.record_completed_order();
        aggregate.record_completed_order();
        assert_eq!(aggregate.total_orders(), 2);
        assert_eq!(aggregate.total_ratings(), 0);
    }
}
