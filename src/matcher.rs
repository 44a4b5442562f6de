//! Proximity matching: filters orderable listings around a customer and ranks them.
//!
//! A linear scan recomputed on every call; there is no spatial index or cache.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{round_km, serialize_with_availability, Listing, Location};

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
pub enum SortKey {
    /// Nearest first; listings without a distance go last.
    #[default]
    Distance,
    PriceLow,
    PriceHigh,
    /// Cook's aggregate rating, best first.
    Rating,
}

/// An orderable listing joined with the cook data needed to rank it.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub listing: Listing,
    pub cook_name: String,
    pub cook_rating: Decimal,
    /// Where the meal is collected from: the cook's kitchen.
    pub location: Option<Location>,
}

#[derive(Debug, Clone, Default)]
pub struct MatchCriteria {
    /// Customer position; `None` skips distance filtering entirely.
    pub origin: Option<Location>,
    pub radius_km: f64,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub search: Option<String>,
    pub dine_in_only: bool,
    pub sort: SortKey,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyListing {
    #[serde(serialize_with = "serialize_with_availability")]
    pub listing: Listing,
    pub cook_name: String,
    pub cook_rating: Decimal,
    /// Unrounded; `None` when either side has no location.
    pub distance_km: Option<f64>,
}

impl NearbyListing {
    pub fn display_distance_km(&self) -> Option<f64> {
        self.distance_km.map(round_km)
    }
}

/// Filters `candidates` by text, price, dine-in and radius, then sorts by `criteria.sort`.
///
/// Sorting is stable: equal keys keep the candidates' input order.
pub fn rank(candidates: Vec<Candidate>, criteria: &MatchCriteria) -> Vec<NearbyListing> {
    let needle = criteria
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    let mut matches: Vec<NearbyListing> = candidates
        .into_iter()
        .filter(|c| match &needle {
            Some(needle) => {
                c.listing.matches_text(needle) || c.cook_name.to_lowercase().contains(needle.as_str())
            }
            None => true,
        })
        .filter(|c| criteria.min_price.map_or(true, |min| c.listing.price >= min))
        .filter(|c| criteria.max_price.map_or(true, |max| c.listing.price <= max))
        .filter(|c| !criteria.dine_in_only || c.listing.dine_in_available)
        .filter_map(|c| {
            let distance_km = match (criteria.origin, c.location) {
                (Some(origin), Some(kitchen)) => Some(origin.distance_km(&kitchen)),
                _ => None,
            };
            if distance_km.is_some_and(|d| d > criteria.radius_km) {
                return None;
            }
            Some(NearbyListing {
                listing: c.listing,
                cook_name: c.cook_name,
                cook_rating: c.cook_rating,
                distance_km,
            })
        })
        .collect();

    match criteria.sort {
        SortKey::Distance => matches.sort_by(|a, b| by_distance(a.distance_km, b.distance_km)),
        SortKey::PriceLow => matches.sort_by(|a, b| a.listing.price.cmp(&b.listing.price)),
        SortKey::PriceHigh => matches.sort_by(|a, b| b.listing.price.cmp(&a.listing.price)),
        SortKey::Rating => matches.sort_by(|a, b| b.cook_rating.cmp(&a.cook_rating)),
    }
    matches
}

fn by_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
