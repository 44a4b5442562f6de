//! Great-circle distance between two points on the earth.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mean earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point in decimal degrees, always within range.
///
/// Deserialization goes through [`Location::new`], so stored profiles can
/// never hold out-of-range or NaN coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLocation", into = "RawLocation")]
pub struct Location {
    lat: f64,
    lng: f64,
}

/// Wire shape of a [`Location`] before validation.
#[derive(Serialize, Deserialize)]
struct RawLocation {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawLocation> for Location {
    type Error = InvalidLocation;

    fn try_from(raw: RawLocation) -> Result<Self, Self::Error> {
        Location::new(raw.lat, raw.lng)
    }
}

impl From<Location> for RawLocation {
    fn from(location: Location) -> Self {
        Self {
            lat: location.lat,
            lng: location.lng,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid coordinates: lat {lat}, lng {lng}")]
pub struct InvalidLocation {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    /// Builds a location, rejecting non-finite or out-of-range coordinates.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidLocation> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        if valid {
            Ok(Self { lat, lng })
        } else {
            Err(InvalidLocation { lat, lng })
        }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Haversine distance to `other` in kilometers, unrounded.
    pub fn distance_km(&self, other: &Location) -> f64 {
        haversine_km(*self, *other)
    }
}

/// Haversine great-circle distance in kilometers.
///
/// Keeps full precision; round with [`round_km`] only for display.
pub fn haversine_km(a: Location, b: Location) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = lat2 - lat1;
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    // min() guards asin against h creeping past 1.0 for antipodal points
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Rounds a distance to two decimals for display.
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}
