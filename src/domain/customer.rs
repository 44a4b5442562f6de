use serde::{Deserialize, Serialize};

use super::Location;

/// A registered customer, typically an office worker ordering lunch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub office_location: Option<Location>,
    pub office_address: String,
}

/// Payload for creating a new customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerCreate {
    pub name: String,
    pub phone: String,
    pub office_location: Option<Location>,
    #[serde(default)]
    pub office_address: String,
}

/// Payload for updating an existing customer.
///
/// `office_location: Some(None)` clears the stored location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub office_location: Option<Option<Location>>,
    pub office_address: Option<String>,
}
