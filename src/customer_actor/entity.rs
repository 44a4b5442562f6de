use super::error::CustomerError;
use crate::actor_framework::Entity;
use crate::domain::{Customer, CustomerCreate, CustomerPatch};

impl Entity for Customer {
    type Id = String;
    type CreateParams = CustomerCreate;
    type Patch = CustomerPatch;
    type Action = ();
    type ActionResult = ();
    type Error = CustomerError;
    const KIND: &'static str = "Customer";

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(id: String, params: CustomerCreate) -> Result<Self, CustomerError> {
        if params.name.trim().is_empty() {
            return Err(CustomerError::ValidationError("Name required".to_string()));
        }
        Ok(Self {
            id,
            name: params.name,
            phone: params.phone,
            office_location: params.office_location,
            office_address: params.office_address,
        })
    }

    fn on_update(&mut self, patch: CustomerPatch) -> Result<(), CustomerError> {
        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(CustomerError::ValidationError("Name required".to_string()));
            }
            self.name = name;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(location) = patch.office_location {
            self.office_location = location;
        }
        if let Some(address) = patch.office_address {
            self.office_address = address;
        }
        Ok(())
    }

    /// Customers have no custom actions.
    fn handle_action(&mut self, _action: ()) -> Result<(), CustomerError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Location;

    #[test]
    fn office_location_can_be_cleared() {
        let mut customer = Customer::from_create_params(
            "customer_1".into(),
            CustomerCreate {
                name: "Sara".into(),
                phone: "0321-2222222".into(),
                office_location: Some(Location::new(31.5, 74.3).unwrap()),
                office_address: String::new(),
            },
        )
        .unwrap();

        customer
            .on_update(CustomerPatch {
                office_location: Some(None),
                ..CustomerPatch::default()
            })
            .unwrap();
        assert_eq!(customer.office_location, None);

        let blank = CustomerPatch {
            name: Some("  ".into()),
            ..CustomerPatch::default()
        };
        assert!(customer.on_update(blank).is_err());
        assert_eq!(customer.name, "Sara");
    }

    #[test]
    fn out_of_range_office_location_is_rejected() {
        let registration: Result<CustomerCreate, _> = serde_json::from_value(serde_json::json!({
            "name": "Sara",
            "phone": "0321-2222222",
            "office_location": {"lat": 91.0, "lng": 0.0},
        }));
        assert!(registration.is_err());

        let patch: Result<CustomerPatch, _> = serde_json::from_value(serde_json::json!({
            "office_location": {"lat": 360.0, "lng": 0.0},
        }));
        assert!(patch.is_err());
    }
}
