use serde::{Deserialize, Serialize};

/// The party performing an operation, carrying the profile it acts through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Role {
    Cook { cook_id: String },
    Customer { customer_id: String },
    Admin,
}

impl Role {
    pub fn cook(cook_id: impl Into<String>) -> Self {
        Self::Cook {
            cook_id: cook_id.into(),
        }
    }

    pub fn customer(customer_id: impl Into<String>) -> Self {
        Self::Customer {
            customer_id: customer_id.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// True for the given cook, or for an admin.
    pub fn acts_for_cook(&self, cook_id: &str) -> bool {
        match self {
            Self::Cook { cook_id: own } => own == cook_id,
            Self::Admin => true,
            Self::Customer { .. } => false,
        }
    }

    /// True for the given customer, or for an admin.
    pub fn acts_for_customer(&self, customer_id: &str) -> bool {
        match self {
            Self::Customer { customer_id: own } => own == customer_id,
            Self::Admin => true,
            Self::Cook { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_acts_for_everyone() {
        assert!(Role::Admin.acts_for_cook("cook_1"));
        assert!(Role::Admin.acts_for_customer("customer_1"));
    }

    #[test]
    fn profiles_only_act_for_themselves() {
        let cook = Role::cook("cook_1");
        assert!(cook.acts_for_cook("cook_1"));
        assert!(!cook.acts_for_cook("cook_2"));
        assert!(!cook.acts_for_customer("cook_1"));

        let customer = Role::customer("customer_1");
        assert!(customer.acts_for_customer("customer_1"));
        assert!(!customer.acts_for_cook("customer_1"));
    }

    #[test]
    fn serializes_as_tagged_union() {
        let json = serde_json::to_value(Role::cook("cook_7")).unwrap();
        assert_eq!(json, serde_json::json!({ "role": "cook", "cook_id": "cook_7" }));
    }
}
