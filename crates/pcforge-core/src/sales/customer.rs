//! Customers a build can be sold to.

use serde::{Deserialize, Serialize};

use crate::error::{PcForgeError, Result};
use crate::ids::CustomerId;

/// A customer record as the order needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl Customer {
    /// Create a new customer.
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: CustomerId::generate(),
            name: name.into(),
            phone: phone.into(),
            email: None,
            city: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Name and phone are required to take an order.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PcForgeError::ValidationError(
                "customer name is required".to_string(),
            ));
        }
        if self.phone.trim().is_empty() {
            return Err(PcForgeError::ValidationError(
                "customer phone is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_validation() {
        Customer::new("Ivan Petrov", "+7 999 123-45-67").validate().unwrap();
        assert!(Customer::new("", "+7 999").validate().is_err());
        assert!(Customer::new("Anna", " ").validate().is_err());
    }

    #[test]
    fn test_builder() {
        let c = Customer::new("Anna", "+7 999 234-56-78")
            .with_city("Saint Petersburg")
            .with_email("anna@example.com");
        assert_eq!(c.city.as_deref(), Some("Saint Petersburg"));
        assert_eq!(c.email.as_deref(), Some("anna@example.com"));
    }
}
