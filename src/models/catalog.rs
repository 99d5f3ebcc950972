//! Service and barber catalog models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

/// A service offered by the shop.
///
/// Only active services are offered in the booking flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Opaque identifier assigned by the store.
    #[serde(default)]
    pub id: String,
    /// Display name (e.g., "Haircut").
    pub name: String,
    /// Price charged for the service.
    pub price: Decimal,
    /// Whether the service can be booked.
    #[serde(default = "default_active")]
    pub active: bool,
}

/// A barber working at the shop.
///
/// Only active barbers accept bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Barber {
    /// Opaque identifier assigned by the store.
    #[serde(default)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Whether the barber accepts bookings.
    #[serde(default = "default_active")]
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_defaults_to_active() {
        let json = r#"{"name": "Haircut", "price": "50.00"}"#;
        let service: Service = serde_json::from_str(json).unwrap();
        assert!(service.active);
        assert_eq!(service.price, Decimal::new(5000, 2));
        assert!(service.id.is_empty());
    }

    #[test]
    fn test_inactive_barber_deserializes() {
        let json = r#"{"id": "barber1", "name": "Barber Jack", "active": false}"#;
        let barber: Barber = serde_json::from_str(json).unwrap();
        assert!(!barber.active);
        assert_eq!(barber.name, "Barber Jack");
    }
}
