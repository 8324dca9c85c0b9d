use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Address, UNSAVED_ID};
use crate::validation::ValidationError;

/// Shipping state of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeliveryStatus {
    Ready,
    Comp,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "READY",
            Self::Comp => "COMP",
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "READY" => Ok(Self::Ready),
            "COMP" => Ok(Self::Comp),
            other => Err(ValidationError::InvalidVariant {
                field: "delivery status",
                value: other.to_owned(),
            }),
        }
    }
}

/// Delivery of exactly one order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Delivery {
    pub id: i64,
    pub address: Option<Address>,
    pub status: DeliveryStatus,
}

impl Delivery {
    /// A new delivery, ready to ship to `address`.
    pub fn new(address: Option<Address>) -> Self {
        Self {
            id: UNSAVED_ID,
            address,
            status: DeliveryStatus::Ready,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == DeliveryStatus::Comp
    }

    pub fn complete(&mut self) {
        self.status = DeliveryStatus::Comp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_text() {
        for status in [DeliveryStatus::Ready, DeliveryStatus::Comp] {
            assert_eq!(status.as_str().parse::<DeliveryStatus>().unwrap(), status);
        }
        assert!("SHIPPED".parse::<DeliveryStatus>().is_err());
    }

    #[test]
    fn new_delivery_is_ready() {
        let mut delivery = Delivery::new(None);
        assert!(!delivery.is_completed());
        delivery.complete();
        assert!(delivery.is_completed());
    }
}
