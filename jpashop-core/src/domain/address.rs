use serde::{Deserialize, Serialize};

/// Postal address, embedded in members and deliveries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub street: String,
    pub zipcode: String,
}

impl Address {
    pub fn new(
        city: impl Into<String>,
        street: impl Into<String>,
        zipcode: impl Into<String>,
    ) -> Self {
        Self {
            city: city.into(),
            street: street.into(),
            zipcode: zipcode.into(),
        }
    }

    /// Rebuild an address from its three nullable columns.
    ///
    /// All three NULL means no address was stored.
    pub fn from_columns(
        city: Option<String>,
        street: Option<String>,
        zipcode: Option<String>,
    ) -> Option<Self> {
        if city.is_none() && street.is_none() && zipcode.is_none() {
            return None;
        }
        Some(Self {
            city: city.unwrap_or_default(),
            street: street.unwrap_or_default(),
            zipcode: zipcode.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_columns_mean_no_address() {
        assert_eq!(Address::from_columns(None, None, None), None);

        let address = Address::from_columns(Some("Seoul".into()), None, Some("123-123".into()));
        assert_eq!(address, Some(Address::new("Seoul", "", "123-123")));
    }
}
