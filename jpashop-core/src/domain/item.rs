use serde::{Deserialize, Serialize};

use crate::error::{Result, ShopError};
use crate::validation::{required_text, Count, Price, ValidationError};

/// Kind-specific columns of an item
///
/// All kinds share the `item` table; `dtype` tells them apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "dtype")]
pub enum ItemKind {
    #[serde(rename = "B")]
    Book {
        author: Option<String>,
        isbn: Option<String>,
    },
    #[serde(rename = "A")]
    Album {
        artist: Option<String>,
        etc: Option<String>,
    },
    #[serde(rename = "M")]
    Movie {
        director: Option<String>,
        actor: Option<String>,
    },
}

impl ItemKind {
    /// Value stored in the `dtype` column
    pub fn discriminator(&self) -> &'static str {
        match self {
            Self::Book { .. } => "B",
            Self::Album { .. } => "A",
            Self::Movie { .. } => "M",
        }
    }

    /// Rebuild the kind from `dtype` and the nullable kind columns.
    pub fn from_columns(dtype: &str, columns: KindColumns) -> std::result::Result<Self, ValidationError> {
        match dtype {
            "B" => Ok(Self::Book {
                author: columns.author,
                isbn: columns.isbn,
            }),
            "A" => Ok(Self::Album {
                artist: columns.artist,
                etc: columns.etc,
            }),
            "M" => Ok(Self::Movie {
                director: columns.director,
                actor: columns.actor,
            }),
            other => Err(ValidationError::InvalidVariant {
                field: "dtype",
                value: other.to_owned(),
            }),
        }
    }

    /// Flatten into the nullable kind columns; columns of other kinds stay None.
    pub fn to_columns(&self) -> KindColumns {
        let mut columns = KindColumns::default();
        match self {
            Self::Book { author, isbn } => {
                columns.author = author.clone();
                columns.isbn = isbn.clone();
            }
            Self::Album { artist, etc } => {
                columns.artist = artist.clone();
                columns.etc = etc.clone();
            }
            Self::Movie { director, actor } => {
                columns.director = director.clone();
                columns.actor = actor.clone();
            }
        }
        columns
    }
}

/// The kind-specific nullable columns of the `item` table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindColumns {
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub artist: Option<String>,
    pub etc: Option<String>,
    pub director: Option<String>,
    pub actor: Option<String>,
}

/// A product in the catalogue
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub price: i32,
    pub stock_quantity: i32,
    #[serde(flatten)]
    pub kind: ItemKind,
}

/// Validated fields for creating or updating an item
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub name: String,
    pub price: Price,
    pub stock_quantity: i32,
    pub kind: ItemKind,
}

impl ItemDraft {
    pub fn new(
        name: &str,
        price: Price,
        stock_quantity: i32,
        kind: ItemKind,
    ) -> std::result::Result<Self, ValidationError> {
        let name = required_text("item name", name)?;
        if stock_quantity < 0 {
            return Err(ValidationError::TooSmall {
                field: "stockQuantity",
                min: 0,
            });
        }

        Ok(Self {
            name,
            price,
            stock_quantity,
            kind,
        })
    }
}

impl Item {
    /// Put `quantity` units back into stock.
    ///
    /// Fails without touching the stock when the total would not fit the
    /// `stock_quantity` column.
    pub fn add_stock(&mut self, quantity: Count) -> Result<()> {
        let added = quantity.get();
        self.stock_quantity = self
            .stock_quantity
            .checked_add(added)
            .ok_or(ShopError::StockOverflow {
                added,
                available: self.stock_quantity,
            })?;
        Ok(())
    }

    /// Take `quantity` units out of stock.
    ///
    /// Fails without touching the stock when fewer than `quantity`
    /// units are available.
    pub fn remove_stock(&mut self, quantity: Count) -> Result<()> {
        let requested = quantity.get();
        if requested > self.stock_quantity {
            return Err(ShopError::NotEnoughStock {
                requested,
                available: self.stock_quantity,
            });
        }

        self.stock_quantity -= requested;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(stock: i32) -> Item {
        Item {
            id: 1,
            name: "JPA".into(),
            price: 10000,
            stock_quantity: stock,
            kind: ItemKind::Book {
                author: Some("kim".into()),
                isbn: Some("1234".into()),
            },
        }
    }

    fn count(n: i32) -> Count {
        Count::new(n).unwrap()
    }

    #[test]
    fn remove_stock_decreases() {
        let mut item = book(10);
        item.remove_stock(count(3)).unwrap();
        assert_eq!(item.stock_quantity, 7);
    }

    #[test]
    fn remove_all_stock_is_allowed() {
        let mut item = book(10);
        item.remove_stock(count(10)).unwrap();
        assert_eq!(item.stock_quantity, 0);
    }

    #[test]
    fn remove_stock_beyond_supply_fails_and_keeps_stock() {
        let mut item = book(10);
        let err = item.remove_stock(count(11)).unwrap_err();
        assert!(matches!(
            err,
            ShopError::NotEnoughStock {
                requested: 11,
                available: 10
            }
        ));
        assert_eq!(item.stock_quantity, 10);
    }

    #[test]
    fn add_stock_increases() {
        let mut item = book(10);
        item.add_stock(count(5)).unwrap();
        assert_eq!(item.stock_quantity, 15);
    }

    #[test]
    fn add_stock_past_column_range_fails_and_keeps_stock() {
        let mut item = book(i32::MAX);
        let err = item.add_stock(count(1)).unwrap_err();
        assert!(matches!(
            err,
            ShopError::StockOverflow {
                added: 1,
                available: i32::MAX
            }
        ));
        assert_eq!(item.stock_quantity, i32::MAX);
    }

    #[test]
    fn draft_rejects_negative_stock() {
        let kind = ItemKind::Album {
            artist: None,
            etc: None,
        };
        let err = ItemDraft::new("album", Price::new(1).unwrap(), -1, kind).unwrap_err();
        assert!(matches!(err, ValidationError::TooSmall { min: 0, .. }));
    }

    #[test]
    fn kind_columns_round_trip() {
        let kind = ItemKind::Movie {
            director: Some("bong".into()),
            actor: None,
        };
        let columns = kind.to_columns();
        assert!(columns.author.is_none());
        assert_eq!(ItemKind::from_columns("M", columns).unwrap(), kind);
        assert!(ItemKind::from_columns("X", KindColumns::default()).is_err());
    }

    #[test]
    fn serializes_with_discriminator() {
        let json = serde_json::to_value(book(5)).unwrap();
        assert_eq!(json["dtype"], "B");
        assert_eq!(json["stockQuantity"], 5);
        assert_eq!(json["author"], "kim");
    }
}
