//! Row mappers shared by the repositories
//!
//! Every query aliases its columns with the names read here. The
//! `*_columns!` macros expand to the matching select lists so they can be
//! spliced into SQL with `concat!`.

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use jpashop_core::domain::KindColumns;
use jpashop_core::{
    Address, Delivery, DeliveryStatus, Item, ItemKind, Member, Order, OrderItem, OrderStatus,
};

/// Select list for `member m`
macro_rules! member_columns {
    () => {
        "m.member_id, m.name AS member_name, m.city AS member_city, \
         m.street AS member_street, m.zipcode AS member_zipcode"
    };
}

/// Select list for `delivery d`
macro_rules! delivery_columns {
    () => {
        "d.delivery_id, d.city AS delivery_city, d.street AS delivery_street, \
         d.zipcode AS delivery_zipcode, d.status AS delivery_status"
    };
}

/// Select list for `item i`
macro_rules! item_columns {
    () => {
        "i.item_id, i.dtype AS item_dtype, i.name AS item_name, i.price AS item_price, \
         i.stock_quantity AS item_stock_quantity, i.author AS item_author, i.isbn AS item_isbn, \
         i.artist AS item_artist, i.etc AS item_etc, i.director AS item_director, \
         i.actor AS item_actor"
    };
}

/// Orders joined to their member and delivery, without a trailing clause
macro_rules! order_header_select {
    () => {
        concat!(
            "SELECT o.order_id, o.order_date, o.status AS order_status, ",
            member_columns!(),
            ", ",
            delivery_columns!(),
            " FROM orders o",
            " JOIN member m ON m.member_id = o.member_id",
            " JOIN delivery d ON d.delivery_id = o.delivery_id"
        )
    };
}

fn decode_err<E>(e: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::Decode(Box::new(e))
}

pub(crate) fn address(row: &SqliteRow, prefix: &str) -> Result<Option<Address>, sqlx::Error> {
    Ok(Address::from_columns(
        row.try_get(format!("{prefix}_city").as_str())?,
        row.try_get(format!("{prefix}_street").as_str())?,
        row.try_get(format!("{prefix}_zipcode").as_str())?,
    ))
}

/// `member_id, member_name, member_city, member_street, member_zipcode`
pub(crate) fn member(row: &SqliteRow) -> Result<Member, sqlx::Error> {
    Ok(Member {
        id: row.try_get("member_id")?,
        name: row.try_get("member_name")?,
        address: address(row, "member")?,
    })
}

/// `delivery_id, delivery_city, delivery_street, delivery_zipcode, delivery_status`
pub(crate) fn delivery(row: &SqliteRow) -> Result<Delivery, sqlx::Error> {
    let status: String = row.try_get("delivery_status")?;
    Ok(Delivery {
        id: row.try_get("delivery_id")?,
        address: address(row, "delivery")?,
        status: status.parse::<DeliveryStatus>().map_err(decode_err)?,
    })
}

/// `item_id, item_dtype, item_name, item_price, item_stock_quantity` plus
/// the six kind columns prefixed with `item_`
pub(crate) fn item(row: &SqliteRow) -> Result<Item, sqlx::Error> {
    let dtype: String = row.try_get("item_dtype")?;
    let columns = KindColumns {
        author: row.try_get("item_author")?,
        isbn: row.try_get("item_isbn")?,
        artist: row.try_get("item_artist")?,
        etc: row.try_get("item_etc")?,
        director: row.try_get("item_director")?,
        actor: row.try_get("item_actor")?,
    };

    Ok(Item {
        id: row.try_get("item_id")?,
        name: row.try_get("item_name")?,
        price: row.try_get("item_price")?,
        stock_quantity: row.try_get("item_stock_quantity")?,
        kind: ItemKind::from_columns(&dtype, columns).map_err(decode_err)?,
    })
}

/// `order_status`
pub(crate) fn order_status(row: &SqliteRow) -> Result<OrderStatus, sqlx::Error> {
    let status: String = row.try_get("order_status")?;
    status.parse::<OrderStatus>().map_err(decode_err)
}

/// Columns of `order_header_select!`. The order comes back with no lines.
pub(crate) fn order_header(row: &SqliteRow) -> Result<Order, sqlx::Error> {
    Ok(Order {
        id: row.try_get("order_id")?,
        member: member(row)?,
        order_items: Vec::new(),
        delivery: delivery(row)?,
        order_date: row.try_get("order_date")?,
        status: order_status(row)?,
    })
}

/// `order_item_id, order_price, count` plus `item_columns!`
pub(crate) fn order_item(row: &SqliteRow) -> Result<OrderItem, sqlx::Error> {
    Ok(OrderItem {
        id: row.try_get("order_item_id")?,
        item: item(row)?,
        order_price: row.try_get("order_price")?,
        count: row.try_get("count")?,
    })
}
