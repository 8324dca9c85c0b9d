use jpashop_core::{Address, Count, Delivery, Item, ItemKind, Member, Order, OrderItem, Price};
use proptest::prelude::*;

fn book(stock: i32) -> Item {
    Item {
        id: 1,
        name: "JPA".into(),
        price: 100,
        stock_quantity: stock,
        kind: ItemKind::Book {
            author: None,
            isbn: None,
        },
    }
}

#[derive(Debug, Clone)]
enum StockOp {
    Add(i32),
    Remove(i32),
}

fn arb_op() -> impl Strategy<Value = StockOp> {
    prop_oneof![
        (1..1_000i32).prop_map(StockOp::Add),
        (1..1_000i32).prop_map(StockOp::Remove),
    ]
}

proptest! {
    /// Property: stock never goes negative, and a failed removal changes nothing
    #[test]
    fn prop_stock_never_negative(
        initial in 0..1_000i32,
        ops in prop::collection::vec(arb_op(), 0..50),
    ) {
        let mut item = book(initial);

        for op in ops {
            let before = item.stock_quantity;
            match op {
                StockOp::Add(n) => {
                    item.add_stock(Count::new(n).unwrap()).unwrap();
                    prop_assert_eq!(item.stock_quantity, before + n);
                }
                StockOp::Remove(n) => match item.remove_stock(Count::new(n).unwrap()) {
                    Ok(()) => prop_assert_eq!(item.stock_quantity, before - n),
                    Err(_) => {
                        prop_assert!(n > before);
                        prop_assert_eq!(item.stock_quantity, before);
                    }
                },
            }
            prop_assert!(item.stock_quantity >= 0);
        }
    }

    /// Property: ordering then cancelling leaves stock where it started
    #[test]
    fn prop_cancel_restores_stock(stock in 1..500i32, count in 1..500i32) {
        prop_assume!(count <= stock);

        let member = Member {
            id: 1,
            name: "kim".into(),
            address: Some(Address::new("Seoul", "river", "123")),
        };
        let line = OrderItem::create(
            book(stock),
            Price::new(100).unwrap(),
            Count::new(count).unwrap(),
        )
        .unwrap();
        prop_assert_eq!(line.item.stock_quantity, stock - count);

        let delivery = Delivery::new(member.address.clone());
        let mut order = Order::create(member, delivery, vec![line]);
        order.cancel().unwrap();

        prop_assert_eq!(order.order_items[0].item.stock_quantity, stock);
    }

    /// Property: adding stock either fits in i32 or fails and changes nothing
    #[test]
    fn prop_add_stock_never_wraps(initial in (i32::MAX - 1_000)..=i32::MAX, n in 1..2_000i32) {
        let mut item = book(initial);
        match item.add_stock(Count::new(n).unwrap()) {
            Ok(()) => prop_assert_eq!(i64::from(item.stock_quantity), i64::from(initial) + i64::from(n)),
            Err(_) => {
                prop_assert!(i64::from(initial) + i64::from(n) > i64::from(i32::MAX));
                prop_assert_eq!(item.stock_quantity, initial);
            }
        }
    }
}
