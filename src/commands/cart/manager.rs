// =====================================================
// FILE: src/commands/cart/manager.rs - PERSISTED CART
// =====================================================

use crate::backend::PriceValue;
use crate::core::helpers::{parse_leading_int, slugify};
use crate::core::prelude::*;
use crate::store::{StoreHandle, CART_KEY};
use crate::view::document::Document;
use crate::view::header::{CART_COUNT, FLOATING_CART_COUNT};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One line item. Stored carts may come from older front-ends, so every
/// field is read leniently and unknown fields are carried through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub product: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub seller: Option<String>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<PriceValue>,
    #[serde(default, deserialize_with = "lenient_qty")]
    pub qty: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_price<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<PriceValue>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().map(PriceValue::Number),
        Value::String(s) => Some(PriceValue::Text(s)),
        _ => None,
    })
}

/// Integer, float or numeric string, clamped into `0..=u32::MAX`.
fn lenient_qty<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<u32>, D::Error> {
    let raw = match Value::deserialize(deserializer)? {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(i),
            None => n.as_u64().map(|_| i64::MAX).or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc().clamp(i64::MIN as f64, i64::MAX as f64) as i64)
            }),
        },
        Value::String(s) => parse_leading_int(&s),
        _ => None,
    };
    Ok(raw.map(|q| q.clamp(0, u32::MAX as i64) as u32))
}

impl CartItem {
    pub fn new(product: &str, seller: &str, price: f64) -> Self {
        Self {
            product: Some(product.to_string()),
            seller: Some(seller.to_string()),
            price: Some(PriceValue::Number(price)),
            ..Self::default()
        }
    }

    /// `prod_<product>_<seller>` with trailing underscores removed.
    pub fn derive_id(product: &str, seller: &str) -> String {
        format!("prod_{}_{}", slugify(product), slugify(seller))
            .trim_end_matches('_')
            .to_string()
    }

    /// Stored quantity; a missing or zero quantity counts as one.
    pub fn quantity(&self) -> u32 {
        self.qty.filter(|q| *q > 0).unwrap_or(1)
    }

    fn ensure_id(&mut self) {
        if non_empty(&self.id).is_none() {
            self.id = Some(Self::derive_id(
                self.product.as_deref().unwrap_or_default(),
                self.seller.as_deref().unwrap_or_default(),
            ));
        }
    }

    fn same_line(&self, other: &CartItem) -> bool {
        let same_id = matches!(
            (non_empty(&self.id), non_empty(&other.id)),
            (Some(a), Some(b)) if a == b
        );
        let same_pair = matches!(
            (non_empty(&self.product), non_empty(&other.product)),
            (Some(a), Some(b)) if a == b
        ) && self.seller == other.seller;
        same_id || same_pair
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[derive(Debug, Clone)]
pub struct CartManager {
    store: StoreHandle,
}

impl CartManager {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    fn load(&self) -> Result<Vec<CartItem>> {
        Ok(self
            .store
            .get_json::<Vec<CartItem>>(CART_KEY)?
            .unwrap_or_default())
    }

    /// Stored items in order; an unreadable cart reads as empty.
    pub fn items(&self) -> Vec<CartItem> {
        self.load().unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable cart: {}", e);
            Vec::new()
        })
    }

    /// Merges into an existing line (qty + 1) or appends a new line with qty 1.
    /// Returns the resulting line. An unreadable stored cart is left as it is
    /// and the add fails.
    pub fn add_item(&self, mut item: CartItem) -> Result<CartItem> {
        item.ensure_id();
        let mut items = self.load().map_err(|e| {
            log::error!("Not overwriting unreadable cart: {}", e);
            e
        })?;

        let line = match items.iter_mut().find(|existing| existing.same_line(&item)) {
            Some(existing) => {
                existing.qty = Some(existing.quantity().saturating_add(1));
                existing.clone()
            }
            None => {
                let line = CartItem {
                    qty: Some(1),
                    ..item
                };
                items.push(line.clone());
                line
            }
        };

        self.store.set_json(CART_KEY, &items)?;
        log::debug!(
            "Cart line {} now qty {}",
            line.id.as_deref().unwrap_or("?"),
            line.quantity()
        );
        Ok(line)
    }

    /// Sum of quantities, saturating at `u32::MAX`.
    pub fn count(&self) -> u32 {
        self.items()
            .iter()
            .fold(0u32, |total, item| total.saturating_add(item.quantity()))
    }

    pub fn refresh_badges(&self, document: &mut Document) -> u32 {
        let count = self.count();
        let text = count.to_string();
        document.set_text(CART_COUNT, &text);
        document.set_text(FLOATING_CART_COUNT, &text);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn cart() -> CartManager {
        CartManager::new(StoreHandle::new(Arc::new(MemoryStore::new())))
    }

    #[test]
    fn derived_identity() {
        assert_eq!(CartItem::derive_id("Tomato", "a@x.com"), "prod_tomato_a_x_com");
        assert_eq!(CartItem::derive_id("Green Chilli!", ""), "prod_green_chilli");
        assert_eq!(CartItem::derive_id("", ""), "prod");
    }

    #[test]
    fn same_product_and_seller_merges() {
        let cart = cart();
        cart.add_item(CartItem::new("Tomato", "a@x.com", 20.0)).unwrap();
        let line = cart.add_item(CartItem::new("Tomato", "a@x.com", 20.0)).unwrap();

        let items = cart.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].qty, Some(2));
        assert_eq!(items[0].id.as_deref(), Some("prod_tomato_a_x_com"));
        assert_eq!(line.quantity(), 2);
    }

    #[test]
    fn different_seller_appends() {
        let cart = cart();
        cart.add_item(CartItem::new("Tomato", "a@x.com", 20.0)).unwrap();
        cart.add_item(CartItem::new("Tomato", "b@x.com", 22.0)).unwrap();
        cart.add_item(CartItem::new("Onion", "a@x.com", 30.0)).unwrap();

        let products: Vec<_> = cart
            .items()
            .into_iter()
            .map(|i| (i.product.unwrap(), i.seller.unwrap()))
            .collect();
        assert_eq!(
            products,
            vec![
                ("Tomato".to_string(), "a@x.com".to_string()),
                ("Tomato".to_string(), "b@x.com".to_string()),
                ("Onion".to_string(), "a@x.com".to_string()),
            ]
        );
    }

    #[test]
    fn explicit_id_matches_existing_line() {
        let cart = cart();
        let mut first = CartItem::new("Tomato", "a@x.com", 20.0);
        first.id = Some("sku-1".into());
        cart.add_item(first).unwrap();

        let mut renamed = CartItem::new("Tomatoes", "someone-else", 20.0);
        renamed.id = Some("sku-1".into());
        cart.add_item(renamed).unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn count_is_sum_of_quantities() {
        let cart = cart();
        let adds = [
            ("Tomato", "a"),
            ("Onion", "a"),
            ("Tomato", "a"),
            ("Tomato", "b"),
            ("Tomato", "a"),
        ];
        for (product, seller) in adds {
            cart.add_item(CartItem::new(product, seller, 1.0)).unwrap();
            let sum: u32 = cart.items().iter().map(|i| i.qty.unwrap()).sum();
            assert_eq!(cart.count(), sum);
        }
        assert_eq!(cart.count(), 5);
        assert_eq!(cart.items().len(), 3);
    }

    #[test]
    fn lenient_stored_cart() {
        let store = StoreHandle::new(Arc::new(MemoryStore::new()));
        store
            .set(CART_KEY, r#"[{"product": "Paddy", "seller": "s", "qty": 0}, {"product": "Maize"}]"#)
            .unwrap();
        let cart = CartManager::new(store.clone());
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn mixed_type_line_is_kept_on_add() {
        let store = StoreHandle::new(Arc::new(MemoryStore::new()));
        store
            .set(
                CART_KEY,
                r#"[{"product":"Tomato","seller":"a","price":"20","qty":2.0,"image":"t.png"},
                    {"product":"Okra","seller":7,"price":null,"qty":"3"}]"#,
            )
            .unwrap();
        let cart = CartManager::new(store.clone());

        let items = cart.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].price, Some(PriceValue::Text("20".into())));
        assert_eq!(items[0].qty, Some(2));
        assert_eq!(items[1].seller.as_deref(), Some("7"));
        assert_eq!(items[1].qty, Some(3));

        cart.add_item(CartItem::new("Onion", "b", 30.0)).unwrap();
        let items = cart.items();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].product.as_deref(), Some("Tomato"));
        assert_eq!(cart.count(), 6);

        // unknown fields survive the rewrite
        let raw = store.get(CART_KEY).unwrap().unwrap();
        assert!(raw.contains(r#""image":"t.png""#), "{}", raw);
    }

    #[test]
    fn unreadable_cart_is_not_overwritten() {
        let store = StoreHandle::new(Arc::new(MemoryStore::new()));
        store.set(CART_KEY, "not json").unwrap();
        let cart = CartManager::new(store.clone());

        assert!(cart.items().is_empty());
        assert_eq!(cart.count(), 0);
        assert!(matches!(
            cart.add_item(CartItem::new("Paddy", "s", 1.0)),
            Err(AppError::Storage(_))
        ));
        assert_eq!(store.get(CART_KEY).unwrap().as_deref(), Some("not json"));
    }

    #[test]
    fn huge_quantities_saturate() {
        let store = StoreHandle::new(Arc::new(MemoryStore::new()));
        store
            .set(
                CART_KEY,
                r#"[{"product":"Tomato","seller":"a","qty":4294967295},
                    {"product":"Onion","seller":"a","qty":3000000000},
                    {"product":"Maize","seller":"a","qty":99999999999}]"#,
            )
            .unwrap();
        let cart = CartManager::new(store);

        assert_eq!(cart.items()[2].qty, Some(u32::MAX));
        assert_eq!(cart.count(), u32::MAX);
        let line = cart.add_item(CartItem::new("Tomato", "a", 1.0)).unwrap();
        assert_eq!(line.qty, Some(u32::MAX));
    }

    #[test]
    fn badges_follow_count() {
        let cart = cart();
        let mut doc = Document::new();
        doc.extend(crate::view::header::header_elements());
        cart.add_item(CartItem::new("Tomato", "a", 1.0)).unwrap();
        cart.add_item(CartItem::new("Tomato", "a", 1.0)).unwrap();
        assert_eq!(cart.refresh_badges(&mut doc), 2);
        assert_eq!(doc.text(CART_COUNT), Some("2"));
        assert_eq!(doc.text(FLOATING_CART_COUNT), Some("2"));
    }
}
