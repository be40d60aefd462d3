//! Text encoding of the persisted cart.
//!
//! The cart is stored as a JSON array of flat line item objects, e.g.
//! `[{"id":42,"title":"Shoe","amount":1}]`.

use crate::model::Cart;

/// Encodes a cart for storage.
pub fn encode(cart: &Cart) -> Result<String, serde_json::Error> {
    serde_json::to_string(cart)
}

/// Decodes a stored cart.
///
/// Returns None for anything that is not a well-formed cart, including
/// arrays that repeat a product.
pub fn decode(raw: &str) -> Option<Cart> {
    serde_json::from_str(raw).ok()
}

#[cfg(test)]
mod tests {
    use common::ProductId;
    use serde_json::json;

    use super::*;
    use crate::model::{LineItem, Product};

    fn sample_cart() -> Cart {
        Cart::from_items(vec![
            LineItem::new(
                Product::new(ProductId::new(3))
                    .with_attribute("title", "Tênis de Caminhada Leve Confortável")
                    .with_attribute("price", 179.9)
                    .with_attribute("image", "https://example.com/3.jpg"),
                2,
            ),
            LineItem::new(
                Product::new(ProductId::new(1)).with_attribute(
                    "tags",
                    json!({"color": "black", "sizes": [38, 39, 40]}),
                ),
                1,
            ),
        ])
        .unwrap()
    }

    #[test]
    fn round_trip_preserves_order_and_fields() {
        let cart = sample_cart();
        let decoded = decode(&encode(&cart).unwrap()).unwrap();

        assert_eq!(decoded, cart);
        let ids: Vec<u64> = decoded
            .items()
            .iter()
            .map(|i| i.product_id().get())
            .collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn empty_cart_encodes_as_empty_array() {
        assert_eq!(encode(&Cart::new()).unwrap(), "[]");
        assert_eq!(decode("[]"), Some(Cart::new()));
    }

    #[test]
    fn decodes_flat_objects() {
        let cart = decode(r#"[{"id":42,"name":"Shoe","amount":1}]"#).unwrap();
        let item = cart.get(ProductId::new(42)).unwrap();
        assert_eq!(item.amount(), 1);
        assert_eq!(item.product().attribute("name"), Some(&json!("Shoe")));
    }

    #[test]
    fn malformed_input_decodes_to_none() {
        for raw in [
            "",
            "null",
            "{}",
            "not json",
            r#"[{"id":1}]"#,
            r#"[{"id":1,"amount":-1}]"#,
            r#"[{"id":"one","amount":1}]"#,
            r#"[{"id":1,"amount":1},{"id":1,"amount":2}]"#,
        ] {
            assert_eq!(decode(raw), None, "input {raw:?}");
        }
    }
}
