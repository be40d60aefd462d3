//! Cart data model.
//!
//! Every type here is a plain value. `Cart` never changes after
//! construction; mutations build a new cart from the old one.

use common::ProductId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names owned by the cart and never stored as product attributes.
const RESERVED_FIELDS: [&str; 2] = ["id", "amount"];

/// Product metadata as returned by the catalog.
///
/// Besides the id, a product carries arbitrary attributes (title, price,
/// image, ...). The cart does not interpret them but preserves them
/// through persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,

    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl Product {
    /// Creates a product with no attributes.
    pub fn new(id: ProductId) -> Self {
        Self {
            id,
            attributes: Map::new(),
        }
    }

    /// Creates a product from an id and an attribute map.
    ///
    /// `id` and `amount` keys are dropped from the map.
    pub fn from_parts(id: ProductId, attributes: Map<String, Value>) -> Self {
        Self { id, attributes }.strip_reserved()
    }

    /// Adds an attribute. Reserved keys are ignored.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if !RESERVED_FIELDS.contains(&key.as_str()) {
            self.attributes.insert(key, value.into());
        }
        self
    }

    /// Returns the product ID.
    pub fn id(&self) -> ProductId {
        self.id
    }

    /// Returns an attribute by name.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Returns all attributes.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    fn strip_reserved(mut self) -> Self {
        for field in RESERVED_FIELDS {
            self.attributes.remove(field);
        }
        self
    }
}

/// One product's entry in the cart together with its quantity.
///
/// Serialized flat: the product fields and `amount` are siblings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(flatten)]
    product: Product,

    amount: u32,
}

impl LineItem {
    /// Creates a line item.
    pub fn new(product: Product, amount: u32) -> Self {
        Self {
            product: product.strip_reserved(),
            amount,
        }
    }

    /// Returns the product ID.
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Returns the product metadata.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Returns the quantity.
    pub fn amount(&self) -> u32 {
        self.amount
    }

    /// Returns a copy with a different quantity.
    pub fn with_amount(&self, amount: u32) -> Self {
        Self {
            product: self.product.clone(),
            amount,
        }
    }
}

/// Available quantity for a product at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub amount: u32,
}

impl Stock {
    /// Creates a stock reading with `amount` units available.
    pub fn new(amount: u32) -> Self {
        Self { amount }
    }
}

/// Error returned when building a cart from items that repeat a product.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Duplicate line item for product {0}")]
pub struct DuplicateLineItem(pub ProductId);

/// Ordered sequence of line items, at most one per product.
///
/// Items keep insertion order: new products are appended, updated products
/// keep their position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<LineItem>", try_from = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from items, rejecting repeated product ids.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, DuplicateLineItem> {
        for (index, item) in items.iter().enumerate() {
            let id = item.product_id();
            if items[..index].iter().any(|other| other.product_id() == id) {
                return Err(DuplicateLineItem(id));
            }
        }
        Ok(Self { items })
    }

    /// Returns the items in order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns the item for a product.
    pub fn get(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.product_id() == product_id)
    }

    /// Returns true if the cart holds the product.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Returns the number of line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the sum of all quantities.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.amount)).sum()
    }

    /// Returns a cart with `item` in place of the item for the same product,
    /// or with `item` appended if the product is new.
    pub fn with_item(&self, item: LineItem) -> Self {
        let mut items = self.items.clone();
        match items
            .iter_mut()
            .find(|existing| existing.product_id() == item.product_id())
        {
            Some(existing) => *existing = item,
            None => items.push(item),
        }
        Self { items }
    }

    /// Returns a cart without the product, or None if it is absent.
    pub fn without(&self, product_id: ProductId) -> Option<Self> {
        if !self.contains(product_id) {
            return None;
        }
        let items = self
            .items
            .iter()
            .filter(|item| item.product_id() != product_id)
            .cloned()
            .collect();
        Some(Self { items })
    }

    /// Returns a cart with the product's quantity replaced, or None if the
    /// product is absent.
    pub fn with_amount(&self, product_id: ProductId, amount: u32) -> Option<Self> {
        let item = self.get(product_id)?.with_amount(amount);
        Some(self.with_item(item))
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = DuplicateLineItem;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        Self::from_items(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shoe(id: u64) -> Product {
        Product::new(ProductId::new(id)).with_attribute("title", format!("Shoe {id}"))
    }

    fn cart_of(items: &[(u64, u32)]) -> Cart {
        Cart::from_items(
            items
                .iter()
                .map(|&(id, amount)| LineItem::new(shoe(id), amount))
                .collect(),
        )
        .unwrap()
    }

    fn ids(cart: &Cart) -> Vec<u64> {
        cart.items().iter().map(|i| i.product_id().get()).collect()
    }

    #[test]
    fn product_drops_reserved_attributes() {
        let mut attributes = Map::new();
        attributes.insert("title".into(), json!("Shoe"));
        attributes.insert("amount".into(), json!(9));
        attributes.insert("id".into(), json!(99));

        let product = Product::from_parts(ProductId::new(42), attributes)
            .with_attribute("amount", 3)
            .with_attribute("price", 139.9);

        assert_eq!(product.id(), ProductId::new(42));
        assert_eq!(product.attribute("title"), Some(&json!("Shoe")));
        assert_eq!(product.attribute("price"), Some(&json!(139.9)));
        assert_eq!(product.attribute("amount"), None);
        assert_eq!(product.attribute("id"), None);
    }

    #[test]
    fn product_deserialized_with_amount_loses_it_in_line_item() {
        let product: Product =
            serde_json::from_value(json!({"id": 1, "title": "Shoe", "amount": 5})).unwrap();
        assert_eq!(product.attribute("amount"), Some(&json!(5)));

        let item = LineItem::new(product, 1);
        assert_eq!(item.product().attribute("amount"), None);
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"id": 1, "title": "Shoe", "amount": 1})
        );
    }

    #[test]
    fn line_item_serializes_flat() {
        let product = Product::new(ProductId::new(42)).with_attribute("name", "Shoe");
        let item = LineItem::new(product, 1);
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"id": 42, "name": "Shoe", "amount": 1})
        );
    }

    #[test]
    fn line_item_deserializes_flat() {
        let item: LineItem =
            serde_json::from_value(json!({"id": 7, "title": "Boot", "amount": 2})).unwrap();
        assert_eq!(item.product_id(), ProductId::new(7));
        assert_eq!(item.amount(), 2);
        assert_eq!(item.product().attribute("title"), Some(&json!("Boot")));
        assert_eq!(item.product().attribute("amount"), None);
    }

    #[test]
    fn from_items_rejects_duplicates() {
        let items = vec![
            LineItem::new(shoe(1), 1),
            LineItem::new(shoe(2), 1),
            LineItem::new(shoe(1), 3),
        ];
        assert_eq!(
            Cart::from_items(items),
            Err(DuplicateLineItem(ProductId::new(1)))
        );
        assert_eq!(
            DuplicateLineItem(ProductId::new(1)).to_string(),
            "Duplicate line item for product 1"
        );
    }

    #[test]
    fn with_item_appends_new_products() {
        let cart = cart_of(&[(1, 1), (2, 1)]);
        let next = cart.with_item(LineItem::new(shoe(3), 1));

        assert_eq!(ids(&next), vec![1, 2, 3]);
        assert_eq!(ids(&cart), vec![1, 2]);
    }

    #[test]
    fn with_item_replaces_in_place() {
        let cart = cart_of(&[(1, 1), (2, 1), (3, 1)]);
        let next = cart.with_item(LineItem::new(shoe(2), 5));

        assert_eq!(ids(&next), vec![1, 2, 3]);
        assert_eq!(next.get(ProductId::new(2)).unwrap().amount(), 5);
        assert_eq!(cart.get(ProductId::new(2)).unwrap().amount(), 1);
    }

    #[test]
    fn without_removes_only_the_target() {
        let cart = cart_of(&[(1, 1), (2, 2), (3, 3)]);
        let next = cart.without(ProductId::new(2)).unwrap();

        assert_eq!(ids(&next), vec![1, 3]);
        assert_eq!(cart.len(), 3);
        assert!(cart.without(ProductId::new(9)).is_none());
    }

    #[test]
    fn with_amount_requires_presence() {
        let cart = cart_of(&[(7, 2)]);

        let next = cart.with_amount(ProductId::new(7), 3).unwrap();
        assert_eq!(next.get(ProductId::new(7)).unwrap().amount(), 3);
        assert!(cart.with_amount(ProductId::new(8), 3).is_none());
    }

    #[test]
    fn total_quantity_sums_amounts() {
        assert_eq!(cart_of(&[(1, 2), (2, 3)]).total_quantity(), 5);
        assert_eq!(Cart::new().total_quantity(), 0);
        assert!(Cart::new().is_empty());
    }

    #[test]
    fn cart_deserialization_rejects_duplicates() {
        let result: Result<Cart, _> = serde_json::from_value(json!([
            {"id": 1, "amount": 1},
            {"id": 1, "amount": 2}
        ]));
        assert!(result.is_err());
    }
}
