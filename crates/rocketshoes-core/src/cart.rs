//! # Cart
//!
//! The ordered, id-unique list of line items.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Mutations                                       │
//! │                                                                         │
//! │  CartStore operation           Cart method          Effect              │
//! │  ───────────────────           ───────────          ──────              │
//! │                                                                         │
//! │  add_product (new id) ───────► insert(item) ──────► items.push(item)    │
//! │                                                                         │
//! │  add_product (known id) ─┐                                              │
//! │  update_product_amount ──┴───► set_amount(id, n) ─► items[i].amount = n │
//! │                                                                         │
//! │  remove_product ─────────────► remove(id) ────────► items.remove(i)     │
//! │                                                                         │
//! │  Every method either applies its whole change or returns an error      │
//! │  and leaves the cart untouched.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Format
//! The cart serializes as a bare JSON array of [`CartItem`]s, the same
//! format existing browser carts were stored in.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartItem, ProductId};
use crate::validation::{is_valid_amount, validate_amount};

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `id`
/// - Every item has `amount ≥ 1`
/// - Insertion order is preserved
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from items, enforcing the invariants.
    pub fn from_items(items: Vec<CartItem>) -> CoreResult<Self> {
        let mut cart = Cart::new();
        for item in items {
            cart.insert(item)?;
        }
        Ok(cart)
    }

    /// Decodes a persisted snapshot.
    ///
    /// Fails on malformed JSON and on snapshots that break the invariants
    /// (duplicate ids, amounts below one).
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let items: Vec<CartItem> = serde_json::from_str(json)?;
        Cart::from_items(items)
    }

    /// Decodes a persisted snapshot, keeping every line that fits the
    /// invariants.
    ///
    /// Returns the cart and the dropped lines: amounts below one and any
    /// repeat of an id after its first line. Fails only on malformed JSON.
    pub fn restore(json: &str) -> CoreResult<(Self, Vec<CartItem>)> {
        let items: Vec<CartItem> = serde_json::from_str(json)?;

        let mut cart = Cart::new();
        let mut dropped = Vec::new();
        for item in items {
            if is_valid_amount(item.amount) && !cart.contains(item.id) {
                cart.items.push(item);
            } else {
                dropped.push(item);
            }
        }
        Ok((cart, dropped))
    }

    /// Encodes the cart as a snapshot.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(&self.items)?)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Iterates over the items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, CartItem> {
        self.items.iter()
    }

    /// Finds the line for `id`.
    pub fn find(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Checks if `id` has a line in the cart.
    pub fn contains(&self, id: ProductId) -> bool {
        self.find(id).is_some()
    }

    /// Returns the amount of `id` in the cart, 0 when absent.
    pub fn amount_of(&self, id: ProductId) -> i32 {
        self.find(id).map_or(0, |item| item.amount)
    }

    /// Returns the number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the total units across all lines.
    pub fn total_amount(&self) -> i64 {
        self.items.iter().map(|item| i64::from(item.amount)).sum()
    }

    /// Calculates the subtotal of all lines.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Appends a new line.
    ///
    /// ## Errors
    /// - `DuplicateItem` if the product already has a line
    /// - `Validation` if the amount is below one
    pub fn insert(&mut self, item: CartItem) -> CoreResult<()> {
        validate_amount(item.amount)?;

        if self.contains(item.id) {
            return Err(CoreError::DuplicateItem(item.id));
        }

        self.items.push(item);
        Ok(())
    }

    /// Sets the amount of an existing line.
    ///
    /// ## Errors
    /// - `Validation` if `amount` is below one
    /// - `NotInCart` if the product has no line
    pub fn set_amount(&mut self, id: ProductId, amount: i32) -> CoreResult<()> {
        validate_amount(amount)?;

        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(CoreError::NotInCart(id))?;

        item.amount = amount;
        Ok(())
    }

    /// Removes the first line matching `id` and returns it.
    pub fn remove(&mut self, id: ProductId) -> CoreResult<CartItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(CoreError::NotInCart(id))?;

        Ok(self.items.remove(index))
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals summary for the header badge and the cart page footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Distinct products (the header badge).
    pub item_count: usize,

    /// Units across all lines.
    pub total_amount: i64,

    /// Sum of line totals, in cents.
    pub subtotal_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.len(),
            total_amount: cart.total_amount(),
            subtotal_cents: cart.subtotal().cents(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: ProductId, price: f64, amount: i32) -> CartItem {
        CartItem {
            id,
            title: format!("Tênis {}", id),
            price,
            image: format!("https://example.com/tenis{}.jpg", id),
            amount,
        }
    }

    #[test]
    fn test_insert_and_find() {
        let mut cart = Cart::new();
        cart.insert(item(1, 179.9, 1)).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.amount_of(1), 1);
        assert_eq!(cart.amount_of(2), 0);
    }

    #[test]
    fn test_insert_duplicate_rejected() {
        let mut cart = Cart::new();
        cart.insert(item(1, 179.9, 1)).unwrap();

        let err = cart.insert(item(1, 179.9, 1)).unwrap_err();
        assert_eq!(err, CoreError::DuplicateItem(1));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_insert_zero_amount_rejected() {
        let mut cart = Cart::new();
        assert!(cart.insert(item(1, 179.9, 0)).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_amount() {
        let mut cart = Cart::new();
        cart.insert(item(1, 179.9, 1)).unwrap();

        cart.set_amount(1, 4).unwrap();
        assert_eq!(cart.amount_of(1), 4);

        assert_eq!(cart.set_amount(2, 4).unwrap_err(), CoreError::NotInCart(2));
        assert!(cart.set_amount(1, 0).is_err());
        assert_eq!(cart.amount_of(1), 4);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut cart = Cart::new();
        cart.insert(item(1, 10.0, 1)).unwrap();
        cart.insert(item(2, 20.0, 1)).unwrap();
        cart.insert(item(3, 30.0, 1)).unwrap();

        let removed = cart.remove(2).unwrap();
        assert_eq!(removed.id, 2);

        let ids: Vec<_> = cart.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_remove_missing_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        cart.insert(item(1, 10.0, 2)).unwrap();
        let before = cart.clone();

        assert_eq!(cart.remove(9).unwrap_err(), CoreError::NotInCart(9));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.insert(item(1, 179.9, 2)).unwrap();
        cart.insert(item(2, 139.9, 1)).unwrap();

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_amount, 3);
        assert_eq!(totals.subtotal_cents, 35980 + 13990);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut cart = Cart::new();
        cart.insert(item(1, 179.9, 2)).unwrap();
        cart.insert(item(5, 99.9, 1)).unwrap();

        let json = cart.to_json().unwrap();
        assert!(json.starts_with('['));

        let restored = Cart::from_json(&json).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_snapshot_with_duplicates_rejected() {
        let json = r#"[
            {"id":1,"title":"A","price":1.0,"image":"a","amount":1},
            {"id":1,"title":"A","price":1.0,"image":"a","amount":2}
        ]"#;
        assert_eq!(Cart::from_json(json).unwrap_err(), CoreError::DuplicateItem(1));
    }

    #[test]
    fn test_snapshot_garbage_rejected() {
        assert!(matches!(
            Cart::from_json("{not json"),
            Err(CoreError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn test_restore_drops_only_bad_lines() {
        let json = r#"[
            {"id":1,"title":"A","price":1.0,"image":"a","amount":2},
            {"id":2,"title":"B","price":2.0,"image":"b","amount":0},
            {"id":1,"title":"A","price":1.0,"image":"a","amount":5},
            {"id":3,"title":"C","price":3.0,"image":"c","amount":1}
        ]"#;

        let (cart, dropped) = Cart::restore(json).unwrap();

        let ids: Vec<_> = cart.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(cart.amount_of(1), 2);
        assert_eq!(dropped.len(), 2);
        assert!(Cart::restore("{not json").is_err());
    }
}
