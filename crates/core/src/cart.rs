//! The cart aggregate: lines with locked-in prices and derived totals.
//!
//! A cart belongs to exactly one browsing session. It is created empty,
//! mutated by [`Cart::add_item`]/[`Cart::remove_item`], and discarded at
//! checkout; nothing here persists.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::MenuItem;
use crate::pricing::effective_price;
use crate::types::{DiningOption, MenuItemId, Price};

/// One menu item's aggregated quantity and locked unit price.
///
/// The unit price is captured when the line is first created and never
/// recomputed, even if the happy-hour window opens or closes while the
/// cart is held open. `happy_hour_applied` records whether the captured
/// price was a happy-hour price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: MenuItemId,
    pub name: String,
    pub image: String,
    pub unit_price: Price,
    pub happy_hour_applied: bool,
    pub quantity: u32,
}

impl CartLine {
    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price * self.quantity
    }
}

/// Derived cart totals for display and checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Price,
    /// Flat fee, present only for takeout orders.
    pub delivery_fee: Price,
    /// Tax on the subtotal only (the fee is not taxed), rounded half-up
    /// to whole francs.
    pub tax: Price,
    pub total: Price,
}

/// A session's shopping cart.
///
/// Holds at most one line per menu item; repeated adds increment the
/// quantity rather than creating a second line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The cart lines, in first-add order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of `item` to the cart.
    ///
    /// An existing line keeps its locked-in unit price; a new line
    /// captures the current effective price and whether it was a
    /// happy-hour price.
    pub fn add_item(&mut self, item: &MenuItem, happy_hour_active: bool) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item.id) {
            line.quantity += 1;
            return;
        }

        self.lines.push(CartLine {
            item_id: item.id,
            name: item.name.clone(),
            image: item.image.clone(),
            unit_price: effective_price(item, happy_hour_active),
            happy_hour_applied: happy_hour_active && item.happy_hour_price.is_some(),
            quantity: 1,
        });
    }

    /// Remove one unit of the given item; the line disappears when its
    /// quantity reaches zero. Removing an item that is not in the cart is
    /// a no-op, not an error.
    pub fn remove_item(&mut self, item_id: MenuItemId) {
        let Some(pos) = self.lines.iter().position(|l| l.item_id == item_id) else {
            return;
        };
        if let Some(line) = self.lines.get_mut(pos) {
            if line.quantity > 1 {
                line.quantity -= 1;
            } else {
                self.lines.remove(pos);
            }
        }
    }

    /// Quantity of the given item, 0 if absent.
    #[must_use]
    pub fn quantity_of(&self, item_id: MenuItemId) -> u32 {
        self.lines
            .iter()
            .find(|l| l.item_id == item_id)
            .map_or(0, |l| l.quantity)
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of `unit_price * quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Compute the full totals for the given dining option.
    ///
    /// `total = subtotal + (delivery_fee iff takeout) + round(subtotal * tax_rate)`.
    #[must_use]
    pub fn totals(
        &self,
        dining_option: DiningOption,
        delivery_fee: Price,
        tax_rate: Decimal,
    ) -> CartTotals {
        let subtotal = self.subtotal();
        let delivery_fee = match dining_option {
            DiningOption::Takeout => delivery_fee,
            DiningOption::DineIn => Price::ZERO,
        };
        let tax = subtotal.tax_at(tax_rate);
        CartTotals {
            subtotal,
            delivery_fee,
            tax,
            total: subtotal + delivery_fee + tax,
        }
    }

    /// Empty the cart (checkout or session end).
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::catalog::{Category, MenuItem};

    fn item(id: i32, price: i64, happy_hour_price: Option<i64>) -> MenuItem {
        let now = Utc::now();
        MenuItem {
            id: MenuItemId::new(id),
            name: format!("Item {id}"),
            description: "test item".to_owned(),
            price: Price::from_rwf(price),
            happy_hour_price: happy_hour_price.map(Price::from_rwf),
            image: String::new(),
            category: Category::Beer,
            rating: 4.0,
            prep_time: "1 min".to_owned(),
            popular: false,
            spicy: false,
            available: true,
            calories: None,
            ingredients: vec![],
            allergens: vec![],
            cost: None,
            sold_count: 0,
            last_ordered: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn tax_rate() -> Decimal {
        Decimal::new(18, 2) // 0.18
    }

    #[test]
    fn test_add_twice_during_happy_hour() {
        // Spec scenario: price 1500, happy hour 1200, two adds.
        let a = item(1, 1500, Some(1200));
        let mut cart = Cart::new();
        cart.add_item(&a, true);
        cart.add_item(&a, true);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.quantity_of(a.id), 2);
        let line = cart.lines().first().unwrap();
        assert_eq!(line.unit_price, Price::from_rwf(1200));
        assert!(line.happy_hour_applied);
        assert_eq!(cart.subtotal(), Price::from_rwf(2400));
    }

    #[test]
    fn test_locked_price_survives_window_flip() {
        let a = item(1, 1500, Some(1200));
        let mut cart = Cart::new();
        cart.add_item(&a, true);
        // Window closes while the cart is held open; the line keeps its
        // first-add price.
        cart.add_item(&a, false);
        cart.add_item(&a, false);

        let line = cart.lines().first().unwrap();
        assert_eq!(line.quantity, 3);
        assert_eq!(line.unit_price, Price::from_rwf(1200));
        assert!(line.happy_hour_applied);
    }

    #[test]
    fn test_add_outside_window_uses_base_price() {
        let a = item(1, 1500, Some(1200));
        let mut cart = Cart::new();
        cart.add_item(&a, false);

        let line = cart.lines().first().unwrap();
        assert_eq!(line.unit_price, Price::from_rwf(1500));
        assert!(!line.happy_hour_applied);
    }

    #[test]
    fn test_add_remove_round_trip() {
        let a = item(1, 1000, None);
        let b = item(2, 2500, None);
        let mut cart = Cart::new();
        cart.add_item(&a, false);
        let snapshot = cart.clone();

        cart.add_item(&b, false);
        cart.add_item(&b, true);
        cart.remove_item(b.id);
        cart.remove_item(b.id);

        assert_eq!(cart, snapshot);
    }

    #[test]
    fn test_remove_decrements_then_deletes() {
        let a = item(1, 1000, None);
        let mut cart = Cart::new();
        cart.add_item(&a, false);
        cart.add_item(&a, false);

        cart.remove_item(a.id);
        assert_eq!(cart.quantity_of(a.id), 1);
        cart.remove_item(a.id);
        assert_eq!(cart.quantity_of(a.id), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_from_empty_cart_is_noop() {
        let mut cart = Cart::new();
        cart.remove_item(MenuItemId::new(99));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_of_absent_item_is_zero() {
        let cart = Cart::new();
        assert_eq!(cart.quantity_of(MenuItemId::new(1)), 0);
    }

    #[test]
    fn test_subtotal_over_mixed_lines() {
        let a = item(1, 1000, None);
        let b = item(2, 2500, None);
        let mut cart = Cart::new();
        cart.add_item(&a, false);
        cart.add_item(&a, false);
        cart.add_item(&b, false);

        assert_eq!(cart.subtotal(), Price::from_rwf(4500));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_dinein_total_has_no_delivery_fee() {
        // Spec scenario: subtotal 10000, fee 2000, rate 0.18, dine-in.
        let a = item(1, 10000, None);
        let mut cart = Cart::new();
        cart.add_item(&a, false);

        let totals = cart.totals(DiningOption::DineIn, Price::from_rwf(2000), tax_rate());
        assert_eq!(totals.subtotal, Price::from_rwf(10000));
        assert_eq!(totals.delivery_fee, Price::ZERO);
        assert_eq!(totals.tax, Price::from_rwf(1800));
        assert_eq!(totals.total, Price::from_rwf(11800));
    }

    #[test]
    fn test_takeout_total_has_exactly_one_fee() {
        let a = item(1, 1000, None);
        let b = item(2, 2500, None);
        let mut cart = Cart::new();
        cart.add_item(&a, false);

        let fee = Price::from_rwf(2000);
        let one_line = cart.totals(DiningOption::Takeout, fee, tax_rate());
        assert_eq!(one_line.delivery_fee, fee);

        // The fee does not scale with cart size.
        cart.add_item(&a, false);
        cart.add_item(&b, false);
        let three_units = cart.totals(DiningOption::Takeout, fee, tax_rate());
        assert_eq!(three_units.delivery_fee, fee);
        assert_eq!(
            three_units.total,
            three_units.subtotal + fee + three_units.tax
        );
    }

    #[test]
    fn test_fee_is_not_taxed() {
        let a = item(1, 10000, None);
        let mut cart = Cart::new();
        cart.add_item(&a, false);

        let takeout = cart.totals(DiningOption::Takeout, Price::from_rwf(2000), tax_rate());
        let dinein = cart.totals(DiningOption::DineIn, Price::from_rwf(2000), tax_rate());
        // Same subtotal, same tax; only the flat fee differs.
        assert_eq!(takeout.tax, dinein.tax);
        assert_eq!(takeout.total, dinein.total + Price::from_rwf(2000));
    }

    #[test]
    fn test_tax_rounds_half_up_on_odd_subtotal() {
        // 1225 * 0.18 = 220.5 -> 221
        let a = item(1, 1225, None);
        let mut cart = Cart::new();
        cart.add_item(&a, false);

        let totals = cart.totals(DiningOption::DineIn, Price::ZERO, tax_rate());
        assert_eq!(totals.tax, Price::from_rwf(221));
    }

    #[test]
    fn test_clear_discards_all_lines() {
        let a = item(1, 1000, None);
        let mut cart = Cart::new();
        cart.add_item(&a, false);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Price::ZERO);
    }

    #[test]
    fn test_cart_serializes_for_session_storage() {
        let a = item(1, 1500, Some(1200));
        let mut cart = Cart::new();
        cart.add_item(&a, true);

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }
}
