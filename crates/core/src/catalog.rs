//! Menu items and the read-only catalog the storefront browses.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{MenuItemId, Price};

/// Menu categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Brochettes,
    Burgers,
    Chicken,
    Wraps,
    Fish,
    Sides,
    Beer,
    Cocktails,
    Beverages,
}

impl Category {
    /// All categories, in menu order.
    pub const ALL: [Self; 9] = [
        Self::Brochettes,
        Self::Burgers,
        Self::Chicken,
        Self::Wraps,
        Self::Fish,
        Self::Sides,
        Self::Beer,
        Self::Cocktails,
        Self::Beverages,
    ];

    /// Display label for menu tabs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Brochettes => "Brochettes",
            Self::Burgers => "Burgers",
            Self::Chicken => "Chicken",
            Self::Wraps => "Wraps",
            Self::Fish => "Fish",
            Self::Sides => "Sides & Fries",
            Self::Beer => "Bralirwa Beers",
            Self::Cocktails => "Cocktails",
            Self::Beverages => "Beverages",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slug = match self {
            Self::Brochettes => "brochettes",
            Self::Burgers => "burgers",
            Self::Chicken => "chicken",
            Self::Wraps => "wraps",
            Self::Fish => "fish",
            Self::Sides => "sides",
            Self::Beer => "beer",
            Self::Cocktails => "cocktails",
            Self::Beverages => "beverages",
        };
        write!(f, "{slug}")
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brochettes" => Ok(Self::Brochettes),
            "burgers" => Ok(Self::Burgers),
            "chicken" => Ok(Self::Chicken),
            "wraps" => Ok(Self::Wraps),
            "fish" => Ok(Self::Fish),
            "sides" => Ok(Self::Sides),
            "beer" => Ok(Self::Beer),
            "cocktails" => Ok(Self::Cocktails),
            "beverages" => Ok(Self::Beverages),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}

/// A single item on the menu.
///
/// Immutable from the storefront's point of view; only the admin console
/// creates or edits items, via [`MenuItemDraft`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Discounted price during the happy-hour window, when offered.
    /// Never above `price`; enforced when the item is created or edited.
    pub happy_hour_price: Option<Price>,
    pub image: String,
    pub category: Category,
    /// Customer rating, 0.0 to 5.0.
    pub rating: f32,
    /// Preparation-time label shown on the card, e.g. "10-15 min".
    pub prep_time: String,
    pub popular: bool,
    pub spicy: bool,
    pub available: bool,
    pub calories: Option<u32>,
    pub ingredients: Vec<String>,
    pub allergens: Vec<String>,
    /// Ingredient cost, for the admin margin view.
    pub cost: Option<Price>,
    pub sold_count: u32,
    pub last_ordered: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MenuItem {
    /// Whether `term` matches the item name or description,
    /// case-insensitively.
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
    }
}

/// Validation errors for [`MenuItemDraft`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("name is required")]
    EmptyName,
    #[error("description is required")]
    EmptyDescription,
    #[error("price must be greater than zero")]
    NonPositivePrice,
    #[error("happy hour price must be greater than zero")]
    NonPositiveHappyHourPrice,
    #[error("happy hour price cannot exceed the regular price")]
    HappyHourAbovePrice,
    #[error("rating must be between 0 and 5")]
    RatingOutOfRange,
}

/// Untrusted menu-item form input, validated into a [`MenuItem`] at the
/// boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemDraft {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub happy_hour_price: Option<Price>,
    pub image: String,
    pub category: Category,
    pub rating: f32,
    pub prep_time: String,
    pub popular: bool,
    pub spicy: bool,
    pub available: bool,
    pub calories: Option<u32>,
    pub ingredients: Vec<String>,
    pub allergens: Vec<String>,
    pub cost: Option<Price>,
}

impl MenuItemDraft {
    /// Check the draft's field constraints.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint: empty name or description,
    /// non-positive prices, a happy-hour price above the regular price, or
    /// a rating outside 0 to 5.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::EmptyName);
        }
        if self.description.trim().is_empty() {
            return Err(DraftError::EmptyDescription);
        }
        if !self.price.is_positive() {
            return Err(DraftError::NonPositivePrice);
        }
        if let Some(hh) = self.happy_hour_price {
            if !hh.is_positive() {
                return Err(DraftError::NonPositiveHappyHourPrice);
            }
            if hh > self.price {
                return Err(DraftError::HappyHourAbovePrice);
            }
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(DraftError::RatingOutOfRange);
        }
        Ok(())
    }

    /// Validate and build a new [`MenuItem`] with the given id.
    ///
    /// # Errors
    ///
    /// See [`MenuItemDraft::validate`].
    pub fn into_item(self, id: MenuItemId, now: DateTime<Utc>) -> Result<MenuItem, DraftError> {
        self.validate()?;
        Ok(MenuItem {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            happy_hour_price: self.happy_hour_price,
            image: self.image,
            category: self.category,
            rating: self.rating,
            prep_time: self.prep_time,
            popular: self.popular,
            spicy: self.spicy,
            available: self.available,
            calories: self.calories,
            ingredients: self.ingredients,
            allergens: self.allergens,
            cost: self.cost,
            sold_count: 0,
            last_ordered: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Validate and apply the draft to an existing item, preserving its
    /// identity and sales history.
    ///
    /// # Errors
    ///
    /// See [`MenuItemDraft::validate`].
    pub fn apply_to(self, item: &MenuItem, now: DateTime<Utc>) -> Result<MenuItem, DraftError> {
        self.validate()?;
        Ok(MenuItem {
            id: item.id,
            name: self.name,
            description: self.description,
            price: self.price,
            happy_hour_price: self.happy_hour_price,
            image: self.image,
            category: self.category,
            rating: self.rating,
            prep_time: self.prep_time,
            popular: self.popular,
            spicy: self.spicy,
            available: self.available,
            calories: self.calories,
            ingredients: self.ingredients,
            allergens: self.allergens,
            cost: self.cost,
            sold_count: item.sold_count,
            last_ordered: item.last_ordered,
            created_at: item.created_at,
            updated_at: now,
        })
    }
}

impl From<&MenuItem> for MenuItemDraft {
    fn from(item: &MenuItem) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
            happy_hour_price: item.happy_hour_price,
            image: item.image.clone(),
            category: item.category,
            rating: item.rating,
            prep_time: item.prep_time.clone(),
            popular: item.popular,
            spicy: item.spicy,
            available: item.available,
            calories: item.calories,
            ingredients: item.ingredients.clone(),
            allergens: item.allergens.clone(),
            cost: item.cost,
        }
    }
}

/// An ordered, read-only list of menu items.
///
/// The storefront takes a catalog snapshot at startup and only ever reads
/// from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    /// Build a catalog from an ordered list of items.
    #[must_use]
    pub const fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// Look up an item by id.
    #[must_use]
    pub fn get(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// All items, in menu order.
    pub fn iter(&self) -> impl Iterator<Item = &MenuItem> {
        self.items.iter()
    }

    /// Items in the given category, preserving menu order.
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &MenuItem> {
        self.items
            .iter()
            .filter(move |item| item.category == category)
    }

    /// Case-insensitive substring search over names and descriptions.
    pub fn search<'a>(&'a self, term: &'a str) -> impl Iterator<Item = &'a MenuItem> {
        self.items.iter().filter(move |item| item.matches_search(term))
    }

    /// The categories that actually have items, in menu order.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.items.iter().any(|item| item.category == *c))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a MenuItem;
    type IntoIter = std::slice::Iter<'a, MenuItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::seed;

    fn draft() -> MenuItemDraft {
        MenuItemDraft {
            name: "Brochettes".to_owned(),
            description: "Grilled meat skewers".to_owned(),
            price: Price::from_rwf(1000),
            happy_hour_price: None,
            image: String::new(),
            category: Category::Brochettes,
            rating: 4.8,
            prep_time: "10-15 min".to_owned(),
            popular: true,
            spicy: false,
            available: true,
            calories: None,
            ingredients: vec![],
            allergens: vec![],
            cost: None,
        }
    }

    #[test]
    fn test_draft_valid() {
        let item = draft().into_item(MenuItemId::new(1), Utc::now()).unwrap();
        assert_eq!(item.name, "Brochettes");
        assert_eq!(item.sold_count, 0);
    }

    #[test]
    fn test_draft_rejects_empty_name() {
        let mut d = draft();
        d.name = "  ".to_owned();
        assert_eq!(d.validate(), Err(DraftError::EmptyName));
    }

    #[test]
    fn test_draft_rejects_happy_hour_above_price() {
        let mut d = draft();
        d.happy_hour_price = Some(Price::from_rwf(1200));
        assert_eq!(d.validate(), Err(DraftError::HappyHourAbovePrice));
    }

    #[test]
    fn test_draft_accepts_happy_hour_at_or_below_price() {
        let mut d = draft();
        d.happy_hour_price = Some(Price::from_rwf(1000));
        assert!(d.validate().is_ok());
        d.happy_hour_price = Some(Price::from_rwf(800));
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_draft_rejects_rating_out_of_range() {
        let mut d = draft();
        d.rating = 5.1;
        assert_eq!(d.validate(), Err(DraftError::RatingOutOfRange));
    }

    #[test]
    fn test_apply_to_preserves_identity_and_history() {
        let now = Utc::now();
        let mut item = draft().into_item(MenuItemId::new(1), now).unwrap();
        item.sold_count = 42;

        let mut edit = MenuItemDraft::from(&item);
        edit.price = Price::from_rwf(1200);
        let updated = edit.apply_to(&item, Utc::now()).unwrap();

        assert_eq!(updated.id, item.id);
        assert_eq!(updated.sold_count, 42);
        assert_eq!(updated.price, Price::from_rwf(1200));
        assert_eq!(updated.created_at, item.created_at);
    }

    #[test]
    fn test_catalog_lookup_and_filter() {
        let catalog = seed::storefront_catalog();
        assert!(!catalog.is_empty());

        let first = catalog.iter().next().unwrap();
        assert_eq!(catalog.get(first.id).unwrap().id, first.id);
        assert!(catalog.get(MenuItemId::new(9999)).is_none());

        for item in catalog.in_category(Category::Beer) {
            assert_eq!(item.category, Category::Beer);
        }
    }

    #[test]
    fn test_catalog_search_is_case_insensitive() {
        let catalog = seed::storefront_catalog();
        let hits: Vec<_> = catalog.search("BROCHETTE").collect();
        assert!(!hits.is_empty());
        for hit in hits {
            assert!(hit.matches_search("brochette"));
        }
    }
}
