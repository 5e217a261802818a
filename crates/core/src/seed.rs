//! Mock data the system boots from.
//!
//! There is no persistence layer anywhere: the storefront takes a catalog
//! snapshot from here at startup, and the admin console seeds its
//! in-memory store from here. Values mirror the house menu.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Category, MenuItem};
use crate::order::{Order, OrderLine};
use crate::settings::RestaurantSettings;
use crate::staff::StaffAccount;
use crate::types::{DiningOption, Email, MenuItemId, OrderId, OrderStatus, Price, StaffRole};

/// Placeholder image path served from the static directory.
pub const PLACEHOLDER_IMAGE: &str = "/static/img/placeholder.svg";

/// Fixed timestamp for seed records (2024-01-01T00:00:00Z).
#[must_use]
pub fn seed_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_704_067_200, 0).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

fn item(
    id: i32,
    name: &str,
    description: &str,
    price: i64,
    category: Category,
    rating: f32,
    prep_time: &str,
) -> MenuItem {
    let now = seed_time();
    MenuItem {
        id: MenuItemId::new(id),
        name: name.to_owned(),
        description: description.to_owned(),
        price: Price::from_rwf(price),
        happy_hour_price: None,
        image: PLACEHOLDER_IMAGE.to_owned(),
        category,
        rating,
        prep_time: prep_time.to_owned(),
        popular: false,
        spicy: false,
        available: true,
        calories: None,
        ingredients: Vec::new(),
        allergens: Vec::new(),
        cost: None,
        sold_count: 0,
        last_ordered: None,
        created_at: now,
        updated_at: now,
    }
}

/// The full seed menu, in menu order.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn menu_items() -> Vec<MenuItem> {
    let mut items = vec![
        {
            let mut i = item(
                1,
                "Brochettes",
                "Traditional grilled meat skewers with spices and vegetables",
                1000,
                Category::Brochettes,
                4.8,
                "10-15 min",
            );
            i.popular = true;
            i
        },
        {
            let mut i = item(
                2,
                "Double-Beef Brochette",
                "Double portion of tender beef brochettes with special seasoning",
                2000,
                Category::Brochettes,
                4.9,
                "12-18 min",
            );
            i.popular = true;
            i
        },
        item(
            3,
            "Pork Brochettes",
            "Juicy pork skewers marinated in local spices",
            7000,
            Category::Brochettes,
            4.7,
            "15-20 min",
        ),
        {
            let mut i = item(
                4,
                "Loaded Fries",
                "Crispy fries topped with cheese, bacon bits, and special street sauce",
                2500,
                Category::Sides,
                4.6,
                "8-12 min",
            );
            i.popular = true;
            i.ingredients = vec![
                "Potatoes".to_owned(),
                "Cheese".to_owned(),
                "Bacon".to_owned(),
                "Special Sauce".to_owned(),
            ];
            i.allergens = vec!["Dairy".to_owned()];
            i.calories = Some(580);
            i
        },
        item(
            5,
            "Street Fries",
            "Classic crispy fries with salt and pepper",
            1500,
            Category::Sides,
            4.4,
            "5-8 min",
        ),
        {
            let mut i = item(
                6,
                "DK Special Burger",
                "Double beef patty, cheese, lettuce, tomato, special sauce on brioche bun",
                8500,
                Category::Burgers,
                4.8,
                "8-12 min",
            );
            i.popular = true;
            i.ingredients = vec![
                "Double Beef Patty".to_owned(),
                "Cheese".to_owned(),
                "Lettuce".to_owned(),
                "Tomato".to_owned(),
                "Brioche Bun".to_owned(),
                "Special Sauce".to_owned(),
            ];
            i.allergens = vec!["Gluten".to_owned(), "Dairy".to_owned()];
            i.calories = Some(720);
            i.cost = Some(Price::from_rwf(4000));
            i.sold_count = 156;
            i.last_ordered = NaiveDate::from_ymd_opt(2024, 1, 20);
            i
        },
        item(
            7,
            "Chicken Burger",
            "Grilled chicken breast with lettuce, tomato, and mayo",
            6500,
            Category::Burgers,
            4.5,
            "10-15 min",
        ),
        {
            let mut i = item(
                8,
                "Mutzig Beer",
                "Ice-cold Mutzig beer - Rwanda's favorite",
                1500,
                Category::Beer,
                4.3,
                "1 min",
            );
            i.happy_hour_price = Some(Price::from_rwf(1200));
            i
        },
        {
            let mut i = item(
                9,
                "Primus Beer",
                "Fresh Primus beer served ice-cold",
                1500,
                Category::Beer,
                4.2,
                "1 min",
            );
            i.happy_hour_price = Some(Price::from_rwf(1200));
            i
        },
        {
            let mut i = item(
                10,
                "Turbo King",
                "Strong beer for those who want extra kick",
                2000,
                Category::Beer,
                4.4,
                "1 min",
            );
            i.happy_hour_price = Some(Price::from_rwf(1600));
            i
        },
        {
            let mut i = item(
                11,
                "DK Signature Cocktail",
                "House special mix with premium spirits and fresh fruits",
                8000,
                Category::Cocktails,
                4.9,
                "3-5 min",
            );
            i.happy_hour_price = Some(Price::from_rwf(6000));
            i.popular = true;
            i.calories = Some(220);
            i.cost = Some(Price::from_rwf(3500));
            i.sold_count = 78;
            i.last_ordered = NaiveDate::from_ymd_opt(2024, 1, 18);
            i
        },
        {
            let mut i = item(
                12,
                "Street Mojito",
                "Fresh mint, lime, rum, and soda water with a street twist",
                7000,
                Category::Cocktails,
                4.6,
                "3-5 min",
            );
            i.happy_hour_price = Some(Price::from_rwf(5500));
            i
        },
        {
            let mut i = item(
                13,
                "Crispy Chicken Wings",
                "6 pieces of crispy wings with choice of sauce: BBQ, Buffalo, or Honey Garlic",
                6500,
                Category::Chicken,
                4.7,
                "10-15 min",
            );
            i.spicy = true;
            i.ingredients = vec![
                "Chicken Wings".to_owned(),
                "Sauce".to_owned(),
                "Spices".to_owned(),
            ];
            i.allergens = vec!["Soy".to_owned()];
            i.calories = Some(480);
            i.cost = Some(Price::from_rwf(3000));
            i.sold_count = 89;
            i.last_ordered = NaiveDate::from_ymd_opt(2024, 1, 19);
            i
        },
    ];
    items.sort_by_key(|i| i.id);
    items
}

/// Catalog snapshot the storefront reads at load time.
#[must_use]
pub fn storefront_catalog() -> Catalog {
    Catalog::new(menu_items())
}

/// A gallery entry on the home page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryImage {
    pub src: String,
    pub alt: String,
    pub title: String,
}

/// Home-page gallery entries.
#[must_use]
pub fn gallery() -> Vec<GalleryImage> {
    [
        ("Delicious brochettes on the grill", "Fresh Brochettes"),
        ("Loaded fries with toppings", "Loaded Fries"),
        ("Restaurant interior with street vibe", "Our Atmosphere"),
        ("Cold Bralirwa beers", "Ice Cold Beers"),
        ("DK Special Burger", "Signature Burgers"),
        ("Cocktails and drinks", "Craft Cocktails"),
        ("Street food preparation", "Fresh Preparation"),
        ("Happy customers enjoying food", "Happy Customers"),
    ]
    .into_iter()
    .map(|(alt, title)| GalleryImage {
        src: PLACEHOLDER_IMAGE.to_owned(),
        alt: alt.to_owned(),
        title: title.to_owned(),
    })
    .collect()
}

/// Seed orders for the admin console.
#[must_use]
pub fn orders() -> Vec<Order> {
    let now = seed_time();
    vec![
        Order {
            id: OrderId::from_seq(1),
            customer_name: "John Doe".to_owned(),
            customer_phone: "+250788123456".to_owned(),
            customer_email: Email::parse("john@example.com").ok(),
            customer_address: Some("KG 123 St, Kigali".to_owned()),
            lines: vec![
                OrderLine {
                    item_id: MenuItemId::new(6),
                    name: "DK Special Burger".to_owned(),
                    quantity: 2,
                    unit_price: Price::from_rwf(8500),
                    notes: Some("No onions".to_owned()),
                },
                OrderLine {
                    item_id: MenuItemId::new(4),
                    name: "Loaded Fries".to_owned(),
                    quantity: 1,
                    unit_price: Price::from_rwf(2500),
                    notes: None,
                },
            ],
            total: Price::from_rwf(21500),
            status: OrderStatus::Preparing,
            dining_option: DiningOption::DineIn,
            placed_at: now,
            estimated_time: Some("15 min".to_owned()),
            payment_method: Some("Cash".to_owned()),
            payment_status: Some("Paid".to_owned()),
            table_number: Some("T-05".to_owned()),
            notes: Some("Customer prefers well-done burger".to_owned()),
            created_at: now,
            updated_at: now,
        },
        Order {
            id: OrderId::from_seq(2),
            customer_name: "Jane Smith".to_owned(),
            customer_phone: "+250788654321".to_owned(),
            customer_email: Email::parse("jane@example.com").ok(),
            customer_address: Some("KG 456 St, Kigali".to_owned()),
            lines: vec![
                OrderLine {
                    item_id: MenuItemId::new(11),
                    name: "DK Signature Cocktail".to_owned(),
                    quantity: 2,
                    unit_price: Price::from_rwf(6000),
                    notes: None,
                },
                OrderLine {
                    item_id: MenuItemId::new(13),
                    name: "Crispy Chicken Wings".to_owned(),
                    quantity: 1,
                    unit_price: Price::from_rwf(6500),
                    notes: Some("Extra spicy".to_owned()),
                },
            ],
            total: Price::from_rwf(18500),
            status: OrderStatus::Ready,
            dining_option: DiningOption::Takeout,
            placed_at: now,
            estimated_time: Some("10 min".to_owned()),
            payment_method: Some("Mobile Money".to_owned()),
            payment_status: Some("Paid".to_owned()),
            table_number: None,
            notes: Some("Call when ready for pickup".to_owned()),
            created_at: now,
            updated_at: now,
        },
    ]
}

/// Seed staff accounts for the admin console.
#[must_use]
pub fn staff_accounts() -> Vec<StaffAccount> {
    let now = seed_time();
    vec![
        StaffAccount {
            username: "diane".to_owned(),
            password: "12345678910".to_owned(),
            email: "diane@masorokitchen.rw".to_owned(),
            phone: "+250782292053".to_owned(),
            security_question: "What is the name of your first restaurant?".to_owned(),
            security_answer: "masoro kitchen".to_owned(),
            role: StaffRole::Admin,
            is_active: true,
            first_name: Some("Kayitesi".to_owned()),
            last_name: Some("Diane".to_owned()),
            last_login: None,
            created_at: now,
            updated_at: now,
        },
        StaffAccount {
            username: "manager1".to_owned(),
            password: "manager123".to_owned(),
            email: "manager@masorokitchen.rw".to_owned(),
            phone: "+250788999888".to_owned(),
            security_question: "What is your favorite food?".to_owned(),
            security_answer: "burger".to_owned(),
            role: StaffRole::Manager,
            is_active: true,
            first_name: Some("John".to_owned()),
            last_name: Some("Manager".to_owned()),
            last_login: None,
            created_at: now,
            updated_at: now,
        },
    ]
}

/// Default restaurant settings.
#[must_use]
pub fn settings() -> RestaurantSettings {
    RestaurantSettings {
        name: "Masoro Kitchen".to_owned(),
        description: "We bring the vibrant taste of street food to the heart of Kigali. \
                      From sizzling brochettes to crispy fries, fast, flavorful, and fresh."
            .to_owned(),
        address: "349W+2C8, Kigali Masoro".to_owned(),
        phone: "+250782292053".to_owned(),
        email: "info@masorokitchen.rw".to_owned(),
        website: Some("https://masorokitchen.rw".to_owned()),
        opening_hours: crate::settings::OpeningHours::default(),
        happy_hour: crate::settings::HappyHourConfig::default(),
        delivery: crate::settings::DeliveryConfig::default(),
        tax: crate::settings::TaxConfig::default(),
        currency: "RWF".to_owned(),
        timezone: "Africa/Kigali".to_owned(),
        social: crate::settings::SocialLinks {
            facebook: Some("https://facebook.com/masorokitchen".to_owned()),
            instagram: Some("https://instagram.com/masorokitchen".to_owned()),
            twitter: None,
            whatsapp: Some("+250782292053".to_owned()),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_ids_are_unique() {
        let items = menu_items();
        let mut ids: Vec<_> = items.iter().map(|i| i.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), items.len());
    }

    #[test]
    fn test_seed_items_pass_boundary_validation() {
        for item in menu_items() {
            let draft = crate::catalog::MenuItemDraft::from(&item);
            assert!(draft.validate().is_ok(), "seed item {} invalid", item.name);
        }
    }

    #[test]
    fn test_seed_orders_reference_seed_items() {
        let catalog = storefront_catalog();
        for order in orders() {
            for line in &order.lines {
                assert!(
                    catalog.get(line.item_id).is_some(),
                    "order {} references unknown item {}",
                    order.id,
                    line.item_id
                );
            }
        }
    }

    #[test]
    fn test_staff_usernames_are_unique() {
        let staff = staff_accounts();
        let mut names: Vec<_> = staff.iter().map(|s| s.username.clone()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), staff.len());
    }

    #[test]
    fn test_settings_defaults() {
        let s = settings();
        assert_eq!(s.currency, "RWF");
        assert_eq!(s.delivery.fee, Price::from_rwf(2000));
        assert!(s.happy_hour.enabled);
    }
}
