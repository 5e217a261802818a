//! Seed data validation.
//!
//! Re-validates the built-in seed data against the same domain rules the
//! admin console enforces, so drift in the seed module is caught before it
//! ships.

use std::collections::HashSet;

use tracing::{error, info};

use masoro_core::{MenuItemDraft, seed, types::Email};

/// Validate the seed data.
///
/// # Errors
///
/// Returns an error naming the number of problems found.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut problems: Vec<String> = Vec::new();

    check_menu(&mut problems);
    check_staff(&mut problems);
    check_settings(&mut problems);

    if problems.is_empty() {
        info!("Seed data is valid");
        return Ok(());
    }

    error!("Seed data validation failed:");
    for problem in &problems {
        error!("  - {problem}");
    }
    Err(format!("{} validation errors found", problems.len()).into())
}

fn check_menu(problems: &mut Vec<String>) {
    let items = seed::menu_items();
    info!(items = items.len(), "Checking menu items");

    let mut seen_ids = HashSet::new();
    for item in &items {
        if !seen_ids.insert(item.id) {
            problems.push(format!("duplicate menu item id {}", item.id));
        }
        if let Err(e) = MenuItemDraft::from(item).validate() {
            problems.push(format!("menu item '{}': {e}", item.name));
        }
        if let Some(happy) = item.happy_hour_price {
            if happy >= item.price {
                problems.push(format!(
                    "menu item '{}': happy hour price {} is not below {}",
                    item.name, happy, item.price
                ));
            }
        }
    }
}

fn check_staff(problems: &mut Vec<String>) {
    let accounts = seed::staff_accounts();
    info!(accounts = accounts.len(), "Checking staff accounts");

    let mut seen_usernames = HashSet::new();
    for account in &accounts {
        if !seen_usernames.insert(account.username.clone()) {
            problems.push(format!("duplicate staff username '{}'", account.username));
        }
        if let Err(e) = Email::parse(&account.email) {
            problems.push(format!("staff '{}': {e}", account.username));
        }
    }

    if !accounts.iter().any(|a| a.is_active) {
        problems.push("no active staff account in seed data".to_owned());
    }
}

fn check_settings(problems: &mut Vec<String>) {
    let settings = seed::settings();
    info!("Checking restaurant settings");

    if settings.happy_hour.start >= settings.happy_hour.end {
        problems.push("happy hour start must be before end".to_owned());
    }
    if settings.tax.rate.is_sign_negative() {
        problems.push("tax rate must not be negative".to_owned());
    }

    let orders = seed::orders();
    let order_ids: HashSet<_> = orders.iter().map(|o| o.id.clone()).collect();
    if order_ids.len() != orders.len() {
        problems.push("duplicate order ids in seed data".to_owned());
    }
}
