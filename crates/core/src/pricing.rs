//! Happy-hour window and effective price resolution.
//!
//! Both pieces are pure functions of their inputs. The storefront passes
//! in the local wall-clock time; tests pass in fixed times.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::catalog::MenuItem;
use crate::types::Price;

/// A daily local-time window during which happy-hour prices apply.
///
/// The window is half-open: `start <= t < end`. There is no timezone
/// handling here; callers hand in whatever "local" means to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HappyHourWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl HappyHourWindow {
    /// Whether the given wall-clock time falls inside the window.
    #[must_use]
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time < self.end
    }
}

impl Default for HappyHourWindow {
    /// The house default: 4 PM to 7 PM.
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(16, 0, 0).unwrap_or_default(),
            end: NaiveTime::from_hms_opt(19, 0, 0).unwrap_or_default(),
        }
    }
}

/// Resolve the unit price for an item.
///
/// Returns the happy-hour price iff the window is currently active and the
/// item offers one; the regular price otherwise. Total over its domain.
#[must_use]
pub fn effective_price(item: &MenuItem, happy_hour_active: bool) -> Price {
    if happy_hour_active {
        item.happy_hour_price.unwrap_or(item.price)
    } else {
        item.price
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::seed;
    use crate::types::MenuItemId;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_window_is_half_open() {
        let window = HappyHourWindow::default();
        assert!(!window.contains(at(15, 59)));
        assert!(window.contains(at(16, 0)));
        assert!(window.contains(at(17, 30)));
        assert!(window.contains(at(18, 59)));
        assert!(!window.contains(at(19, 0)));
        assert!(!window.contains(at(3, 0)));
    }

    #[test]
    fn test_effective_price_without_happy_hour_price() {
        let catalog = seed::storefront_catalog();
        for item in catalog.iter().filter(|i| i.happy_hour_price.is_none()) {
            assert_eq!(effective_price(item, false), item.price);
            assert_eq!(effective_price(item, true), item.price);
        }
    }

    #[test]
    fn test_effective_price_with_happy_hour_price() {
        let catalog = seed::storefront_catalog();
        let mut seen = 0;
        for item in catalog.iter().filter(|i| i.happy_hour_price.is_some()) {
            assert_eq!(effective_price(item, true), item.happy_hour_price.unwrap());
            assert_eq!(effective_price(item, false), item.price);
            seen += 1;
        }
        assert!(seen > 0, "seed catalog should offer happy-hour drinks");
    }

    #[test]
    fn test_mutzig_discounts_during_happy_hour() {
        let catalog = seed::storefront_catalog();
        let mutzig = catalog.get(MenuItemId::new(8)).unwrap();
        assert_eq!(effective_price(mutzig, true), Price::from_rwf(1200));
        assert_eq!(effective_price(mutzig, false), Price::from_rwf(1500));
    }
}
