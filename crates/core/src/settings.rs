//! Restaurant settings: identity, opening hours, happy hour, delivery,
//! and tax.

use chrono::{NaiveTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::HappyHourWindow;
use crate::types::Price;

/// One weekday's opening hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
    pub closed: bool,
}

impl Default for DayHours {
    fn default() -> Self {
        Self {
            open: NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default(),
            close: NaiveTime::from_hms_opt(23, 0, 0).unwrap_or_default(),
            closed: false,
        }
    }
}

/// Weekly opening hours, Monday first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    pub monday: DayHours,
    pub tuesday: DayHours,
    pub wednesday: DayHours,
    pub thursday: DayHours,
    pub friday: DayHours,
    pub saturday: DayHours,
    pub sunday: DayHours,
}

/// Happy-hour configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HappyHourConfig {
    pub enabled: bool,
    pub start: NaiveTime,
    pub end: NaiveTime,
    /// Weekdays the window applies on.
    pub days: Vec<Weekday>,
}

impl HappyHourConfig {
    /// The pure time window, independent of the enabled flag and days.
    #[must_use]
    pub const fn window(&self) -> HappyHourWindow {
        HappyHourWindow {
            start: self.start,
            end: self.end,
        }
    }

    /// Whether happy-hour pricing applies at the given local weekday and
    /// time.
    #[must_use]
    pub fn active_at(&self, weekday: Weekday, time: NaiveTime) -> bool {
        self.enabled && self.days.contains(&weekday) && self.window().contains(time)
    }
}

impl Default for HappyHourConfig {
    /// Every afternoon, 4 PM to 7 PM.
    fn default() -> Self {
        let window = HappyHourWindow::default();
        Self {
            enabled: true,
            start: window.start,
            end: window.end,
            days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
                Weekday::Sun,
            ],
        }
    }
}

/// Delivery configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryConfig {
    pub enabled: bool,
    /// Flat fee applied to takeout orders.
    pub fee: Price,
    /// Subtotal above which delivery is free.
    pub free_threshold: Price,
    pub radius_km: u32,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            fee: Price::from_rwf(2000),
            free_threshold: Price::from_rwf(20000),
            radius_km: 10,
        }
    }
}

/// Tax configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxConfig {
    /// Fractional rate, e.g. 0.18 for 18% VAT.
    pub rate: Decimal,
    /// Whether menu prices already include tax.
    pub included: bool,
}

impl TaxConfig {
    /// The rate as a whole percentage for display ("18").
    #[must_use]
    pub fn percent(&self) -> Decimal {
        self.rate * Decimal::from(100)
    }
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            rate: Decimal::new(18, 2),
            included: false,
        }
    }
}

/// Social media links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
}

/// All restaurant settings, edited as one document in the admin console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantSettings {
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub opening_hours: OpeningHours,
    pub happy_hour: HappyHourConfig,
    pub delivery: DeliveryConfig,
    pub tax: TaxConfig,
    pub currency: String,
    pub timezone: String,
    pub social: SocialLinks,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_happy_hour_active_inside_window() {
        let config = HappyHourConfig::default();
        assert!(config.active_at(Weekday::Wed, at(17, 0)));
        assert!(!config.active_at(Weekday::Wed, at(15, 0)));
    }

    #[test]
    fn test_happy_hour_applies_on_weekends() {
        let config = HappyHourConfig::default();
        assert!(config.active_at(Weekday::Sat, at(17, 0)));
        assert!(config.active_at(Weekday::Sun, at(18, 59)));
    }

    #[test]
    fn test_days_override_excludes_weekday() {
        let config = HappyHourConfig {
            days: vec![Weekday::Mon],
            ..HappyHourConfig::default()
        };
        assert!(!config.active_at(Weekday::Sat, at(17, 0)));
    }

    #[test]
    fn test_disabled_happy_hour_never_active() {
        let config = HappyHourConfig {
            enabled: false,
            ..HappyHourConfig::default()
        };
        assert!(!config.active_at(Weekday::Mon, at(17, 0)));
    }

    #[test]
    fn test_tax_percent_display() {
        let tax = TaxConfig::default();
        assert_eq!(tax.percent(), Decimal::from(18));
    }
}
