//! Application state shared across request handlers.

use std::sync::Arc;

use chrono::{Datelike, Local, Timelike};
use masoro_core::catalog::Catalog;
use masoro_core::seed;
use masoro_core::settings::RestaurantSettings;
use masoro_core::types::Price;

use crate::config::StorefrontConfig;

/// Shared application state. Cheap to clone; the inner data lives behind
/// an `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    settings: RestaurantSettings,
}

impl AppState {
    /// Build state from config plus the seeded catalog and settings.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: seed::storefront_catalog(),
                settings: seed::settings(),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn settings(&self) -> &RestaurantSettings {
        &self.inner.settings
    }

    /// Whether happy hour pricing applies right now, per the configured
    /// schedule (local server time).
    #[must_use]
    pub fn happy_hour_active(&self) -> bool {
        let now = Local::now();
        let weekday = now.date_naive().weekday();
        let time = chrono::NaiveTime::from_hms_opt(now.hour(), now.minute(), now.second())
            .unwrap_or_default();
        self.inner.settings.happy_hour.active_at(weekday, time)
    }

    /// Delivery fee applied to takeout orders.
    #[must_use]
    pub fn delivery_fee(&self) -> Price {
        self.inner.settings.delivery.fee
    }

    /// Tax rate as a decimal fraction (e.g. 0.18).
    #[must_use]
    pub fn tax_rate(&self) -> rust_decimal::Decimal {
        self.inner.settings.tax.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    fn test_config() -> StorefrontConfig {
        StorefrontConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            session_secret: None,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    #[test]
    fn test_state_holds_seed_catalog() {
        let state = AppState::new(test_config());
        assert!(!state.catalog().is_empty());
        assert_eq!(state.settings().name, "Masoro Kitchen");
    }

    #[test]
    fn test_clone_shares_inner() {
        let state = AppState::new(test_config());
        let clone = state.clone();
        assert_eq!(state.catalog().len(), clone.catalog().len());
    }
}
