//! Restaurant settings route handlers.
//!
//! The form edits the commonly-touched fields; opening hours per day,
//! happy hour weekdays, and social links carry over unchanged from the
//! stored settings.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use masoro_core::settings::RestaurantSettings;
use masoro_core::types::Price;

use crate::filters;
use crate::middleware::RequireStaffAuth;
use crate::routes::dashboard::StaffView;
use crate::state::AppState;

/// Form values, all strings so a failed submit can be re-rendered as-is.
#[derive(Debug, Clone)]
pub struct SettingsFormView {
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub happy_hour_enabled: bool,
    pub happy_hour_start: String,
    pub happy_hour_end: String,
    pub delivery_enabled: bool,
    pub delivery_fee: String,
    pub free_delivery_threshold: String,
    pub tax_percent: String,
    pub currency: String,
    pub timezone: String,
}

impl From<&RestaurantSettings> for SettingsFormView {
    fn from(settings: &RestaurantSettings) -> Self {
        Self {
            name: settings.name.clone(),
            description: settings.description.clone(),
            address: settings.address.clone(),
            phone: settings.phone.clone(),
            email: settings.email.clone(),
            website: settings.website.clone().unwrap_or_default(),
            happy_hour_enabled: settings.happy_hour.enabled,
            happy_hour_start: settings.happy_hour.start.format("%H:%M").to_string(),
            happy_hour_end: settings.happy_hour.end.format("%H:%M").to_string(),
            delivery_enabled: settings.delivery.enabled,
            delivery_fee: settings.delivery.fee.amount().to_string(),
            free_delivery_threshold: settings.delivery.free_threshold.amount().to_string(),
            tax_percent: settings.tax.percent().to_string(),
            currency: settings.currency.clone(),
            timezone: settings.timezone.clone(),
        }
    }
}

/// Raw form input.
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub happy_hour_enabled: Option<String>,
    pub happy_hour_start: String,
    pub happy_hour_end: String,
    #[serde(default)]
    pub delivery_enabled: Option<String>,
    pub delivery_fee: String,
    pub free_delivery_threshold: String,
    pub tax_percent: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub timezone: String,
}

impl SettingsForm {
    /// Apply the form on top of the current settings.
    fn apply_to(self, mut settings: RestaurantSettings) -> Result<RestaurantSettings, String> {
        let start = parse_time(&self.happy_hour_start)
            .ok_or("happy hour start must be HH:MM")?;
        let end = parse_time(&self.happy_hour_end).ok_or("happy hour end must be HH:MM")?;
        if start >= end {
            return Err("happy hour must start before it ends".to_string());
        }

        let fee = parse_rwf(&self.delivery_fee).ok_or("delivery fee must be a whole RWF amount")?;
        let free_threshold = parse_rwf(&self.free_delivery_threshold)
            .ok_or("free delivery threshold must be a whole RWF amount")?;
        let percent = self
            .tax_percent
            .trim()
            .parse::<Decimal>()
            .map_err(|_| "tax rate must be a number".to_string())?;
        if percent < Decimal::ZERO || percent > Decimal::from(100) {
            return Err("tax rate must be between 0 and 100".to_string());
        }

        settings.name = self.name.trim().to_string();
        settings.description = self.description.trim().to_string();
        settings.address = self.address.trim().to_string();
        settings.phone = self.phone.trim().to_string();
        settings.email = self.email.trim().to_string();
        settings.website = {
            let site = self.website.trim();
            (!site.is_empty()).then(|| site.to_string())
        };
        settings.happy_hour.enabled = self.happy_hour_enabled.is_some();
        settings.happy_hour.start = start;
        settings.happy_hour.end = end;
        settings.delivery.enabled = self.delivery_enabled.is_some();
        settings.delivery.fee = fee;
        settings.delivery.free_threshold = free_threshold;
        settings.tax.rate = percent / Decimal::from(100);
        settings.currency = self.currency.trim().to_string();
        settings.timezone = self.timezone.trim().to_string();
        Ok(settings)
    }
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").ok()
}

fn parse_rwf(s: &str) -> Option<Price> {
    s.trim().parse::<i64>().ok().map(Price::from_rwf)
}

/// Settings form template.
#[derive(Template, WebTemplate)]
#[template(path = "settings/index.html")]
pub struct SettingsTemplate {
    pub staff: StaffView,
    pub current_path: String,
    pub form: SettingsFormView,
    pub error: Option<String>,
    pub saved: bool,
}

/// Display the settings form.
#[instrument(skip(state, auth))]
pub async fn index(State(state): State<AppState>, auth: RequireStaffAuth) -> SettingsTemplate {
    SettingsTemplate {
        staff: StaffView::from(&auth.0),
        current_path: "/settings".to_string(),
        form: SettingsFormView::from(&state.store().settings()),
        error: None,
        saved: false,
    }
}

/// Validate and save the settings.
#[instrument(skip(state, auth, form))]
pub async fn update(
    State(state): State<AppState>,
    auth: RequireStaffAuth,
    Form(form): Form<SettingsForm>,
) -> Response {
    let current = state.store().settings();
    match form.apply_to(current) {
        Ok(settings) => {
            state.store().update_settings(settings.clone());
            tracing::info!(name = %settings.name, "Settings updated");
            SettingsTemplate {
                staff: StaffView::from(&auth.0),
                current_path: "/settings".to_string(),
                form: SettingsFormView::from(&settings),
                error: None,
                saved: true,
            }
            .into_response()
        }
        Err(message) => SettingsTemplate {
            staff: StaffView::from(&auth.0),
            current_path: "/settings".to_string(),
            form: SettingsFormView::from(&state.store().settings()),
            error: Some(message),
            saved: false,
        }
        .into_response(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use masoro_core::seed;

    fn form() -> SettingsForm {
        SettingsForm {
            name: "Masoro Kitchen".to_owned(),
            description: "Grill house".to_owned(),
            address: "Masoro, Kigali".to_owned(),
            phone: "+250782292053".to_owned(),
            email: "hello@masorokitchen.rw".to_owned(),
            website: String::new(),
            happy_hour_enabled: Some("on".to_owned()),
            happy_hour_start: "16:00".to_owned(),
            happy_hour_end: "19:00".to_owned(),
            delivery_enabled: Some("on".to_owned()),
            delivery_fee: "2000".to_owned(),
            free_delivery_threshold: "20000".to_owned(),
            tax_percent: "18".to_owned(),
            currency: "RWF".to_owned(),
            timezone: "Africa/Kigali".to_owned(),
        }
    }

    #[test]
    fn test_form_applies_cleanly() {
        let settings = form().apply_to(seed::settings()).unwrap();
        assert_eq!(settings.tax.rate, Decimal::new(18, 2));
        assert_eq!(settings.delivery.fee, Price::from_rwf(2000));
        assert!(settings.happy_hour.enabled);
    }

    #[test]
    fn test_happy_hour_must_be_ordered() {
        let mut f = form();
        f.happy_hour_start = "20:00".to_owned();
        assert!(f.apply_to(seed::settings()).is_err());
    }

    #[test]
    fn test_tax_rate_bounds() {
        let mut f = form();
        f.tax_percent = "101".to_owned();
        assert!(f.apply_to(seed::settings()).is_err());
    }

    #[test]
    fn test_unchecked_boxes_disable_features() {
        let mut f = form();
        f.happy_hour_enabled = None;
        f.delivery_enabled = None;
        let settings = f.apply_to(seed::settings()).unwrap();
        assert!(!settings.happy_hour.enabled);
        assert!(!settings.delivery.enabled);
    }
}
