//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use masoro_core::seed;

use crate::filters;
use crate::routes::menu::MenuItemView;
use crate::state::AppState;

/// Gallery image display data.
#[derive(Clone)]
pub struct GalleryView {
    pub src: String,
    pub alt: String,
    pub title: String,
}

/// One weekday's opening hours line.
#[derive(Clone)]
pub struct HoursRow {
    pub day: &'static str,
    pub hours: String,
}

fn hours_row(day: &'static str, hours: &masoro_core::settings::DayHours) -> HoursRow {
    let hours = if hours.closed {
        "Closed".to_string()
    } else {
        format!(
            "{} - {}",
            hours.open.format("%H:%M"),
            hours.close.format("%H:%M")
        )
    };
    HoursRow { day, hours }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Restaurant name for the hero.
    pub restaurant_name: String,
    pub tagline: String,
    /// Popular dishes for the featured strip.
    pub featured: Vec<MenuItemView>,
    pub gallery: Vec<GalleryView>,
    pub happy_hour_active: bool,
    /// Happy hour schedule line, e.g. "16:00 - 19:00".
    pub happy_hour_window: String,
    pub address: String,
    pub phone: String,
    /// Opening hours, Monday first.
    pub hours: Vec<HoursRow>,
}

/// Number of popular dishes on the featured strip.
const FEATURED_COUNT: usize = 4;

/// Display the home page.
#[instrument(skip(state, session))]
pub async fn home(
    State(state): State<AppState>,
    session: tower_sessions::Session,
) -> crate::error::Result<impl IntoResponse> {
    let cart = crate::models::session::load_cart(&session).await?;
    let happy_hour_active = state.happy_hour_active();

    let featured = state
        .catalog()
        .iter()
        .filter(|item| item.popular && item.available)
        .take(FEATURED_COUNT)
        .map(|item| MenuItemView::build(item, happy_hour_active, cart.quantity_of(item.id)))
        .collect();

    let gallery = seed::gallery()
        .into_iter()
        .map(|img| GalleryView {
            src: img.src,
            alt: img.alt,
            title: img.title,
        })
        .collect();

    let settings = state.settings();
    let window = settings.happy_hour.window();
    let opening = &settings.opening_hours;
    let hours = vec![
        hours_row("Monday", &opening.monday),
        hours_row("Tuesday", &opening.tuesday),
        hours_row("Wednesday", &opening.wednesday),
        hours_row("Thursday", &opening.thursday),
        hours_row("Friday", &opening.friday),
        hours_row("Saturday", &opening.saturday),
        hours_row("Sunday", &opening.sunday),
    ];

    Ok(HomeTemplate {
        restaurant_name: settings.name.clone(),
        tagline: settings.description.clone(),
        featured,
        gallery,
        happy_hour_active,
        happy_hour_window: format!(
            "{} - {}",
            window.start.format("%H:%M"),
            window.end.format("%H:%M")
        ),
        address: settings.address.clone(),
        phone: settings.phone.clone(),
        hours,
    })
}
