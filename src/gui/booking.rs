use crate::config::BookingConfig;
use crate::dom::Document;

/// Sends the visitor to the external booking page, leaving the chosen
/// service in session storage for that page to pick up.
pub fn redirect(page: &mut Document, config: &BookingConfig, service: Option<&str>) {
    if let Some(service) = service.map(str::trim).filter(|s| !s.is_empty()) {
        page.session_set(&config.service_key, service);
    }
    log::info!("Redirecting to booking page {}", config.url);
    page.navigate(&config.url);
}
