//! Route handlers for the site.

pub mod admin;
pub mod chat;
pub mod contact;
pub mod health;
pub mod pages;
pub mod payment;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Public pages
        .route("/", get(pages::home))
        .route("/products", get(pages::products))
        .route("/services", get(pages::service_detail))
        .route("/navigate", get(pages::navigate))
        .route("/contact", post(contact::submit))
        .route("/payment", get(payment::page).post(payment::submit))
        .route("/payment/reset", post(payment::reset))
        // Support chat
        .route("/chat/toggle", post(chat::toggle))
        .route("/chat/minimize", post(chat::minimize))
        .route("/chat/send", post(chat::send))
        .route("/api/chat/transcript", get(chat::transcript))
        // Admin panel
        .route("/admin", get(admin::panel))
        .route("/admin/login", post(admin::login))
        .route("/admin/close", post(admin::close))
        .route("/admin/inquiries", get(admin::inquiries_page))
        .route("/admin/inquiries/:id/delete", post(admin::delete_inquiry))
        .route("/admin/settings", get(admin::settings_page).post(admin::save_settings))
        .route("/api/inquiries", get(admin::inquiries_api))
        // Health check
        .route("/health", get(health::health))
}

/// Keep form-supplied redirect targets on this site.
pub(crate) fn safe_return(path: Option<&str>) -> String {
    match path {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => "/".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_return() {
        assert_eq!(safe_return(Some("/payment")), "/payment");
        assert_eq!(safe_return(Some("/services?title=Tax%20Planning")), "/services?title=Tax%20Planning");
        assert_eq!(safe_return(Some("https://evil.example")), "/");
        assert_eq!(safe_return(Some("//evil.example")), "/");
        assert_eq!(safe_return(None), "/");
    }
}
