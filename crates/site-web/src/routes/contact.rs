//! Contact form route.

use axum::extract::State;
use axum::response::Redirect;
use axum::Form;
use serde::Deserialize;
use tower_cookies::Cookies;
use tracing::debug;

use crate::state::AppState;

#[derive(Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// Store a contact form submission and go back to the form.
///
/// The outcome is shown on the home page through the lead form status. A
/// failed write keeps the entered fields in the session.
pub async fn submit(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<ContactForm>,
) -> Redirect {
    let session = state.sessions.resolve(&cookies).await;
    let mut visitor = session.lock().await;

    visitor.lead_form.fill(form.name, form.email, form.message);
    match visitor.lead_form.submit(&state.persistence).await {
        Ok(Some(inquiry)) => debug!(id = %inquiry.id, "Inquiry stored"),
        Ok(None) => debug!("Incomplete contact form ignored"),
        // Already logged by the form
        Err(_) => {}
    }

    Redirect::to("/#contact")
}
