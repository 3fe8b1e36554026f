//! Admin panel routes.
//!
//! Pages redirect to the login form while the panel is locked. Actions and
//! the JSON API answer 401 instead.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Json};
use database::{ChatSettings, Inquiry};
use serde::Deserialize;
use site_core::AdminTab;
use tower_cookies::Cookies;
use tracing::info;

use crate::error::Result;
use crate::state::AppState;
use crate::templates::{AdminInquiriesTemplate, AdminLoginTemplate, AdminSettingsTemplate, InquiryRow};

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct SettingsForm {
    /// Present only when the checkbox is ticked.
    pub enabled: Option<String>,
    #[serde(default)]
    pub system_prompt: String,
}

/// Login form, or the dashboard once logged in.
pub async fn panel(State(state): State<AppState>, cookies: Cookies) -> Response {
    let session = state.sessions.resolve(&cookies).await;
    let mut visitor = session.lock().await;

    if visitor.admin.is_authenticated() {
        let target = match visitor.admin.tab() {
            AdminTab::Inquiries => "/admin/inquiries",
            AdminTab::Settings => "/admin/settings",
        };
        return Redirect::to(target).into_response();
    }

    AdminLoginTemplate {
        alert: visitor.admin.take_alert(),
    }
    .into_response()
}

pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<LoginForm>,
) -> Result<Redirect> {
    let session = state.sessions.resolve(&cookies).await;
    let mut visitor = session.lock().await;

    if visitor.admin.login(state.authenticator.as_ref(), &form.password).await? {
        Ok(Redirect::to("/admin/inquiries"))
    } else {
        Ok(Redirect::to("/admin"))
    }
}

/// Close the panel; the next visit needs the password again.
pub async fn close(State(state): State<AppState>, cookies: Cookies) -> Redirect {
    let session = state.sessions.resolve(&cookies).await;
    session.lock().await.admin.close();
    info!("Admin panel closed");
    Redirect::to("/")
}

pub async fn inquiries_page(State(state): State<AppState>, cookies: Cookies) -> Result<Response> {
    let session = state.sessions.resolve(&cookies).await;
    let mut visitor = session.lock().await;
    if !visitor.admin.is_authenticated() {
        return Ok(Redirect::to("/admin").into_response());
    }

    visitor.admin.select_tab(AdminTab::Inquiries)?;
    let inquiries = visitor.admin.inquiries(&state.persistence).await?;

    Ok(AdminInquiriesTemplate {
        inquiries: inquiries.into_iter().map(InquiryRow::from).collect(),
        alert: visitor.admin.take_alert(),
    }
    .into_response())
}

pub async fn delete_inquiry(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let session = state.sessions.resolve(&cookies).await;
    let visitor = session.lock().await;

    visitor.admin.delete_inquiry(&state.persistence, &id).await?;
    Ok(Redirect::to("/admin/inquiries"))
}

pub async fn settings_page(State(state): State<AppState>, cookies: Cookies) -> Result<Response> {
    let session = state.sessions.resolve(&cookies).await;
    let mut visitor = session.lock().await;
    if !visitor.admin.is_authenticated() {
        return Ok(Redirect::to("/admin").into_response());
    }

    visitor.admin.select_tab(AdminTab::Settings)?;
    let settings = visitor.admin.settings(&state.persistence).await?;

    Ok(AdminSettingsTemplate {
        enabled: settings.enabled,
        system_prompt: settings.system_prompt,
        alert: visitor.admin.take_alert(),
    }
    .into_response())
}

pub async fn save_settings(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<SettingsForm>,
) -> Result<Redirect> {
    let session = state.sessions.resolve(&cookies).await;
    let mut visitor = session.lock().await;

    let settings = ChatSettings {
        enabled: matches!(form.enabled.as_deref(), Some("true") | Some("on")),
        system_prompt: form.system_prompt,
    };
    visitor.admin.save_settings(&state.persistence, &settings).await?;

    Ok(Redirect::to("/admin/settings"))
}

/// Inquiries as JSON, newest first.
pub async fn inquiries_api(State(state): State<AppState>, cookies: Cookies) -> Result<Json<Vec<Inquiry>>> {
    let session = state.sessions.resolve(&cookies).await;
    let visitor = session.lock().await;

    Ok(Json(visitor.admin.inquiries(&state.persistence).await?))
}
