//! Support chat routes.
//!
//! All of them answer 404 while the chat is switched off.

use axum::extract::State;
use axum::response::Redirect;
use axum::{Form, Json};
use chat_core::ChatMessage;
use serde::{Deserialize, Serialize};
use site_core::ChatTurnError;
use tower_cookies::Cookies;

use crate::error::{Result, WebError};
use crate::routes::safe_return;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct WidgetForm {
    pub return_to: Option<String>,
}

#[derive(Deserialize)]
pub struct SendForm {
    #[serde(default)]
    pub message: String,
    pub return_to: Option<String>,
}

#[derive(Serialize)]
pub struct Transcript {
    pub open: bool,
    pub minimized: bool,
    pub loading: bool,
    pub messages: Vec<ChatMessage>,
}

async fn ensure_enabled(state: &AppState) -> Result<()> {
    if state.chat.is_enabled().await? {
        Ok(())
    } else {
        Err(WebError::NotFound("chat"))
    }
}

/// Open or close the widget.
pub async fn toggle(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<WidgetForm>,
) -> Result<Redirect> {
    ensure_enabled(&state).await?;
    let session = state.sessions.resolve(&cookies).await;
    session.lock().await.chat.toggle_open();
    Ok(Redirect::to(&safe_return(form.return_to.as_deref())))
}

/// Minimize or restore the open widget.
pub async fn minimize(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<WidgetForm>,
) -> Result<Redirect> {
    ensure_enabled(&state).await?;
    let session = state.sessions.resolve(&cookies).await;
    session.lock().await.chat.toggle_minimized();
    Ok(Redirect::to(&safe_return(form.return_to.as_deref())))
}

/// Send one message and wait for the reply.
///
/// The session stays unlocked during the backend call. A second send in the
/// meantime is rejected with 409.
pub async fn send(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<SendForm>,
) -> Result<Redirect> {
    ensure_enabled(&state).await?;
    let back = safe_return(form.return_to.as_deref());
    let session = state.sessions.resolve(&cookies).await;

    let turn = match session.lock().await.chat.begin_turn(&form.message) {
        Ok(turn) => turn,
        Err(ChatTurnError::EmptyInput) => return Ok(Redirect::to(&back)),
        Err(err) => return Err(err.into()),
    };

    let reply = state.chat.reply(turn).await;
    session.lock().await.chat.complete_turn(reply);

    Ok(Redirect::to(&back))
}

/// The visitor's transcript as JSON.
pub async fn transcript(State(state): State<AppState>, cookies: Cookies) -> Result<Json<Transcript>> {
    ensure_enabled(&state).await?;
    let session = state.sessions.resolve(&cookies).await;
    let visitor = session.lock().await;

    Ok(Json(Transcript {
        open: visitor.chat.is_open(),
        minimized: visitor.chat.is_minimized(),
        loading: visitor.chat.is_loading(),
        messages: visitor.chat.transcript().to_vec(),
    }))
}
