//! Public page routes and navigation.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;
use site_core::content::ServiceDetail;
use site_core::{Anchor, Scroll, Transition, View};
use tower_cookies::Cookies;

use crate::state::AppState;
use crate::templates::{HomeTemplate, Layout, ProductsTemplate, ServiceTemplate};

/// Canonical URL of the view a transition landed on.
pub fn location(transition: &Transition, service: Option<&str>) -> String {
    let path = match transition.view {
        View::Home => "/".to_string(),
        View::Payment => "/payment".to_string(),
        View::Products => "/products".to_string(),
        View::ServiceDetail => format!(
            "/services?title={}",
            urlencoding::encode(service.unwrap_or_default())
        ),
    };

    match transition.scroll {
        Scroll::Anchor(anchor) => format!("{}#{}", path, anchor.id()),
        Scroll::Top | Scroll::Preserve => path,
    }
}

/// Render the home page.
pub async fn home(State(state): State<AppState>, cookies: Cookies) -> HomeTemplate {
    let chat_visible = state.chat_visible().await;
    let session = state.sessions.resolve(&cookies).await;
    let mut visitor = session.lock().await;
    visitor.navigator.navigate("home", None);

    let layout = Layout::new(View::Home, &visitor, chat_visible, "/");
    HomeTemplate::new(layout, &visitor)
}

/// Render the recommended-products page.
pub async fn products(State(state): State<AppState>, cookies: Cookies) -> ProductsTemplate {
    let chat_visible = state.chat_visible().await;
    let session = state.sessions.resolve(&cookies).await;
    let mut visitor = session.lock().await;
    visitor.navigator.navigate("products", None);

    let layout = Layout::new(
        View::Products,
        &visitor,
        chat_visible,
        "/products",
    );
    ProductsTemplate::new(layout)
}

#[derive(Deserialize)]
pub struct ServiceQuery {
    pub title: Option<String>,
}

/// Render a service-detail page. Without a title the visitor lands on home.
pub async fn service_detail(
    State(state): State<AppState>,
    cookies: Cookies,
    Query(query): Query<ServiceQuery>,
) -> Response {
    let chat_visible = state.chat_visible().await;
    let session = state.sessions.resolve(&cookies).await;
    let mut visitor = session.lock().await;

    let transition = visitor
        .navigator
        .navigate("service-detail", query.title.as_deref());
    let Some(title) = visitor.navigator.selected_service().map(str::to_string) else {
        return Redirect::to(&location(&transition, None)).into_response();
    };

    let return_to = location(&transition, Some(&title));
    let layout = Layout::new(
        View::ServiceDetail,
        &visitor,
        chat_visible,
        return_to,
    );
    ServiceTemplate {
        layout,
        detail: ServiceDetail::new(&title),
    }
    .into_response()
}

#[derive(Deserialize)]
pub struct NavigateQuery {
    /// Destination name.
    pub to: Option<String>,
    /// Service title for `service-detail`.
    pub service: Option<String>,
    /// In-page anchor already pending on the client.
    pub anchor: Option<String>,
    /// Services menu entry, in place of `to`.
    pub item: Option<String>,
}

/// Run a navigation request and redirect to where it landed.
pub async fn navigate(
    State(state): State<AppState>,
    cookies: Cookies,
    Query(query): Query<NavigateQuery>,
) -> Redirect {
    let session = state.sessions.resolve(&cookies).await;
    let mut visitor = session.lock().await;

    let transition = match query.item.as_deref() {
        Some(item) => visitor.navigator.select_menu_item(item),
        None => visitor.navigator.navigate_with_anchor(
            query.to.as_deref().unwrap_or_default(),
            query.service.as_deref(),
            query.anchor.as_deref().and_then(Anchor::parse),
        ),
    };

    Redirect::to(&location(&transition, visitor.navigator.selected_service()))
}
