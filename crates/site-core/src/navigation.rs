//! Top-level view selection.
//!
//! [`Navigator`] is the single owner of "which view is showing". Every page
//! transition goes through [`Navigator::navigate`], which never fails:
//! destinations it does not recognize land on the home view.

use serde::Serialize;
use tracing::debug;

use crate::content::DOWNLOAD_MENU_ITEM;

/// The mutually exclusive top-level views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    #[default]
    Home,
    Payment,
    Products,
    ServiceDetail,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Payment => "payment",
            View::Products => "products",
            View::ServiceDetail => "service-detail",
        }
    }
}

/// In-page sections of the home view that can be scrolled to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Contact,
    About,
    Profile,
}

impl Anchor {
    /// Element id of the section.
    pub fn id(&self) -> &'static str {
        match self {
            Anchor::Contact => "contact",
            Anchor::About => "about",
            Anchor::Profile => "profile",
        }
    }

    /// Parse an anchor id, with or without a leading `#`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().trim_start_matches('#') {
            "contact" => Some(Anchor::Contact),
            "about" => Some(Anchor::About),
            "profile" => Some(Anchor::Profile),
            _ => None,
        }
    }
}

/// A recognized navigation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Home,
    Payment,
    Products,
    ServiceDetail,
    Anchor(Anchor),
}

impl Destination {
    /// Parse a destination name. Returns `None` for names outside the closed set.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "home" => Some(Destination::Home),
            "payment" => Some(Destination::Payment),
            "products" => Some(Destination::Products),
            "service-detail" => Some(Destination::ServiceDetail),
            "contact" | "contact-anchor" => Some(Destination::Anchor(Anchor::Contact)),
            "about" | "about-anchor" => Some(Destination::Anchor(Anchor::About)),
            "profile" | "profile-anchor" => Some(Destination::Anchor(Anchor::Profile)),
            _ => None,
        }
    }
}

/// What the viewport does after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Scroll {
    /// Jump to the top, without animation.
    Top,
    /// Bring an in-page section into view.
    Anchor(Anchor),
    /// Leave the scroll position alone.
    Preserve,
}

/// Result of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub view: View,
    pub scroll: Scroll,
}

/// Current view plus the service selected for the service-detail view.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    view: View,
    selected_service: String,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// The selected service, only while the service-detail view is showing.
    pub fn selected_service(&self) -> Option<&str> {
        match self.view {
            View::ServiceDetail => Some(self.selected_service.as_str()),
            _ => None,
        }
    }

    /// Transition to `destination`. `payload` is the service title and only
    /// matters for `service-detail`.
    pub fn navigate(&mut self, destination: &str, payload: Option<&str>) -> Transition {
        self.navigate_with_anchor(destination, payload, None)
    }

    /// Like [`navigate`](Self::navigate), with an in-page anchor already
    /// pending (for example a `#about` link that also switches to home).
    pub fn navigate_with_anchor(
        &mut self,
        destination: &str,
        payload: Option<&str>,
        pending_anchor: Option<Anchor>,
    ) -> Transition {
        let payload = payload.map(str::trim).filter(|p| !p.is_empty());

        let transition = match (Destination::parse(destination), payload) {
            (Some(Destination::ServiceDetail), Some(title)) => {
                self.selected_service = title.to_string();
                self.set(View::ServiceDetail, Scroll::Top)
            }
            (Some(Destination::Payment), _) => self.set(View::Payment, Scroll::Top),
            (Some(Destination::Products), _) => self.set(View::Products, Scroll::Top),
            (Some(Destination::Home), _) => match pending_anchor {
                Some(anchor) => self.set(View::Home, Scroll::Anchor(anchor)),
                None => self.set(View::Home, Scroll::Top),
            },
            (Some(Destination::Anchor(anchor)), _) => self.set(View::Home, Scroll::Anchor(anchor)),
            // Unknown names and a service-detail request without a title.
            _ => self.set(View::Home, Scroll::Preserve),
        };

        debug!(
            destination,
            view = transition.view.as_str(),
            scroll = ?transition.scroll,
            "Navigation"
        );
        transition
    }

    /// Handle a click on a Services dropdown entry.
    pub fn select_menu_item(&mut self, item: &str) -> Transition {
        if item == DOWNLOAD_MENU_ITEM {
            self.navigate("products", None)
        } else {
            self.navigate("service-detail", Some(item))
        }
    }

    fn set(&mut self, view: View, scroll: Scroll) -> Transition {
        self.view = view;
        Transition { view, scroll }
    }
}
