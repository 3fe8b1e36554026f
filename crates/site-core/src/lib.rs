//! Components behind the NACTAX site.
//!
//! Each component owns one piece of visitor-facing behaviour and takes its
//! collaborators by injection:
//!
//! - [`navigation`] - which view is showing
//! - [`lead_form`] - contact form that stores inquiries
//! - [`payment`] - simulated invoice payment
//! - [`chat`] - support chat over a [`chat_core::ChatBackend`]
//! - [`admin`] / [`auth`] - password-gated inquiry list and chat settings
//! - [`content`] - static marketing copy
//!
//! Persistence goes through [`database::Persistence`] everywhere.

pub mod admin;
pub mod auth;
pub mod chat;
pub mod content;
pub mod lead_form;
pub mod navigation;
pub mod payment;

pub use admin::{AdminError, AdminPanel, AdminTab};
pub use auth::{AuthError, Authenticator, SharedSecretAuthenticator};
pub use chat::{ChatSession, ChatTurnError, ChatWidget, PendingTurn};
pub use lead_form::{FormStatus, LeadForm, LeadFormError};
pub use navigation::{Anchor, Destination, Navigator, Scroll, Transition, View};
pub use payment::{
    DelayPolicy, PaymentDetails, PaymentError, PaymentForm, PaymentPolicy, PaymentStatus,
    PaymentTicket,
};
