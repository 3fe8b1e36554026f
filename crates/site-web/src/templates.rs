//! Askama templates and the view data they render.

use askama::Template;
use chat_core::ChatMessage;
use database::Inquiry;
use site_core::content::{
    ContactInfo, GridService, MenuCategory, ServiceDetail, ServiceHighlight, CONTACT, HIGHLIGHTS,
    PRODUCT_BENEFITS, PRODUCT_DOWNLOAD_URL, SERVICE_GRID, SERVICE_MENU,
};
use site_core::{FormStatus, PaymentDetails, PaymentStatus, View};

use crate::session::VisitorSession;

/// Chat widget as drawn on a page.
pub struct ChatView {
    pub open: bool,
    pub minimized: bool,
    pub loading: bool,
    pub messages: Vec<ChatMessage>,
}

/// Data every public page needs: header, footer and chat widget.
pub struct Layout {
    pub view: &'static str,
    pub contact: ContactInfo,
    pub menu: &'static [MenuCategory],
    /// `None` when the chat is switched off.
    pub chat: Option<ChatView>,
    /// Where widget forms send the visitor back to.
    pub return_to: String,
}

impl Layout {
    pub fn new(view: View, session: &VisitorSession, chat_enabled: bool, return_to: impl Into<String>) -> Self {
        let chat = chat_enabled.then(|| ChatView {
            open: session.chat.is_open(),
            minimized: session.chat.is_minimized(),
            loading: session.chat.is_loading(),
            messages: session.chat.transcript().to_vec(),
        });

        Self {
            view: view.as_str(),
            contact: CONTACT,
            menu: SERVICE_MENU,
            chat,
            return_to: return_to.into(),
        }
    }
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
    pub highlights: &'static [ServiceHighlight],
    pub grid: &'static [GridService],
    pub form_status: &'static str,
    pub name: String,
    pub email: String,
    pub message: String,
}

impl HomeTemplate {
    pub fn new(layout: Layout, session: &VisitorSession) -> Self {
        let form = &session.lead_form;
        Self {
            layout,
            highlights: HIGHLIGHTS,
            grid: SERVICE_GRID,
            form_status: match form.status() {
                FormStatus::Idle => "idle",
                FormStatus::Success => "success",
                FormStatus::Error => "error",
            },
            name: form.name.clone(),
            email: form.email.clone(),
            message: form.message.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "payment.html")]
pub struct PaymentTemplate {
    pub layout: Layout,
    pub details: PaymentDetails,
    pub state: &'static str,
    pub transaction_id: Option<String>,
    pub notice: Option<String>,
}

impl PaymentTemplate {
    pub fn new(layout: Layout, session: &VisitorSession) -> Self {
        let form = &session.payment;
        let (state, transaction_id) = match form.status() {
            PaymentStatus::Idle => ("idle", None),
            PaymentStatus::Processing => ("processing", None),
            PaymentStatus::Success { transaction_id } => ("success", Some(transaction_id.clone())),
            PaymentStatus::Error => ("error", None),
        };

        Self {
            layout,
            details: form.details.clone(),
            state,
            transaction_id,
            notice: form.notice().map(str::to_string),
        }
    }
}

#[derive(Template)]
#[template(path = "products.html")]
pub struct ProductsTemplate {
    pub layout: Layout,
    pub benefits: &'static [(&'static str, &'static str)],
    pub download_url: &'static str,
}

impl ProductsTemplate {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            benefits: PRODUCT_BENEFITS,
            download_url: PRODUCT_DOWNLOAD_URL,
        }
    }
}

#[derive(Template)]
#[template(path = "service.html")]
pub struct ServiceTemplate {
    pub layout: Layout,
    pub detail: ServiceDetail,
}

#[derive(Template)]
#[template(path = "admin_login.html")]
pub struct AdminLoginTemplate {
    pub alert: Option<String>,
}

/// One row of the inquiry table.
pub struct InquiryRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub date: String,
}

impl From<Inquiry> for InquiryRow {
    fn from(inquiry: Inquiry) -> Self {
        Self {
            date: inquiry.submitted_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            id: inquiry.id,
            name: inquiry.name,
            email: inquiry.email,
            message: inquiry.message,
        }
    }
}

#[derive(Template)]
#[template(path = "admin_inquiries.html")]
pub struct AdminInquiriesTemplate {
    pub inquiries: Vec<InquiryRow>,
    pub alert: Option<String>,
}

#[derive(Template)]
#[template(path = "admin_settings.html")]
pub struct AdminSettingsTemplate {
    pub enabled: bool,
    pub system_prompt: String,
    pub alert: Option<String>,
}
