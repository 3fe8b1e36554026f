//! Contact form that captures inquiries.

use std::time::Duration;

use database::{DatabaseError, Inquiry, NewInquiry, Persistence};
use serde::Serialize;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{error, info};

/// How long the success banner stays up before the form reads as idle again.
pub const SUCCESS_BANNER: Duration = Duration::from_secs(3);

/// Feedback state shown next to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    Idle,
    Success,
    Error,
}

/// Errors from submitting the lead form.
#[derive(Debug, Error)]
pub enum LeadFormError {
    #[error("could not store inquiry: {0}")]
    Persistence(#[from] DatabaseError),
}

/// The contact form's fields and feedback status.
#[derive(Debug, Clone)]
pub struct LeadForm {
    pub name: String,
    pub email: String,
    pub message: String,
    status: FormStatus,
    status_since: Instant,
    banner: Duration,
}

impl Default for LeadForm {
    fn default() -> Self {
        Self::with_banner(SUCCESS_BANNER)
    }
}

impl LeadForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// A form whose success banner lasts `banner`.
    pub fn with_banner(banner: Duration) -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            message: String::new(),
            status: FormStatus::Idle,
            status_since: Instant::now(),
            banner,
        }
    }

    /// Replace the field values.
    pub fn fill(&mut self, name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) {
        self.name = name.into();
        self.email = email.into();
        self.message = message.into();
    }

    /// Current status. Success reverts to idle once the banner has expired.
    pub fn status(&self) -> FormStatus {
        match self.status {
            FormStatus::Success if self.status_since.elapsed() >= self.banner => FormStatus::Idle,
            status => status,
        }
    }

    /// Whether every required field has content.
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.message]
            .iter()
            .all(|field| !field.trim().is_empty())
    }

    /// Store the form as a new inquiry.
    ///
    /// Returns `Ok(None)` without touching anything when a field is empty.
    /// On success the fields are cleared. On failure the fields are kept so
    /// the visitor can try again, and the status becomes [`FormStatus::Error`].
    pub async fn submit(&mut self, persistence: &Persistence) -> Result<Option<Inquiry>, LeadFormError> {
        if !self.is_complete() {
            return Ok(None);
        }

        let new = NewInquiry {
            name: self.name.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
        };

        match persistence.append_inquiry(new).await {
            Ok(inquiry) => {
                info!(id = %inquiry.id, "Contact form submitted");
                self.name.clear();
                self.email.clear();
                self.message.clear();
                self.set_status(FormStatus::Success);
                Ok(Some(inquiry))
            }
            Err(err) => {
                error!(error = %err, "Failed to store contact form submission");
                self.set_status(FormStatus::Error);
                Err(err.into())
            }
        }
    }

    fn set_status(&mut self, status: FormStatus) {
        self.status = status;
        self.status_since = Instant::now();
    }
}
