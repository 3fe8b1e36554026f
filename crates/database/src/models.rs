//! Stored models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// System instruction used when none has been saved.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful and professional customer support agent for NACTAX (Tax, Accounting & Business Support Services). Your goal is to assist clients with questions about personal and business tax returns, bookkeeping, payroll, business startup, and IRS issues. Be polite, concise, and encourage them to book a consultation or contact 614-699-0603 for specific advice. Do not provide specific legal or tax advice for their personal situation, but general information about services.";

/// A contact-form submission captured from the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
    /// Creation-time derived token, unique across the stored list.
    pub id: String,
    /// Visitor name
    pub name: String,
    /// Visitor email
    pub email: String,
    /// Free-form message
    pub message: String,
    /// Submission timestamp (stored as `date` for compatibility with the site's records)
    #[serde(rename = "date")]
    pub submitted_at: DateTime<Utc>,
}

/// Fields of an inquiry before an id and timestamp are assigned.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewInquiry {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Chat widget configuration, edited from the admin panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSettings {
    /// Whether the support chat is shown at all.
    pub enabled: bool,
    /// Behavioral preamble sent with every chat request.
    pub system_prompt: String,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}
