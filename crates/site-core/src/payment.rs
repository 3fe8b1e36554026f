//! Simulated invoice payment form.
//!
//! Nothing here talks to a payment gateway. Submissions are checked locally,
//! held for a configurable delay, then succeed or get declined at random.
//! No transaction is recorded anywhere.

use std::time::Duration;

use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

pub const INVALID_CARD_MESSAGE: &str = "Invalid card number";
pub const DECLINED_MESSAGE: &str = "Transaction declined. Please check your card details.";

/// Fewest digits a card number may have.
pub const MIN_CARD_DIGITS: usize = 15;
/// Most digits kept while formatting.
pub const MAX_CARD_DIGITS: usize = 16;

const MAX_CVC_DIGITS: usize = 4;
const MAX_ZIP_CHARS: usize = 10;
const TRANSACTION_ID_RANGE: u32 = 10_000_000;

/// Group card digits into blocks of four separated by single spaces.
///
/// Non-digits are dropped and the result is capped at 16 digits.
pub fn format_card_number(input: &str) -> String {
    let digits: Vec<char> = input
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_CARD_DIGITS)
        .collect();

    digits
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize an expiry to `MM/YY`: a separator goes in once two digits are present.
pub fn format_expiry(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    if digits.len() >= 2 {
        let year: String = digits[2..].chars().take(2).collect();
        format!("{}/{}", &digits[..2], year)
    } else {
        digits
    }
}

/// Keep only the digits of a CVC, at most four.
pub fn format_cvc(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_CVC_DIGITS)
        .collect()
}

pub fn format_zip(input: &str) -> String {
    input.trim().chars().take(MAX_ZIP_CHARS).collect()
}

/// How long a submission stays in processing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DelayPolicy {
    /// The same delay for every attempt.
    Fixed(Duration),
    /// `base` doubled for each earlier attempt on the same form, capped at `max`.
    Exponential { base: Duration, max: Duration },
}

impl DelayPolicy {
    /// Delay for the given zero-based attempt.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        match *self {
            DelayPolicy::Fixed(delay) => delay,
            DelayPolicy::Exponential { base, max } => {
                let factor = 2u32.saturating_pow(attempt.min(16));
                base.saturating_mul(factor).min(max)
            }
        }
    }
}

/// Outcome policy of the simulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentPolicy {
    success_probability: f64,
    pub delay: DelayPolicy,
}

impl Default for PaymentPolicy {
    fn default() -> Self {
        Self {
            success_probability: 0.9,
            delay: DelayPolicy::Fixed(Duration::from_secs(2)),
        }
    }
}

impl PaymentPolicy {
    /// `success_probability` is clamped to `0.0..=1.0`.
    pub fn new(success_probability: f64, delay: DelayPolicy) -> Self {
        let success_probability = if success_probability.is_nan() {
            0.0
        } else {
            success_probability.clamp(0.0, 1.0)
        };
        Self {
            success_probability,
            delay,
        }
    }

    /// Every submission succeeds immediately.
    pub fn always_approve() -> Self {
        Self::new(1.0, DelayPolicy::Fixed(Duration::ZERO))
    }

    /// Every submission is declined immediately.
    pub fn always_decline() -> Self {
        Self::new(0.0, DelayPolicy::Fixed(Duration::ZERO))
    }

    pub fn success_probability(&self) -> f64 {
        self.success_probability
    }
}

/// Billing fields, stored in their formatted form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaymentDetails {
    pub name: String,
    pub email: String,
    pub invoice: String,
    pub amount: String,
    pub card_number: String,
    pub expiry: String,
    pub cvc: String,
    pub zip: String,
}

impl PaymentDetails {
    /// Apply the as-you-type formatting to every field.
    pub fn normalized(self) -> Self {
        Self {
            card_number: format_card_number(&self.card_number),
            expiry: format_expiry(&self.expiry),
            cvc: format_cvc(&self.cvc),
            zip: format_zip(&self.zip),
            ..self
        }
    }

    /// Number of digits in the card number.
    pub fn card_digits(&self) -> usize {
        self.card_number.chars().filter(char::is_ascii_digit).count()
    }
}

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum PaymentStatus {
    Idle,
    Processing,
    Success { transaction_id: String },
    Error,
}

/// Errors from driving the payment form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentError {
    #[error("{}", INVALID_CARD_MESSAGE)]
    InvalidCardNumber,

    #[error("a payment is already processing")]
    AlreadyProcessing,

    #[error("no payment is processing")]
    NotProcessing,

    #[error("the payment was superseded by a newer submission")]
    Superseded,
}

/// Handle for one processing submission, returned by [`PaymentForm::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentTicket {
    /// How long to wait before completing.
    pub delay: Duration,
    serial: u64,
}

/// The payment form: fields, status and the inline notice.
#[derive(Debug, Clone)]
pub struct PaymentForm {
    pub details: PaymentDetails,
    status: PaymentStatus,
    notice: Option<String>,
    attempts: u32,
    /// Serial of the latest submission; survives resets.
    serial: u64,
}

impl Default for PaymentForm {
    fn default() -> Self {
        Self {
            details: PaymentDetails::default(),
            status: PaymentStatus::Idle,
            notice: None,
            attempts: 0,
            serial: 0,
        }
    }
}

impl PaymentForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &PaymentStatus {
        &self.status
    }

    /// Inline message for the visitor (invalid card, declined).
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Replace the fields with `details`, formatted.
    pub fn fill(&mut self, details: PaymentDetails) {
        self.details = details.normalized();
    }

    /// Validate and enter processing.
    ///
    /// Returns the ticket to hand back to [`complete`](Self::complete) once its
    /// delay has passed. A card number with too few digits is rejected without
    /// ever entering processing.
    pub fn begin(&mut self, policy: &PaymentPolicy) -> Result<PaymentTicket, PaymentError> {
        if self.status == PaymentStatus::Processing {
            return Err(PaymentError::AlreadyProcessing);
        }

        self.notice = None;

        if self.details.card_digits() < MIN_CARD_DIGITS {
            self.status = PaymentStatus::Idle;
            self.notice = Some(INVALID_CARD_MESSAGE.to_string());
            return Err(PaymentError::InvalidCardNumber);
        }

        let delay = policy.delay.delay_for(self.attempts);
        self.attempts = self.attempts.saturating_add(1);
        self.serial += 1;
        self.status = PaymentStatus::Processing;
        info!(invoice = %self.details.invoice, delay_ms = delay.as_millis() as u64, "Payment processing");
        Ok(PaymentTicket {
            delay,
            serial: self.serial,
        })
    }

    /// Draw the outcome of the submission `ticket` was issued for.
    ///
    /// A ticket from before a reset or a later submission is refused and
    /// leaves the form untouched.
    pub fn complete<R: Rng + ?Sized>(
        &mut self,
        ticket: PaymentTicket,
        policy: &PaymentPolicy,
        rng: &mut R,
    ) -> Result<&PaymentStatus, PaymentError> {
        if ticket.serial != self.serial {
            return Err(PaymentError::Superseded);
        }
        if self.status != PaymentStatus::Processing {
            return Err(PaymentError::NotProcessing);
        }

        if rng.gen_bool(policy.success_probability) {
            let transaction_id = format!("TXN-{}", rng.gen_range(0..TRANSACTION_ID_RANGE));
            info!(%transaction_id, "Simulated payment approved");
            self.status = PaymentStatus::Success { transaction_id };
        } else {
            warn!(invoice = %self.details.invoice, "Simulated payment declined");
            self.status = PaymentStatus::Error;
            self.notice = Some(DECLINED_MESSAGE.to_string());
        }

        Ok(&self.status)
    }

    /// Validate, wait out the processing delay, then draw the outcome.
    pub async fn submit<R: Rng + ?Sized>(
        &mut self,
        policy: &PaymentPolicy,
        rng: &mut R,
    ) -> Result<&PaymentStatus, PaymentError> {
        let ticket = self.begin(policy)?;
        tokio::time::sleep(ticket.delay).await;
        self.complete(ticket, policy, rng)
    }

    /// Start a new payment: clear every field and return to idle.
    pub fn reset(&mut self) {
        *self = Self {
            serial: self.serial,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn details(card: &str) -> PaymentDetails {
        PaymentDetails {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            invoice: "INV-1001".to_string(),
            amount: "250.00".to_string(),
            card_number: card.to_string(),
            expiry: "1227".to_string(),
            cvc: "123".to_string(),
            zip: "33319".to_string(),
        }
    }

    #[test]
    fn test_format_card_number() {
        assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
        assert_eq!(format_card_number("4111 1111 11"), "4111 1111 11");
        assert_eq!(format_card_number("4111-1111-1111-1111-9999"), "4111 1111 1111 1111");
        assert_eq!(format_card_number("41"), "41");
        assert_eq!(format_card_number("abc"), "");
    }

    #[test]
    fn test_format_expiry() {
        assert_eq!(format_expiry("1225"), "12/25");
        assert_eq!(format_expiry("12/25"), "12/25");
        assert_eq!(format_expiry("12"), "12/");
        assert_eq!(format_expiry("1"), "1");
        assert_eq!(format_expiry("122599"), "12/25");
    }

    #[test]
    fn test_format_cvc_and_zip() {
        assert_eq!(format_cvc("1a2b3c45"), "1234");
        assert_eq!(format_zip(" 33319-12345 "), "33319-1234");
    }

    #[test]
    fn test_fill_formats_fields() {
        let mut form = PaymentForm::new();
        form.fill(details("4111111111111111"));
        assert_eq!(form.details.card_number, "4111 1111 1111 1111");
        assert_eq!(form.details.expiry, "12/27");
    }

    #[test]
    fn test_short_card_rejected_without_processing() {
        let mut form = PaymentForm::new();
        form.fill(details("41111111111111"));

        let result = form.begin(&PaymentPolicy::default());
        assert_eq!(result, Err(PaymentError::InvalidCardNumber));
        assert_eq!(form.status(), &PaymentStatus::Idle);
        assert_eq!(form.notice(), Some(INVALID_CARD_MESSAGE));
    }

    #[test]
    fn test_fifteen_digits_accepted() {
        let mut form = PaymentForm::new();
        form.fill(details("378282246310005"));

        let ticket = form.begin(&PaymentPolicy::default()).unwrap();
        assert_eq!(ticket.delay, Duration::from_secs(2));
        assert_eq!(form.status(), &PaymentStatus::Processing);
        assert_eq!(form.begin(&PaymentPolicy::default()), Err(PaymentError::AlreadyProcessing));
    }

    #[test]
    fn test_forced_outcomes() {
        let mut rng = StdRng::seed_from_u64(7);

        let mut approved = PaymentForm::new();
        approved.fill(details("4111111111111111"));
        let ticket = approved.begin(&PaymentPolicy::always_approve()).unwrap();
        let status = approved
            .complete(ticket, &PaymentPolicy::always_approve(), &mut rng)
            .unwrap()
            .clone();
        match status {
            PaymentStatus::Success { transaction_id } => {
                let number: u32 = transaction_id.trim_start_matches("TXN-").parse().unwrap();
                assert!(number < 10_000_000);
            }
            other => panic!("expected success, got {:?}", other),
        }

        let mut declined = PaymentForm::new();
        declined.fill(details("4111111111111111"));
        let ticket = declined.begin(&PaymentPolicy::always_decline()).unwrap();
        declined.complete(ticket, &PaymentPolicy::always_decline(), &mut rng).unwrap();
        assert_eq!(declined.status(), &PaymentStatus::Error);
        assert_eq!(declined.notice(), Some(DECLINED_MESSAGE));
    }

    #[test]
    fn test_complete_requires_processing() {
        let policy = PaymentPolicy::always_approve();
        let mut form = PaymentForm::new();
        let mut rng = StdRng::seed_from_u64(1);
        form.fill(details("4111111111111111"));
        let ticket = form.begin(&policy).unwrap();
        form.complete(ticket, &policy, &mut rng).unwrap();

        assert_eq!(
            form.complete(ticket, &policy, &mut rng).unwrap_err(),
            PaymentError::NotProcessing
        );
    }

    #[test]
    fn test_stale_ticket_does_not_finish_newer_submission() {
        let policy = PaymentPolicy::always_approve();
        let mut rng = StdRng::seed_from_u64(5);
        let mut form = PaymentForm::new();

        form.fill(details("4111111111111111"));
        let first = form.begin(&policy).unwrap();
        form.reset();
        form.fill(details("5500000000000004"));
        let second = form.begin(&policy).unwrap();

        assert_eq!(
            form.complete(first, &policy, &mut rng).unwrap_err(),
            PaymentError::Superseded
        );
        assert_eq!(form.status(), &PaymentStatus::Processing);

        form.complete(second, &policy, &mut rng).unwrap();
        assert!(matches!(form.status(), PaymentStatus::Success { .. }));
    }

    #[test]
    fn test_success_rate_roughly_ninety_percent() {
        let policy = PaymentPolicy::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut successes = 0;

        for _ in 0..2_000 {
            let mut form = PaymentForm::new();
            form.fill(details("4111111111111111"));
            let ticket = form.begin(&policy).unwrap();
            if matches!(form.complete(ticket, &policy, &mut rng).unwrap(), PaymentStatus::Success { .. }) {
                successes += 1;
            }
        }

        assert!((1_700..=1_900).contains(&successes), "successes: {}", successes);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_waits_for_delay() {
        let policy = PaymentPolicy::new(1.0, DelayPolicy::Fixed(Duration::from_secs(2)));
        let mut rng = StdRng::seed_from_u64(3);
        let mut form = PaymentForm::new();
        form.fill(details("4111111111111111"));

        let start = tokio::time::Instant::now();
        form.submit(&policy, &mut rng).await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(2));
        assert!(matches!(form.status(), PaymentStatus::Success { .. }));
    }

    #[test]
    fn test_exponential_delay() {
        let policy = DelayPolicy::Exponential {
            base: Duration::from_millis(500),
            max: Duration::from_secs(3),
        };
        assert_eq!(policy.delay_for(0), Duration::from_millis(500));
        assert_eq!(policy.delay_for(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for(3), Duration::from_secs(3));
        assert_eq!(policy.delay_for(40), Duration::from_secs(3));
    }

    #[test]
    fn test_probability_clamped() {
        assert_eq!(PaymentPolicy::new(3.0, DelayPolicy::Fixed(Duration::ZERO)).success_probability(), 1.0);
        assert_eq!(PaymentPolicy::new(-1.0, DelayPolicy::Fixed(Duration::ZERO)).success_probability(), 0.0);
        assert_eq!(PaymentPolicy::new(f64::NAN, DelayPolicy::Fixed(Duration::ZERO)).success_probability(), 0.0);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut form = PaymentForm::new();
        form.fill(details("4111"));
        let _ = form.begin(&PaymentPolicy::default());
        form.reset();

        assert_eq!(form.details, PaymentDetails::default());
        assert_eq!(form.status(), &PaymentStatus::Idle);
        assert!(form.notice().is_none());
    }
}
