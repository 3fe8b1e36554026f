//! Payment simulator routes.

use axum::extract::State;
use axum::response::Redirect;
use axum::Form;
use serde::Deserialize;
use site_core::{PaymentDetails, PaymentError, PaymentStatus, View};
use tower_cookies::Cookies;
use tracing::debug;

use crate::error::{Result, WebError};
use crate::state::AppState;
use crate::templates::{Layout, PaymentTemplate};

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct PaymentInput {
    pub name: String,
    pub email: String,
    pub invoice: String,
    pub amount: String,
    pub card_number: String,
    pub expiry: String,
    pub cvc: String,
    pub zip: String,
}

impl From<PaymentInput> for PaymentDetails {
    fn from(input: PaymentInput) -> Self {
        PaymentDetails {
            name: input.name,
            email: input.email,
            invoice: input.invoice,
            amount: input.amount,
            card_number: input.card_number,
            expiry: input.expiry,
            cvc: input.cvc,
            zip: input.zip,
        }
    }
}

/// Render the payment page.
pub async fn page(State(state): State<AppState>, cookies: Cookies) -> PaymentTemplate {
    let chat_visible = state.chat_visible().await;
    let session = state.sessions.resolve(&cookies).await;
    let mut visitor = session.lock().await;
    visitor.navigator.navigate("payment", None);

    let layout = Layout::new(
        View::Payment,
        &visitor,
        chat_visible,
        "/payment",
    );
    PaymentTemplate::new(layout, &visitor)
}

/// Submit the payment form.
///
/// The session is unlocked while the simulated processing delay runs.
pub async fn submit(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(input): Form<PaymentInput>,
) -> Result<Redirect> {
    let session = state.sessions.resolve(&cookies).await;

    let ticket = {
        let mut visitor = session.lock().await;
        if visitor.payment.status() == &PaymentStatus::Processing {
            return Err(WebError::Conflict(PaymentError::AlreadyProcessing.to_string()));
        }

        visitor.payment.fill(input.into());
        match visitor.payment.begin(&state.payment_policy) {
            Ok(ticket) => ticket,
            Err(PaymentError::InvalidCardNumber) => return Ok(Redirect::to("/payment")),
            Err(err) => return Err(WebError::Conflict(err.to_string())),
        }
    };

    tokio::time::sleep(ticket.delay).await;

    let mut rng = state.rng.lock().await;
    let mut visitor = session.lock().await;
    if let Err(err) = visitor.payment.complete(ticket, &state.payment_policy, &mut *rng) {
        // The visitor reset or resubmitted the form while this one slept.
        debug!(error = %err, "Payment outcome discarded");
    }

    Ok(Redirect::to("/payment"))
}

/// Start over with an empty form.
pub async fn reset(State(state): State<AppState>, cookies: Cookies) -> Redirect {
    let session = state.sessions.resolve(&cookies).await;
    session.lock().await.payment.reset();
    Redirect::to("/payment")
}
