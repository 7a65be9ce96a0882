//! Inbound SMS webhook route.

use axum::extract::State;
use axum::{Form, Json};
use serde::Serialize;
use tracing::info;

use sms_gateway::InboundSms;

use crate::error::Result;
use crate::state::AppState;

/// Reply returned to the webhook caller.
#[derive(Serialize)]
pub struct SmsReply {
    pub reply: String,
}

/// Handle an inbound Twilio SMS webhook.
///
/// Twilio posts the full form-encoded parameter set; only the sender and
/// body are used.
pub async fn receive_sms(
    State(state): State<AppState>,
    Form(inbound): Form<InboundSms>,
) -> Result<Json<SmsReply>> {
    info!("Inbound SMS from {}", inbound.from);

    let reply = state
        .orchestrator
        .handle_inbound(&inbound.from, &inbound.body)
        .await?;

    Ok(Json(SmsReply { reply }))
}
