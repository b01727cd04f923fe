use axum::{
    debug_handler,
    extract::{rejection::JsonRejection, Json, State},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::info;

use crate::responses::JsonResponse;
use crate::services::contact::{process_submission, ContactError};
use crate::state::AppState;

pub const DELIVERY_SUCCEEDED: &str = "Email sent successfully!";
pub const DELIVERY_FAILED: &str = "Failed to send email";

#[debug_handler]
pub async fn handle_send_email(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(raw) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            info!(reason = %rejection.body_text(), "contact request body rejected");
            return JsonResponse::bad_request("Invalid JSON body").into_response();
        }
    };

    match process_submission(&raw, &state.config.relay, state.mailer.as_ref()).await {
        Ok(()) => JsonResponse::success(DELIVERY_SUCCEEDED).into_response(),
        Err(ContactError::Rejected(failure)) => {
            JsonResponse::invalid_submission(&failure).into_response()
        }
        Err(ContactError::Failed(_)) => JsonResponse::server_error(DELIVERY_FAILED).into_response(),
    }
}
