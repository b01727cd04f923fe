pub mod contact;

use std::any::Any;

use axum::{
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::error;

use crate::responses::JsonResponse;
use crate::state::AppState;
use contact::{handle_send_email, DELIVERY_FAILED};

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/send-email", post(handle_send_email))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// A simple root route.
async fn root() -> Response {
    JsonResponse::success("Tempest contact service is running").into_response()
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = %detail, "request handler panicked");

    JsonResponse::server_error(DELIVERY_FAILED).into_response()
}
