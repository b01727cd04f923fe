use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::models::contact::{FieldIssue, ValidationFailure};

#[derive(Serialize)]
pub struct JsonResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldIssue>,
}

impl JsonResponse {
    fn error(msg: &str, fields: Vec<FieldIssue>) -> Self {
        JsonResponse {
            message: None,
            error: Some(msg.to_string()),
            fields,
        }
    }

    pub fn success(msg: &str) -> impl IntoResponse {
        (
            StatusCode::OK,
            Json(JsonResponse {
                message: Some(msg.to_string()),
                error: None,
                fields: Vec::new(),
            }),
        )
    }

    pub fn bad_request(msg: &str) -> impl IntoResponse {
        (
            StatusCode::BAD_REQUEST,
            Json(JsonResponse::error(msg, Vec::new())),
        )
    }

    pub fn invalid_submission(failure: &ValidationFailure) -> impl IntoResponse {
        (
            StatusCode::BAD_REQUEST,
            Json(JsonResponse::error(
                "Invalid submission",
                failure.issues.clone(),
            )),
        )
    }

    pub fn server_error(msg: &str) -> impl IntoResponse {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(JsonResponse::error(msg, Vec::new())),
        )
    }
}
