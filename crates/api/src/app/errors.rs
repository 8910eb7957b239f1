use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockroom_core::LedgerError;

pub fn ledger_error_to_response(err: LedgerError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        LedgerError::InvalidQuantity(_) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_quantity", message)
        }
        LedgerError::Validation(_) => json_error(StatusCode::BAD_REQUEST, "validation_error", message),
        LedgerError::InvalidId(_) => json_error(StatusCode::BAD_REQUEST, "invalid_id", message),
        LedgerError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        LedgerError::Busy(_) => json_error(StatusCode::CONFLICT, "operation_in_flight", message),
        LedgerError::ExceedsAvailable { .. } => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "exceeds_available", message)
        }
        LedgerError::Persistence(_) => {
            json_error(StatusCode::BAD_GATEWAY, "persistence_failure", message)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
