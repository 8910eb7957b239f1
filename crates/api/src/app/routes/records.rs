use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use stockroom_core::RecordId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/records", get(list_records).post(add_stock))
        .route("/records/:id", get(get_record).delete(delete_record))
        .route("/records/:id/issue", post(issue_stock))
        .route("/records/:id/return", post(return_stock))
        .route("/summary", get(get_summary))
}

pub async fn list_records(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let now = Utc::now();
    let records: Vec<_> = services
        .ledger()
        .list_records()
        .iter()
        .map(|r| dto::record_json(r, now))
        .collect();

    Json(records).into_response()
}

pub async fn get_record(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: RecordId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::ledger_error_to_response(e),
    };

    match services.ledger().get_record(id) {
        Ok(record) => Json(dto::record_json(&record, Utc::now())).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn add_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::AddStockRequest>,
) -> axum::response::Response {
    let now = Utc::now();
    match services.ledger().add_stock(body.into_new_record(), now) {
        Ok(record) => (
            StatusCode::CREATED,
            Json(dto::record_json(&record, now)),
        )
            .into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn issue_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::IssueRequest>,
) -> axum::response::Response {
    let id: RecordId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::ledger_error_to_response(e),
    };

    let now = Utc::now();
    match services.ledger().issue(id, body.quantity, now) {
        Ok(outcome) => Json(serde_json::json!({
            "record": dto::record_json(&outcome.record, now),
            "entry": outcome.entry,
        }))
        .into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn return_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: RecordId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::ledger_error_to_response(e),
    };

    match services.ledger().return_stock(id, Utc::now()) {
        Ok(outcome) => Json(serde_json::json!({
            "id": outcome.record_id,
            "removed_qty": outcome.removed_qty,
            "entry": outcome.entry,
        }))
        .into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn delete_record(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: RecordId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::ledger_error_to_response(e),
    };

    match services.ledger().delete_record(id, Utc::now()) {
        Ok(outcome) => Json(serde_json::json!({
            "id": outcome.record_id,
            "removed_qty": outcome.removed_qty,
            "entry": outcome.entry,
        }))
        .into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn get_summary(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    Json(services.ledger().summary(Utc::now())).into_response()
}
