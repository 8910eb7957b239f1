use std::sync::Arc;

use axum::{
    extract::Extension,
    response::sse::Event as SseEvent,
    routing::get,
    Json, Router,
};

use crate::app::services::{self, AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_activity))
        .route("/stream", get(stream_activity))
}

/// Capped activity log, newest first.
pub async fn list_activity(
    Extension(services): Extension<Arc<AppServices>>,
) -> Json<Vec<stockroom_ledger::ActivityEntry>> {
    Json(services.ledger().activity())
}

pub async fn stream_activity(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Sse<impl tokio_stream::Stream<Item = Result<SseEvent, std::convert::Infallible>>>
{
    services::activity_sse_stream(services)
}
