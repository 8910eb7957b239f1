use axum::Router;

pub mod activity;
pub mod records;
pub mod system;

pub fn router() -> Router {
    Router::new()
        .nest("/inventory", records::router())
        .nest("/activity", activity::router())
}
