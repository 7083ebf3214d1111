use crate::handler::AppModule;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use self::{book::*, index::*};

mod book;
mod index;

pub fn router(module: AppModule) -> Router {
    Router::new()
        .route_index()
        .route_book()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(module)
}
