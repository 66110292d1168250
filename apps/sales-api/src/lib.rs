//! HTTP API for the sales ledger.
//!
//! Routes the five sale use-cases onto a [`SaleService`], with request
//! tracing and permissive CORS. The router is generic over the store, so
//! tests drive it with [`InMemorySaleStore`](sales_core::store::InMemorySaleStore)
//! and the binary with SQLite.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use sales_core::{SaleService, SaleStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use routes::sales::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: SaleStore + 'static>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route("/health", get(routes::health::check::<S>))
        .route("/api/sales", post(routes::sales::create::<S>))
        .route(
            "/api/sales/{id}",
            get(routes::sales::get::<S>).put(routes::sales::replace::<S>),
        )
        .route("/api/sales/{id}/cancel", post(routes::sales::cancel_sale::<S>))
        .route(
            "/api/sales/{id}/items/{product_name}/cancel",
            post(routes::sales::cancel_item::<S>),
        )
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Wraps a service into shared router state.
pub fn create_state<S: SaleStore + 'static>(service: SaleService<S>) -> Arc<AppState<S>> {
    Arc::new(AppState::new(service))
}
