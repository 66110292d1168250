//! Sale use-case endpoints.
//!
//! ```text
//! POST /api/sales                                   create       → 201
//! GET  /api/sales/{id}                              get          → 200
//! PUT  /api/sales/{id}                              replace      → 204
//! POST /api/sales/{id}/cancel                       cancel_sale  → 204
//! POST /api/sales/{id}/items/{productName}/cancel   cancel_item  → 204
//! ```

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use sales_core::{Sale, SaleDraft, SaleService, SaleStore, SaleView};
use uuid::Uuid;

use crate::error::{ApiError, ApiJson};

/// Shared application state accessible from all handlers.
pub struct AppState<S> {
    pub service: SaleService<S>,
}

impl<S: SaleStore> AppState<S> {
    pub fn new(service: SaleService<S>) -> Self {
        AppState { service }
    }
}

/// POST /api/sales: record a new sale.
///
/// Responds with the stored sale (no derived amounts) and its location.
#[tracing::instrument(skip(state, draft))]
pub async fn create<S: SaleStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    ApiJson(draft): ApiJson<SaleDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let sale: Sale = state.service.create(draft).await?;
    let location = format!("/api/sales/{}", sale.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(sale)))
}

/// GET /api/sales/{id}: priced projection of a sale.
#[tracing::instrument(skip(state))]
pub async fn get<S: SaleStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SaleView>, ApiError> {
    Ok(Json(state.service.get(id).await?))
}

/// PUT /api/sales/{id}: overwrite a sale and its full item set.
#[tracing::instrument(skip(state, draft))]
pub async fn replace<S: SaleStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<Uuid>,
    ApiJson(draft): ApiJson<SaleDraft>,
) -> Result<StatusCode, ApiError> {
    state.service.replace(id, draft).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/sales/{id}/cancel
#[tracing::instrument(skip(state))]
pub async fn cancel_sale<S: SaleStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.service.cancel_sale(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/sales/{id}/items/{productName}/cancel: drop the first line
/// with that exact product name.
#[tracing::instrument(skip(state))]
pub async fn cancel_item<S: SaleStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path((id, product_name)): Path<(Uuid, String)>,
) -> Result<StatusCode, ApiError> {
    state.service.cancel_item(id, &product_name).await?;
    Ok(StatusCode::NO_CONTENT)
}
