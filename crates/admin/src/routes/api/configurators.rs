//! Configurator API handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
};
use serde::Deserialize;
use stepcart_core::{ConfiguratorDefinition, PageId};
use tracing::instrument;

use crate::{
    error::AppError,
    render::render_document,
    repository::{DEFAULT_PAGE_SIZE, Direction, ListRequest, Listing, Published, StoredConfigurator},
    state::AppState,
};

/// Build the configurators router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/configurators", get(list).post(create))
        .route("/api/configurators/preview", post(preview))
        .route(
            "/api/configurators/{id}",
            get(show).put(update).delete(delete),
        )
}

/// Query parameters for the listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub cursor: Option<String>,
    pub direction: Option<Direction>,
    pub page_size: Option<i64>,
}

/// List configurators, one page at a time.
///
/// # Errors
///
/// Returns 400 for a cursor used in the wrong direction.
#[instrument(skip_all)]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Listing>, AppError> {
    let request = ListRequest {
        page_size: query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        cursor: query.cursor.filter(|c| !c.is_empty()),
        direction: query.direction.unwrap_or_default(),
    };
    Ok(Json(state.repository().list(request).await?))
}

/// Publish a new configurator.
///
/// # Errors
///
/// Returns 422 for an invalid definition or store field errors.
#[instrument(skip_all, fields(title = %definition.title))]
pub async fn create(
    State(state): State<AppState>,
    Json(definition): Json<ConfiguratorDefinition>,
) -> Result<(StatusCode, Json<Published>), AppError> {
    let published = state.repository().create(&definition).await?;
    Ok((StatusCode::CREATED, Json(published)))
}

/// Render a definition without storing it.
///
/// # Errors
///
/// Returns 422 for an invalid definition.
#[instrument(skip_all, fields(title = %definition.title))]
pub async fn preview(
    Json(definition): Json<ConfiguratorDefinition>,
) -> Result<Html<String>, AppError> {
    definition.validate()?;
    Ok(Html(render_document(&definition)?))
}

/// Load a configurator's definition.
///
/// # Errors
///
/// Returns 404 for an unknown id and 422 for a page that is not a
/// configurator.
#[instrument(skip_all)]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<StoredConfigurator>, AppError> {
    let id = PageId::from_numeric(id);
    Ok(Json(state.repository().get(&id).await?))
}

/// Overwrite a configurator.
///
/// # Errors
///
/// Returns 422 for an invalid definition and 404 for an unknown id.
#[instrument(skip_all, fields(title = %definition.title))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(definition): Json<ConfiguratorDefinition>,
) -> Result<Json<Published>, AppError> {
    let id = PageId::from_numeric(id);
    Ok(Json(state.repository().update(&id, &definition).await?))
}

/// Delete a configurator.
///
/// # Errors
///
/// Returns 404 for an unknown id.
#[instrument(skip_all)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = state
        .repository()
        .delete(&PageId::from_numeric(id))
        .await?;
    Ok(Json(serde_json::json!({ "deletedId": deleted })))
}
