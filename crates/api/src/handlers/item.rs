//! Handlers for the item collections (products, shoes).
//!
//! One handler set serves every collection; the [`Collection`] is attached
//! to each mounted router as an `Extension`. Every handler issues exactly one
//! repository call.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::Serialize;
use storefront_core::collection::Collection;
use storefront_core::error::CoreError;
use storefront_core::image::content_type_or_default;
use storefront_core::types::DbId;
use storefront_db::models::item::Item;
use storefront_db::repositories::ItemRepo;

use crate::error::{AppError, AppResult};
use crate::form::ItemForm;
use crate::state::AppState;

/// Body returned by a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

fn not_found(collection: &Collection, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: collection.label,
        id,
    })
}

/// POST /{collection}
pub async fn create(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    form: ItemForm,
) -> AppResult<(StatusCode, Json<Item>)> {
    let input = form.into_create()?;
    let item = ItemRepo::create(&state.pool, &collection, &input)
        .await
        .map_err(|e| AppError::storage(format!("Failed to create {}", collection.noun), e))?;

    tracing::info!(
        collection = collection.path,
        id = item.id,
        has_image = item.image.is_some(),
        "Item created"
    );
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /{collection}
///
/// Returns every row ordered by id; images are base64 text.
pub async fn list(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
) -> AppResult<Json<Vec<Item>>> {
    let items = ItemRepo::list(&state.pool, &collection)
        .await
        .map_err(|e| AppError::storage(format!("Failed to fetch {}", collection.path), e))?;
    Ok(Json(items))
}

/// GET /{collection}/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Item>> {
    let item = ItemRepo::find_by_id(&state.pool, &collection, id)
        .await?
        .ok_or_else(|| not_found(&collection, id))?;
    Ok(Json(item))
}

/// GET /{collection}/{id}/image
///
/// Serves the stored bytes with the stored MIME type. 404 when the row or its
/// image is missing.
pub async fn get_image(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let stored = ItemRepo::find_image(&state.pool, &collection, id)
        .await
        .map_err(|e| AppError::storage("Failed to fetch image", e))?;

    let Some((bytes, mimetype)) = stored.and_then(|s| s.image.map(|bytes| (bytes, s.mimetype)))
    else {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Image",
            id,
        }));
    };

    let content_type = content_type_or_default(mimetype.as_deref()).to_string();
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_LENGTH, bytes.len().to_string()),
        ],
        bytes,
    )
        .into_response())
}

/// PATCH /{collection}/{id}
///
/// Omitted fields keep their stored values.
pub async fn update(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Path(id): Path<DbId>,
    form: ItemForm,
) -> AppResult<Json<Item>> {
    let input = form.into_update()?;
    let item = ItemRepo::update(&state.pool, &collection, id, &input)
        .await
        .map_err(|e| AppError::storage(format!("Failed to update {}", collection.noun), e))?
        .ok_or_else(|| not_found(&collection, id))?;

    tracing::info!(collection = collection.path, id, "Item updated");
    Ok(Json(item))
}

/// PUT /{collection}/{id}
///
/// Every field is set to the submitted value; an absent image clears it.
pub async fn replace(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Path(id): Path<DbId>,
    form: ItemForm,
) -> AppResult<Json<Item>> {
    let input = form.into_create()?;
    let item = ItemRepo::replace(&state.pool, &collection, id, &input)
        .await
        .map_err(|e| AppError::storage(format!("Failed to replace {}", collection.noun), e))?
        .ok_or_else(|| not_found(&collection, id))?;

    tracing::info!(collection = collection.path, id, "Item replaced");
    Ok(Json(item))
}

/// DELETE /{collection}/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DeleteResponse>> {
    let deleted = ItemRepo::delete(&state.pool, &collection, id)
        .await
        .map_err(|e| AppError::storage(format!("Failed to delete {}", collection.noun), e))?;

    if !deleted {
        return Err(not_found(&collection, id));
    }

    tracing::info!(collection = collection.path, id, "Item deleted");
    Ok(Json(DeleteResponse {
        message: collection.deleted_message(),
    }))
}
