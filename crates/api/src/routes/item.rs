//! Route definitions for an item collection.

use axum::routing::get;
use axum::{Extension, Router};
use storefront_core::collection::Collection;

use crate::handlers::item;
use crate::state::AppState;

/// Item routes for one collection, mounted at `/{collection.path}`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> replace
/// PATCH  /{id}          -> update
/// DELETE /{id}          -> delete
/// GET    /{id}/image    -> get_image
/// ```
pub fn router(collection: Collection) -> Router<AppState> {
    Router::new()
        .route("/", get(item::list).post(item::create))
        .route(
            "/{id}",
            get(item::get_by_id)
                .put(item::replace)
                .patch(item::update)
                .delete(item::delete),
        )
        .route("/{id}/image", get(item::get_image))
        .layer(Extension(collection))
}
