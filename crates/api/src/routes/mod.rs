pub mod health;
pub mod item;

use axum::Router;
use storefront_core::collection::Collection;

use crate::state::AppState;

/// Build the item route tree, one nested router per collection.
///
/// ```text
/// /products                 list, create
/// /products/{id}            get, replace, update, delete
/// /products/{id}/image      raw image bytes
///
/// /shoes                    (same shape as /products)
/// ```
pub fn api_routes() -> Router<AppState> {
    Collection::ALL
        .into_iter()
        .fold(Router::new(), |router, collection| {
            router.nest(&format!("/{}", collection.path), item::router(collection))
        })
}
