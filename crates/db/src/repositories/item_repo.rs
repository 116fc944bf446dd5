//! Repository for the `products` and `shoes` tables.
//!
//! Every method issues exactly one statement. The table name comes from a
//! static [`Collection`] and is the only interpolated part of the SQL; all
//! values are bound.

use sqlx::PgPool;
use storefront_core::collection::Collection;
use storefront_core::types::DbId;

use crate::models::item::{CreateItem, Item, StoredImage, UpdateItem};

/// Column list for item queries.
const COLUMNS: &str = "id, name, description, price, quantity, image, mimetype";

/// Provides data access for item collections.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new item, returning the created row with its generated id.
    pub async fn create(
        pool: &PgPool,
        collection: &Collection,
        dto: &CreateItem,
    ) -> Result<Item, sqlx::Error> {
        let query = format!(
            "INSERT INTO {table} (name, description, price, quantity, image, mimetype) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}",
            table = collection.table,
        );
        let (image, mimetype) = dto.image_parts();
        sqlx::query_as::<_, Item>(&query)
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(dto.price)
            .bind(dto.quantity)
            .bind(image)
            .bind(mimetype)
            .fetch_one(pool)
            .await
    }

    /// List every item in the collection, ordered by id.
    pub async fn list(pool: &PgPool, collection: &Collection) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {table} ORDER BY id",
            table = collection.table,
        );
        sqlx::query_as::<_, Item>(&query).fetch_all(pool).await
    }

    /// Find an item by its id.
    pub async fn find_by_id(
        pool: &PgPool,
        collection: &Collection,
        id: DbId,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {table} WHERE id = $1",
            table = collection.table,
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch only the image columns of an item.
    ///
    /// Returns `None` if the row does not exist; a row without an image
    /// yields `Some` with both fields `None`.
    pub async fn find_image(
        pool: &PgPool,
        collection: &Collection,
        id: DbId,
    ) -> Result<Option<StoredImage>, sqlx::Error> {
        let query = format!(
            "SELECT image, mimetype FROM {table} WHERE id = $1",
            table = collection.table,
        );
        sqlx::query_as::<_, StoredImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Partially update an item.
    ///
    /// Uses `COALESCE` so only provided fields are changed. A new image
    /// replaces `image` and `mimetype` together.
    pub async fn update(
        pool: &PgPool,
        collection: &Collection,
        id: DbId,
        dto: &UpdateItem,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!(
            "UPDATE {table} SET \
                 name = COALESCE($2, name), \
                 description = COALESCE($3, description), \
                 price = COALESCE($4, price), \
                 quantity = COALESCE($5, quantity), \
                 image = COALESCE($6, image), \
                 mimetype = CASE WHEN $6::BYTEA IS NULL THEN mimetype ELSE $7 END \
             WHERE id = $1 \
             RETURNING {COLUMNS}",
            table = collection.table,
        );
        let (image, mimetype) = dto.image_parts();
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(dto.price)
            .bind(dto.quantity)
            .bind(image)
            .bind(mimetype)
            .fetch_optional(pool)
            .await
    }

    /// Replace every field of an item. An absent image clears both image columns.
    pub async fn replace(
        pool: &PgPool,
        collection: &Collection,
        id: DbId,
        dto: &CreateItem,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!(
            "UPDATE {table} SET \
                 name = $2, \
                 description = $3, \
                 price = $4, \
                 quantity = $5, \
                 image = $6, \
                 mimetype = $7 \
             WHERE id = $1 \
             RETURNING {COLUMNS}",
            table = collection.table,
        );
        let (image, mimetype) = dto.image_parts();
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(dto.price)
            .bind(dto.quantity)
            .bind(image)
            .bind(mimetype)
            .fetch_optional(pool)
            .await
    }

    /// Delete an item by id.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(
        pool: &PgPool,
        collection: &Collection,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {table} WHERE id = $1", table = collection.table);
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
