//! Item models and DTOs.
//!
//! Products and shoes share this row shape; which table a value belongs to is
//! decided by the [`Collection`](storefront_core::collection::Collection)
//! passed to the repository.

use serde::Serialize;
use sqlx::FromRow;
use storefront_core::image::serialize_base64_opt;
use storefront_core::types::DbId;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `products` or `shoes` table.
///
/// `image` serializes as base64 text so every JSON response is safe to embed
/// in a document; the raw bytes are only served by the image route.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i32,
    #[serde(serialize_with = "serialize_base64_opt")]
    pub image: Option<Vec<u8>>,
    pub mimetype: Option<String>,
}

/// The `image` and `mimetype` columns of a single row.
#[derive(Debug, Clone, FromRow)]
pub struct StoredImage {
    pub image: Option<Vec<u8>>,
    pub mimetype: Option<String>,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// An uploaded image held in memory for the duration of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub mimetype: String,
}

/// DTO for inserting a new item or replacing every field of an existing one.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateItem {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i32,
    pub image: Option<ImageUpload>,
}

/// DTO for partially updating an item. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
    pub image: Option<ImageUpload>,
}

impl CreateItem {
    /// Image bytes and MIME type as bind parameters, always both or neither.
    pub fn image_parts(&self) -> (Option<&[u8]>, Option<&str>) {
        split_image(self.image.as_ref())
    }
}

impl UpdateItem {
    /// Image bytes and MIME type as bind parameters, always both or neither.
    pub fn image_parts(&self) -> (Option<&[u8]>, Option<&str>) {
        split_image(self.image.as_ref())
    }
}

fn split_image(image: Option<&ImageUpload>) -> (Option<&[u8]>, Option<&str>) {
    match image {
        Some(upload) => (Some(upload.bytes.as_slice()), Some(upload.mimetype.as_str())),
        None => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(image: Option<Vec<u8>>) -> Item {
        Item {
            id: 7,
            name: "Shirt".into(),
            description: None,
            price: 19.99,
            quantity: 5,
            image,
            mimetype: None,
        }
    }

    #[test]
    fn item_serializes_image_as_base64() {
        let mut row = item(Some(vec![0xff, 0x00, 0x10]));
        row.mimetype = Some("image/png".into());
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["image"], "/wAQ");
        assert_eq!(json["mimetype"], "image/png");
        assert_eq!(json["price"], 19.99);
        assert_eq!(json["quantity"], 5);
    }

    #[test]
    fn item_without_image_serializes_null() {
        let json = serde_json::to_value(item(None)).unwrap();
        assert!(json["image"].is_null());
        assert!(json["mimetype"].is_null());
    }

    #[test]
    fn image_parts_are_paired() {
        let dto = UpdateItem {
            image: Some(ImageUpload {
                bytes: vec![1, 2],
                mimetype: "image/jpeg".into(),
            }),
            ..Default::default()
        };
        assert_eq!(dto.image_parts(), (Some(&[1u8, 2][..]), Some("image/jpeg")));
        assert_eq!(UpdateItem::default().image_parts(), (None, None));
    }
}
