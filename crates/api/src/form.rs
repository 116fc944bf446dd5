//! Item request body extraction.
//!
//! Write routes accept `multipart/form-data` (with an optional `image` file
//! part), `application/json`, or `application/x-www-form-urlencoded`. All
//! three are collected into an [`ItemForm`] of raw text values, which is then
//! coerced into a create or update DTO.

use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::{Form, Json};
use serde::Deserialize;
use storefront_core::image::DEFAULT_MIMETYPE;
use storefront_db::models::item::{CreateItem, ImageUpload, UpdateItem};

use crate::error::{AppError, AppResult};

/// Raw item fields as submitted by the client, before numeric coercion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub quantity: Option<String>,
    pub image: Option<ImageUpload>,
}

/// Text-only body shape shared by the URL-encoded path.
#[derive(Debug, Deserialize)]
struct TextFields {
    name: Option<String>,
    description: Option<String>,
    price: Option<String>,
    quantity: Option<String>,
}

/// JSON body shape. Numeric fields may arrive as numbers or strings.
#[derive(Debug, Deserialize)]
struct JsonFields {
    name: Option<String>,
    description: Option<String>,
    price: Option<serde_json::Value>,
    quantity: Option<serde_json::Value>,
}

impl<S> FromRequest<S> for ItemForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| {
                v.split(';')
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_ascii_lowercase()
            });

        match content_type.as_deref() {
            Some("multipart/form-data") => {
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| body_error(e.status(), e.body_text()))?;
                Self::from_multipart(multipart).await
            }
            Some("application/json") => {
                let Json(fields) = Json::<JsonFields>::from_request(req, state)
                    .await
                    .map_err(|e| body_error(e.status(), e.body_text()))?;
                Ok(Self {
                    name: fields.name,
                    description: fields.description,
                    price: json_scalar("price", fields.price)?,
                    quantity: json_scalar("quantity", fields.quantity)?,
                    image: None,
                })
            }
            Some("application/x-www-form-urlencoded") => {
                let Form(fields) = Form::<TextFields>::from_request(req, state)
                    .await
                    .map_err(|e| body_error(e.status(), e.body_text()))?;
                Ok(Self {
                    name: fields.name,
                    description: fields.description,
                    price: fields.price,
                    quantity: fields.quantity,
                    image: None,
                })
            }
            // A bodiless request submits nothing.
            None => Ok(Self::default()),
            Some(other) => Err(AppError::UnsupportedMediaType(format!(
                "Expected multipart/form-data, application/json or \
                 application/x-www-form-urlencoded, got '{other}'"
            ))),
        }
    }
}

impl ItemForm {
    /// Collect text fields and the single `image` file part from a multipart body.
    ///
    /// An `image` part with an empty body (a form submitted without choosing a
    /// file) counts as no image. Unknown fields are ignored.
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "image" => {
                    let mimetype = field
                        .content_type()
                        .unwrap_or(DEFAULT_MIMETYPE)
                        .to_string();
                    let bytes = field.bytes().await.map_err(multipart_error)?;
                    form.image = (!bytes.is_empty()).then(|| ImageUpload {
                        bytes: bytes.to_vec(),
                        mimetype,
                    });
                }
                "name" | "description" | "price" | "quantity" => {
                    let text = field.text().await.map_err(multipart_error)?;
                    let slot = match name.as_str() {
                        "name" => &mut form.name,
                        "description" => &mut form.description,
                        "price" => &mut form.price,
                        _ => &mut form.quantity,
                    };
                    *slot = Some(text);
                }
                _ => {} // ignore unknown fields
            }
        }

        Ok(form)
    }

    /// Coerce into a DTO for create or full replace.
    ///
    /// `name`, `price` and `quantity` are required; `description` and `image`
    /// are stored as `NULL` when absent.
    pub fn into_create(self) -> AppResult<CreateItem> {
        let name = self.name.ok_or_else(|| missing("name"))?;
        let price = parse_price(self.price.as_deref().ok_or_else(|| missing("price"))?)?;
        let quantity =
            parse_quantity(self.quantity.as_deref().ok_or_else(|| missing("quantity"))?)?;

        Ok(CreateItem {
            name,
            description: self.description,
            price,
            quantity,
            image: self.image,
        })
    }

    /// Coerce into a DTO for partial update.
    ///
    /// Empty `price` / `quantity` values count as not provided.
    pub fn into_update(self) -> AppResult<UpdateItem> {
        let price = non_empty(self.price).map(|p| parse_price(&p)).transpose()?;
        let quantity = non_empty(self.quantity)
            .map(|q| parse_quantity(&q))
            .transpose()?;

        Ok(UpdateItem {
            name: self.name,
            description: self.description,
            price,
            quantity,
            image: self.image,
        })
    }
}

/// Map a body rejection to 413 when the upload limit was hit, else 400.
fn body_error(status: StatusCode, text: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(text)
    } else {
        AppError::BadRequest(text)
    }
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> AppError {
    body_error(err.status(), err.body_text())
}

fn json_scalar(field: &'static str, value: Option<serde_json::Value>) -> AppResult<Option<String>> {
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        // Whole-valued floats (`5.0`) read as integers.
        Some(serde_json::Value::Number(n)) => Ok(Some(
            n.as_f64()
                .filter(|f| n.is_f64() && f.fract() == 0.0)
                .map(|f| format!("{f:.0}"))
                .unwrap_or_else(|| n.to_string()),
        )),
        Some(_) => Err(AppError::BadRequest(format!(
            "Field '{field}' must be a number or a string"
        ))),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn missing(field: &str) -> AppError {
    AppError::BadRequest(format!("Missing required field '{field}'"))
}

fn parse_price(raw: &str) -> AppResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
        .ok_or_else(|| AppError::BadRequest(format!("Field 'price' must be a number, got '{raw}'")))
}

fn parse_quantity(raw: &str) -> AppResult<i32> {
    raw.trim().parse::<i32>().map_err(|_| {
        AppError::BadRequest(format!("Field 'quantity' must be an integer, got '{raw}'"))
    })
}
