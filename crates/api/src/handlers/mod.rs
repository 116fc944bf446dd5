//! Request handlers.
//!
//! Handlers delegate to the repositories in `storefront_db` and map errors
//! via [`AppError`](crate::error::AppError).

pub mod item;
