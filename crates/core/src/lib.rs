//! Domain types shared by the storefront database and API crates.

pub mod collection;
pub mod error;
pub mod image;
pub mod types;
