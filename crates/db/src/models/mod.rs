//! Domain model structs and DTOs.
//!
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts and full replacements
//! - An update DTO (all `Option` fields) for patches

pub mod item;
