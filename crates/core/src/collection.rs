//! Resource collections served by the gateway.
//!
//! Products and shoes share one row shape and one handler set; a
//! [`Collection`] carries everything that differs between them. The table
//! name is the only value ever interpolated into SQL text, so it must stay a
//! compile-time constant.

/// Static description of one item collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collection {
    /// URL segment the collection is mounted under (without leading slash).
    pub path: &'static str,
    /// Backing PostgreSQL table.
    pub table: &'static str,
    /// Capitalised singular used in client-facing messages (`"Product"`).
    pub label: &'static str,
    /// Lowercase singular used in log and error text (`"product"`).
    pub noun: &'static str,
}

impl Collection {
    pub const PRODUCTS: Collection = Collection {
        path: "products",
        table: "products",
        label: "Product",
        noun: "product",
    };

    pub const SHOES: Collection = Collection {
        path: "shoes",
        table: "shoes",
        label: "Shoe",
        noun: "shoe",
    };

    /// Every collection the gateway mounts.
    pub const ALL: [Collection; 2] = [Collection::PRODUCTS, Collection::SHOES];

    /// Message returned after a successful delete.
    pub fn deleted_message(&self) -> String {
        format!("{} deleted successfully", self.label)
    }
}
