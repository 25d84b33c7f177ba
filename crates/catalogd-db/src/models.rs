//! Rust structs mapping to database tables.
//!
//! Each model implements `from_row` for constructing itself from a
//! `rusqlite::Row`.

use serde::Serialize;

/// One catalog entry: a name, a category, and a reference to an image blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub category: String,
    /// Filename of the image blob in the image store, by convention
    /// `<hex sha256>.jpg`. Not enforced by a foreign key.
    pub image_id: String,
}

impl Item {
    /// Build from a row selected as: id, name, category, image_id.
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            category: row.get(2)?,
            image_id: row.get(3)?,
        })
    }
}
