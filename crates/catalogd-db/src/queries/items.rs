//! Item insert, lookup, list, search, and delete operations.
//!
//! Every statement here is parameterized; user-supplied text never reaches
//! the SQL string itself.

use rusqlite::Connection;

use catalogd_core::{Error, Result};

use crate::models::Item;

/// Column list used in SELECT statements.
const COLS: &str = "id, name, category, image_id";

/// Insert a new item and return the stored row.
///
/// Name and category are caller-supplied and unvalidated; empty strings are
/// accepted.
pub fn insert_item(conn: &Connection, name: &str, category: &str, image_id: &str) -> Result<Item> {
    conn.execute(
        "INSERT INTO items (name, category, image_id) VALUES (?1, ?2, ?3)",
        rusqlite::params![name, category, image_id],
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(Item {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        category: category.to_string(),
        image_id: image_id.to_string(),
    })
}

/// Get an item by ID.
pub fn get_item(conn: &Connection, id: i64) -> Result<Option<Item>> {
    let q = format!("SELECT {COLS} FROM items WHERE id = ?1");
    let result = conn.query_row(&q, [id], Item::from_row);
    match result {
        Ok(i) => Ok(Some(i)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// List all items in storage order.
pub fn list_items(conn: &Connection) -> Result<Vec<Item>> {
    let q = format!("SELECT {COLS} FROM items");
    let mut stmt = conn
        .prepare(&q)
        .map_err(|e| Error::database(e.to_string()))?;
    let rows = stmt
        .query_map([], Item::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(rows)
}

/// Search items whose name contains `keyword` as a literal substring.
///
/// The keyword is bound as a LIKE pattern with `%`, `_`, and `\` escaped so
/// wildcard characters in the input match themselves.
pub fn search_items(conn: &Connection, keyword: &str) -> Result<Vec<Item>> {
    let escaped = keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    let pattern = format!("%{escaped}%");

    let q = format!("SELECT {COLS} FROM items WHERE name LIKE ?1 ESCAPE '\\'");
    let mut stmt = conn
        .prepare(&q)
        .map_err(|e| Error::database(e.to_string()))?;
    let rows = stmt
        .query_map([pattern], Item::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(rows)
}

/// Delete an item by ID.
///
/// Returns whether a row was actually removed; deleting an absent id is
/// `Ok(false)`, not an error.
pub fn delete_item(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn
        .execute("DELETE FROM items WHERE id = ?1", [id])
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(n > 0)
}
