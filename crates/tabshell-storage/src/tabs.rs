//! Tab record store
//!
//! Raw rows of the `tabs` table. Icon bytes are opaque here; decoding them
//! is the caller's business.

use rusqlite::{Connection, Row};

use crate::database::Database;
use crate::error::StorageError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabRow {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub icon: Vec<u8>,
}

impl TabRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            url: row.get(2)?,
            icon: row.get(3)?,
        })
    }
}

pub struct TabStore {
    db: Database,
}

impl TabStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert a new row and return the id SQLite generated for it
    pub fn insert(&self, name: &str, url: &str, icon: &[u8]) -> Result<i64> {
        self.db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO tabs (name, url, icon) VALUES (?1, ?2, ?3)",
                rusqlite::params![name, url, icon],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// All rows in insertion order
    pub fn select_all(&self) -> Result<Vec<TabRow>> {
        self.db.with_connection(query_all)
    }

    /// All rows, inserting the given one first when the table is empty.
    /// Listing and seeding run in one transaction.
    pub fn select_all_or_insert(&self, name: &str, url: &str, icon: &[u8]) -> Result<Vec<TabRow>> {
        self.db.transaction(|conn| {
            let mut rows = query_all(conn)?;
            if rows.is_empty() {
                conn.execute(
                    "INSERT INTO tabs (name, url, icon) VALUES (?1, ?2, ?3)",
                    rusqlite::params![name, url, icon],
                )?;
                let id = conn.last_insert_rowid();
                tracing::debug!(tab_id = id, "Seeded empty tab table");

                rows.push(TabRow {
                    id,
                    name: name.to_string(),
                    url: url.to_string(),
                    icon: icon.to_vec(),
                });
            }
            Ok(rows)
        })
    }

    /// Delete the stored row this row was read from (matched on primary key)
    pub fn delete_matching(&self, row: &TabRow) -> Result<usize> {
        self.delete_by_id(row.id)
    }

    pub fn delete_by_id(&self, id: i64) -> Result<usize> {
        let removed = self.db.with_connection(|conn| {
            Ok(conn.execute("DELETE FROM tabs WHERE id = ?1", [id])?)
        })?;

        if removed == 0 {
            tracing::debug!(tab_id = id, "Delete matched no tab row");
        }

        Ok(removed)
    }

    pub fn update_url(&self, id: i64, url: &str) -> Result<()> {
        let changed = self.db.with_connection(|conn| {
            Ok(conn.execute(
                "UPDATE tabs SET url = ?1 WHERE id = ?2",
                rusqlite::params![url, id],
            )?)
        })?;

        if changed == 0 {
            return Err(StorageError::RowNotFound(id));
        }

        Ok(())
    }
}

fn query_all(conn: &Connection) -> Result<Vec<TabRow>> {
    let mut stmt = conn.prepare("SELECT id, name, url, icon FROM tabs ORDER BY id")?;
    let rows = stmt
        .query_map([], TabRow::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

impl Clone for TabStore {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}
