use rusqlite::params;

use crate::db::DbPool;

/// Key-value store mirroring the browser local-storage contract: opaque
/// string values, no expiry, entries survive until explicitly overwritten.
pub struct LocalStore;

impl LocalStore {
    pub fn get(pool: &DbPool, key: &str) -> Option<String> {
        let conn = pool.get().ok()?;
        conn.query_row(
            "SELECT value FROM local_store WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .ok()
    }

    pub fn set(pool: &DbPool, key: &str, value: &str) -> Result<(), String> {
        let conn = pool.get().map_err(|e| e.to_string())?;
        conn.execute(
            "INSERT INTO local_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )
        .map_err(|e| e.to_string())?;
        Ok(())
    }
}
