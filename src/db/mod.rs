use rusqlite::{params, Connection, Result};
use std::sync::Mutex;

/// Where the recognizer service listens by default (uvicorn's default port).
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Local settings store. This is the only state the app persists; file and
/// result state lives in the service and is refetched, never mirrored here.
pub struct Database {
    pub conn: Mutex<Connection>,
}

impl Database {
    pub fn new(app_dir: &std::path::Path) -> Result<Self> {
        std::fs::create_dir_all(app_dir).ok();
        let db_path = app_dir.join("car-spotter.db");
        let conn = Connection::open(db_path)?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            "
            PRAGMA journal_mode=WAL;

            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let result = conn.query_row(
            "SELECT value FROM settings WHERE key = ?1",
            params![key],
            |row| row.get(0),
        );
        match result {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Base URL of the recognizer service, falling back to the default when
    /// nothing has been configured yet.
    pub fn server_url(&self) -> String {
        self.get_setting("server_url")
            .ok()
            .flatten()
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_db() -> (Database, TempDir) {
        let dir = TempDir::new().unwrap();
        let db = Database::new(dir.path()).unwrap();
        (db, dir)
    }

    #[test]
    fn test_setting_roundtrip() {
        let (db, _dir) = create_test_db();
        assert_eq!(db.get_setting("server_url").unwrap(), None);
        db.set_setting("server_url", "http://192.168.1.20:8000")
            .unwrap();
        assert_eq!(
            db.get_setting("server_url").unwrap().as_deref(),
            Some("http://192.168.1.20:8000")
        );
    }

    #[test]
    fn test_server_url_defaults_when_unset() {
        let (db, _dir) = create_test_db();
        assert_eq!(db.server_url(), DEFAULT_SERVER_URL);
        db.set_setting("server_url", "http://example.org:9000")
            .unwrap();
        assert_eq!(db.server_url(), "http://example.org:9000");
    }
}
