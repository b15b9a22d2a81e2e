use rusqlite::{params, Connection, OptionalExtension, Result};
use std::fs;
use std::path::Path;

use crate::error::SetupError;
use crate::models::Role;

// Refresh shortly before expiry to avoid edge races during requests.
const EXPIRY_SKEW_MS: i64 = 15_000;

/// Session blob persisted between launches: bearer token, the signed-in
/// admin's id and role, and the token expiry in unix millis.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSession {
    pub token: String,
    pub user_id: String,
    pub role: Role,
    pub expires_at: i64,
}

impl StoredSession {
    pub fn is_valid_at(&self, now_ms: i64) -> bool {
        !self.token.is_empty() && self.expires_at > now_ms + EXPIRY_SKEW_MS
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(chrono::Utc::now().timestamp_millis())
    }
}

/// SQLite-backed credential store in the caller's data directory. The only
/// state this client ever persists to disk.
pub struct CredentialStore {
    conn: Connection,
}

impl CredentialStore {
    pub fn open(data_dir: &Path) -> std::result::Result<Self, SetupError> {
        if !data_dir.exists() {
            fs::create_dir_all(data_dir)?;
        }

        let conn = Connection::open(data_dir.join("shelfadmin.db"))?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS session (
                key TEXT PRIMARY KEY,
                value TEXT
            )",
            [],
        )?;
        Ok(CredentialStore { conn })
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS session (
                key TEXT PRIMARY KEY,
                value TEXT
            )",
            [],
        )?;
        Ok(CredentialStore { conn })
    }

    pub fn save_session(&mut self, session: &StoredSession) -> Result<()> {
        let tx = self.conn.transaction()?;
        for (key, value) in [
            ("token", session.token.clone()),
            ("user_id", session.user_id.clone()),
            ("role", session.role.as_str().to_string()),
            ("expires_at", session.expires_at.to_string()),
        ] {
            tx.execute(
                "INSERT INTO session (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )?;
        }
        tx.commit()
    }

    pub fn load_session(&self) -> Result<Option<StoredSession>> {
        let token = match self.read_value("token")? {
            Some(value) if !value.is_empty() => value,
            _ => return Ok(None),
        };
        let user_id = self.read_value("user_id")?.unwrap_or_default();
        let role = match self.read_value("role")?.as_deref().and_then(Role::parse) {
            Some(role) => role,
            None => {
                log::warn!("stored session has unknown role, treating as signed out");
                return Ok(None);
            }
        };
        let expires_at = self
            .read_value("expires_at")?
            .and_then(|value| value.parse::<i64>().ok())
            .unwrap_or(0);

        Ok(Some(StoredSession {
            token,
            user_id,
            role,
            expires_at,
        }))
    }

    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM session", [])?;
        Ok(())
    }

    fn read_value(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM session WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session(expires_at: i64) -> StoredSession {
        StoredSession {
            token: "tok-123".to_string(),
            user_id: "u1".to_string(),
            role: Role::SuperAdmin,
            expires_at,
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut store = CredentialStore::open_in_memory().expect("store should open");
        let session = sample_session(1_900_000_000_000);
        store.save_session(&session).expect("save should succeed");
        let loaded = store.load_session().expect("load should succeed");
        assert_eq!(loaded, Some(session));
    }

    #[test]
    fn clear_removes_the_session() {
        let mut store = CredentialStore::open_in_memory().expect("store should open");
        store
            .save_session(&sample_session(1_900_000_000_000))
            .expect("save should succeed");
        store.clear().expect("clear should succeed");
        assert_eq!(store.load_session().expect("load should succeed"), None);
    }

    #[test]
    fn empty_store_loads_none() {
        let store = CredentialStore::open_in_memory().expect("store should open");
        assert_eq!(store.load_session().expect("load should succeed"), None);
    }

    #[test]
    fn validity_applies_skew_margin_before_expiry() {
        let now = 1_000_000;
        let session = sample_session(now + EXPIRY_SKEW_MS + 1);
        assert!(session.is_valid_at(now));
        // Inside the margin counts as expired so an in-flight request
        // cannot straddle the deadline.
        let nearly_expired = sample_session(now + EXPIRY_SKEW_MS);
        assert!(!nearly_expired.is_valid_at(now));
        let expired = sample_session(now - 1);
        assert!(!expired.is_valid_at(now));
    }

    #[test]
    fn empty_token_is_never_valid() {
        let session = StoredSession {
            token: String::new(),
            user_id: "u1".to_string(),
            role: Role::CollegeAdmin,
            expires_at: i64::MAX,
        };
        assert!(!session.is_valid_at(0));
    }

    #[test]
    fn open_creates_the_data_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("nested").join("data");
        let mut store = CredentialStore::open(&nested).expect("store should open");
        store
            .save_session(&sample_session(1_900_000_000_000))
            .expect("save should succeed");
        assert!(nested.join("shelfadmin.db").exists());
    }
}
