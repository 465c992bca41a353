use rusqlite::{Connection, params};
use serde_json::Value;

#[derive(Debug)]
pub enum AuditError {
    DbError(rusqlite::Error),
    JsonError(serde_json::Error),
}

impl From<rusqlite::Error> for AuditError {
    fn from(err: rusqlite::Error) -> Self {
        AuditError::DbError(err)
    }
}

impl From<serde_json::Error> for AuditError {
    fn from(err: serde_json::Error) -> Self {
        AuditError::JsonError(err)
    }
}

impl std::fmt::Display for AuditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditError::DbError(e) => write!(f, "Database error: {}", e),
            AuditError::JsonError(e) => write!(f, "JSON error: {}", e),
        }
    }
}

/// Record a mutation in the audit log. Best-effort: callers discard the
/// result so a failed audit write never fails the request.
pub fn log(
    conn: &Connection,
    actor_id: i64,
    action: &str,
    target_type: &str,
    target_id: i64,
    details: Value,
) -> Result<(), AuditError> {
    let details = serde_json::to_string(&details)?;
    conn.execute(
        "INSERT INTO audit_log (actor_id, action, target_type, target_id, details) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![actor_id, action, target_type, target_id, details],
    )?;
    Ok(())
}
