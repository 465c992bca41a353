//! Shared test infrastructure for model layer tests.
//!
//! Creates a temporary SQLite database with the schema applied and
//! provides helpers for seeding users and rooms.

use chrono::{Duration, Utc};
use rusqlite::Connection;
use tempfile::TempDir;

use parlor::auth::password;
use parlor::db::MIGRATIONS;
use parlor::models::room::{self, NewRoom};
use parlor::models::user::{self, NewUser};

pub const TEST_PASSWORD: &str = "Password1!";

/// Setup a test database with the schema applied.
///
/// Returns a tuple of (TempDir, Connection) where TempDir must be kept
/// alive for the Connection to remain valid.
#[allow(dead_code)]
pub fn setup_test_db() -> (TempDir, Connection) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.db");
    let conn = Connection::open(&db_path).expect("Failed to open test DB");

    conn.execute_batch("PRAGMA foreign_keys=ON; PRAGMA journal_mode=WAL;")
        .expect("Failed to set pragmas");

    conn.execute_batch(MIGRATIONS)
        .expect("Failed to run migrations");

    (dir, conn)
}

/// Insert a user with the shared test password. Returns the user id.
#[allow(dead_code)]
pub fn create_user(conn: &Connection, username: &str) -> i64 {
    let hash = password::hash_password(TEST_PASSWORD).expect("hash");
    user::create(
        conn,
        &NewUser {
            username: username.to_string(),
            password: hash,
        },
    )
    .expect("create user")
}

/// Insert a room running from now until tomorrow with no interests.
/// Returns the room id.
#[allow(dead_code)]
pub fn create_room(conn: &mut Connection, creator_id: i64, name: &str) -> i64 {
    let now = Utc::now();
    room::create(
        conn,
        &NewRoom {
            name: name.to_string(),
            description: String::new(),
            start_date: now,
            end_date: now + Duration::hours(24),
            creator_id,
            interests: Vec::new(),
        },
    )
    .expect("create room")
}
