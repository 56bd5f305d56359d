//! Shared test infrastructure for model and monitor tests.
//!
//! `setup_test_db()` creates a temporary SQLite database with the full
//! schema applied; the seed helpers insert minimal rows for the entity
//! under test.

#![allow(dead_code)]

use rusqlite::{Connection, params};
use tempfile::TempDir;

use matsuri::db::MIGRATIONS;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASS: &str = "admin123";

/// Setup a test database with the schema applied.
///
/// Returns a tuple of (TempDir, Connection) where TempDir must be kept
/// alive for the Connection to remain valid.
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

/// Insert an account with a placeholder password hash; returns its id.
pub fn insert_account(conn: &Connection, email: &str) -> i64 {
    conn.execute(
        "INSERT INTO accounts (email, password, is_admin) VALUES (?1, 'not-a-real-hash', 0)",
        params![email],
    )
    .expect("Failed to insert account");
    conn.last_insert_rowid()
}

/// Insert a booth attached to an account; returns its id.
pub fn insert_booth(conn: &Connection, account_id: i64, name: &str, organizer: &str) -> i64 {
    conn.execute(
        "INSERT INTO booths (account_id, name, organizer, location) VALUES (?1, ?2, ?3, 'Quad')",
        params![account_id, name, organizer],
    )
    .expect("Failed to insert booth");
    conn.last_insert_rowid()
}

pub fn insert_event(conn: &Connection, name: &str, start_at: &str, end_at: &str) -> i64 {
    conn.execute(
        "INSERT INTO events (name, location, start_at, end_at) VALUES (?1, 'Main stage', ?2, ?3)",
        params![name, start_at, end_at],
    )
    .expect("Failed to insert event");
    conn.last_insert_rowid()
}

pub fn insert_notice(conn: &Connection, text: &str, start_at: &str, end_at: &str) -> i64 {
    conn.execute(
        "INSERT INTO notices (text, start_at, end_at) VALUES (?1, ?2, ?3)",
        params![text, start_at, end_at],
    )
    .expect("Failed to insert notice");
    conn.last_insert_rowid()
}
