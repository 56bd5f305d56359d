use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};

/// A marquee notice with a display window. Active iff
/// `start_at <= now < end_at`.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub id: i64,
    pub text: String,
    pub start_at: String,
    pub end_at: String,
}

const SELECT_NOTICE: &str = "SELECT id, text, start_at, end_at FROM notices";

fn row_to_notice(row: &rusqlite::Row) -> rusqlite::Result<Notice> {
    Ok(Notice {
        id: row.get("id")?,
        text: row.get("text")?,
        start_at: row.get("start_at")?,
        end_at: row.get("end_at")?,
    })
}

/// All notices for the admin table, in window order.
pub fn find_all(conn: &Connection) -> rusqlite::Result<Vec<Notice>> {
    let sql = format!("{SELECT_NOTICE} ORDER BY start_at, id");
    let mut stmt = conn.prepare(&sql)?;
    let notices = stmt
        .query_map([], row_to_notice)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(notices)
}

/// Notices whose window contains `now`, in window order. This is the single
/// authoritative active-notice predicate: start inclusive, end exclusive,
/// evaluated server-side in the festival timezone.
pub fn find_active(conn: &Connection, now: &str) -> rusqlite::Result<Vec<Notice>> {
    let sql = format!("{SELECT_NOTICE} WHERE start_at <= ?1 AND end_at > ?1 ORDER BY start_at, id");
    let mut stmt = conn.prepare(&sql)?;
    let notices = stmt
        .query_map(params![now], row_to_notice)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(notices)
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<Notice>> {
    let sql = format!("{SELECT_NOTICE} WHERE id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query_map(params![id], row_to_notice)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

pub struct NewNotice {
    pub text: String,
    pub start_at: String,
    pub end_at: String,
}

pub fn create(conn: &Connection, new: &NewNotice) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO notices (text, start_at, end_at) VALUES (?1, ?2, ?3)",
        params![new.text, new.start_at, new.end_at],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update(conn: &Connection, id: i64, new: &NewNotice) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE notices SET text = ?1, start_at = ?2, end_at = ?3, \
         updated_at = strftime('%Y-%m-%dT%H:%M:%S','now') WHERE id = ?4",
        params![new.text, new.start_at, new.end_at, id],
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, id: i64) -> rusqlite::Result<()> {
    conn.execute("DELETE FROM notices WHERE id = ?1", params![id])?;
    Ok(())
}

/// Form data from the admin create/edit notice forms.
#[derive(Debug, Deserialize)]
pub struct NoticeForm {
    pub text: String,
    pub start_at: String,
    pub end_at: String,
    pub csrf_token: String,
}
