use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};

/// A scheduled stage/venue event. `start_at`/`end_at` are festival-local
/// minute stamps; "upcoming" is always derived against the current time,
/// never stored.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub organizer: Option<String>,
    pub location: String,
    pub start_at: String,
    pub end_at: String,
}

const SELECT_EVENT: &str = "\
    SELECT id, name, organizer, location, start_at, end_at FROM events";

fn row_to_event(row: &rusqlite::Row) -> rusqlite::Result<Event> {
    Ok(Event {
        id: row.get("id")?,
        name: row.get("name")?,
        organizer: row.get("organizer")?,
        location: row.get("location")?,
        start_at: row.get("start_at")?,
        end_at: row.get("end_at")?,
    })
}

/// All events in schedule order.
pub fn find_all(conn: &Connection) -> rusqlite::Result<Vec<Event>> {
    let sql = format!("{SELECT_EVENT} ORDER BY start_at, id");
    let mut stmt = conn.prepare(&sql)?;
    let events = stmt
        .query_map([], row_to_event)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(events)
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<Event>> {
    let sql = format!("{SELECT_EVENT} WHERE id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query_map(params![id], row_to_event)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

pub struct NewEvent {
    pub name: String,
    pub organizer: Option<String>,
    pub location: String,
    pub start_at: String,
    pub end_at: String,
}

pub fn create(conn: &Connection, new: &NewEvent) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO events (name, organizer, location, start_at, end_at) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![new.name, new.organizer, new.location, new.start_at, new.end_at],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update(conn: &Connection, id: i64, new: &NewEvent) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE events SET name = ?1, organizer = ?2, location = ?3, start_at = ?4, end_at = ?5, \
         updated_at = strftime('%Y-%m-%dT%H:%M:%S','now') WHERE id = ?6",
        params![new.name, new.organizer, new.location, new.start_at, new.end_at, id],
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, id: i64) -> rusqlite::Result<()> {
    conn.execute("DELETE FROM events WHERE id = ?1", params![id])?;
    Ok(())
}

/// Form data from the admin create/edit event forms.
#[derive(Debug, Deserialize)]
pub struct EventForm {
    pub name: String,
    pub organizer: String,
    pub location: String,
    pub start_at: String,
    pub end_at: String,
    pub csrf_token: String,
}
