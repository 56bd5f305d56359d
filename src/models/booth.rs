use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};

/// Live status of a booth as shown on the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoothStatus {
    Open,
    Closed,
    Break,
    Preparing,
}

impl BoothStatus {
    pub const ALL: [BoothStatus; 4] = [
        BoothStatus::Open,
        BoothStatus::Closed,
        BoothStatus::Break,
        BoothStatus::Preparing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BoothStatus::Open => "open",
            BoothStatus::Closed => "closed",
            BoothStatus::Break => "break",
            BoothStatus::Preparing => "preparing",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(BoothStatus::Open),
            "closed" => Some(BoothStatus::Closed),
            "break" => Some(BoothStatus::Break),
            "preparing" => Some(BoothStatus::Preparing),
            _ => None,
        }
    }

    /// Human label for tables and the monitor. The wait time is only shown
    /// alongside `Open`; other statuses display as this label alone.
    pub fn label(&self) -> &'static str {
        match self {
            BoothStatus::Open => "Open",
            BoothStatus::Closed => "Closed",
            BoothStatus::Break => "On break",
            BoothStatus::Preparing => "Preparing",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Booth {
    pub id: i64,
    pub account_id: i64,
    pub name: String,
    pub organizer: String,
    pub location: String,
    pub floor: Option<String>,
    pub area: Option<String>,
    /// Staff note from the booth console; never exposed in public JSON.
    #[serde(skip_serializing)]
    pub memo: Option<String>,
    pub status: BoothStatus,
    /// Wait time in minutes; meaningful only while the booth is open.
    pub waiting: i64,
}

const SELECT_BOOTH: &str = "\
    SELECT id, account_id, name, organizer, location, floor, area, memo, status, waiting \
    FROM booths";

fn row_to_booth(row: &rusqlite::Row) -> rusqlite::Result<Booth> {
    let status: String = row.get("status")?;
    Ok(Booth {
        id: row.get("id")?,
        account_id: row.get("account_id")?,
        name: row.get("name")?,
        organizer: row.get("organizer")?,
        location: row.get("location")?,
        floor: row.get("floor")?,
        area: row.get("area")?,
        memo: row.get("memo")?,
        // The CHECK constraint keeps stored statuses valid.
        status: BoothStatus::parse(&status).unwrap_or(BoothStatus::Preparing),
        waiting: row.get("waiting")?,
    })
}

/// All booths ordered by organizer, the order the monitor pages through.
pub fn find_all_by_organizer(conn: &Connection) -> rusqlite::Result<Vec<Booth>> {
    let sql = format!("{SELECT_BOOTH} ORDER BY organizer, id");
    let mut stmt = conn.prepare(&sql)?;
    let booths = stmt
        .query_map([], row_to_booth)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(booths)
}

/// All booths in creation order, for the admin table.
pub fn find_all(conn: &Connection) -> rusqlite::Result<Vec<Booth>> {
    let sql = format!("{SELECT_BOOTH} ORDER BY id");
    let mut stmt = conn.prepare(&sql)?;
    let booths = stmt
        .query_map([], row_to_booth)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(booths)
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<Booth>> {
    let sql = format!("{SELECT_BOOTH} WHERE id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query_map(params![id], row_to_booth)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// The booth attached to an account, if any. Drives the booth console.
pub fn find_by_account_id(conn: &Connection, account_id: i64) -> rusqlite::Result<Option<Booth>> {
    let sql = format!("{SELECT_BOOTH} WHERE account_id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query_map(params![account_id], row_to_booth)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

pub fn count(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM booths", [], |row| row.get(0))
}

pub struct NewBooth {
    pub account_id: i64,
    pub name: String,
    pub organizer: String,
    pub location: String,
    pub floor: Option<String>,
    pub area: Option<String>,
}

/// Create a booth attached to an account. New booths start `preparing`
/// with no wait time.
pub fn create(conn: &Connection, new: &NewBooth) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO booths (account_id, name, organizer, location, floor, area, status, waiting) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'preparing', 0)",
        params![
            new.account_id,
            new.name,
            new.organizer,
            new.location,
            new.floor,
            new.area
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update the descriptive fields an admin edits. Status and wait time are
/// the booth owner's to change via `update_live`.
pub fn update_info(
    conn: &Connection,
    id: i64,
    name: &str,
    organizer: &str,
    location: &str,
    floor: Option<&str>,
    area: Option<&str>,
) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE booths SET name = ?1, organizer = ?2, location = ?3, floor = ?4, area = ?5, \
         updated_at = strftime('%Y-%m-%dT%H:%M:%S','now') WHERE id = ?6",
        params![name, organizer, location, floor, area, id],
    )?;
    Ok(())
}

/// Update the live fields the booth console posts.
pub fn update_live(
    conn: &Connection,
    id: i64,
    status: BoothStatus,
    waiting: i64,
    memo: Option<&str>,
) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE booths SET status = ?1, waiting = ?2, memo = ?3, \
         updated_at = strftime('%Y-%m-%dT%H:%M:%S','now') WHERE id = ?4",
        params![status.as_str(), waiting, memo, id],
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, id: i64) -> rusqlite::Result<()> {
    conn.execute("DELETE FROM booths WHERE id = ?1", params![id])?;
    Ok(())
}

/// Form data from the admin create/edit booth forms.
#[derive(Debug, Deserialize)]
pub struct BoothForm {
    pub account_id: String,
    pub name: String,
    pub organizer: String,
    pub location: String,
    pub floor: String,
    pub area: String,
    pub csrf_token: String,
}

/// Form data from the booth console (status/wait/memo).
#[derive(Debug, Deserialize)]
pub struct BoothLiveForm {
    pub status: String,
    pub waiting: String,
    pub memo: String,
    pub csrf_token: String,
}
