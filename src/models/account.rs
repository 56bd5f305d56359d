use rusqlite::{Connection, params};
use serde::Deserialize;

/// Internal account struct for authentication — includes password hash.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub is_admin: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Safe version for templates — no password hash, plus the attached booth
/// name when one exists.
#[derive(Debug, Clone)]
pub struct AccountDisplay {
    pub id: i64,
    pub email: String,
    pub is_admin: bool,
    pub booth_name: String,
    pub created_at: String,
}

fn row_to_account(row: &rusqlite::Row) -> rusqlite::Result<Account> {
    Ok(Account {
        id: row.get("id")?,
        email: row.get("email")?,
        password: row.get("password")?,
        is_admin: row.get::<_, i64>("is_admin")? != 0,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// All accounts with their attached booth name, for the admin table and
/// the CSV export.
pub fn find_all_display(conn: &Connection) -> rusqlite::Result<Vec<AccountDisplay>> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.email, a.is_admin, COALESCE(b.name, '') AS booth_name, a.created_at \
         FROM accounts a \
         LEFT JOIN booths b ON b.account_id = a.id \
         ORDER BY a.id",
    )?;
    let accounts = stmt
        .query_map([], |row| {
            Ok(AccountDisplay {
                id: row.get("id")?,
                email: row.get("email")?,
                is_admin: row.get::<_, i64>("is_admin")? != 0,
                booth_name: row.get("booth_name")?,
                created_at: row.get("created_at")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(accounts)
}

/// Accounts that do not have a booth yet — candidates for booth creation.
pub fn find_without_booth(conn: &Connection) -> rusqlite::Result<Vec<(i64, String)>> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.email FROM accounts a \
         LEFT JOIN booths b ON b.account_id = a.id \
         WHERE b.id IS NULL ORDER BY a.email",
    )?;
    let accounts = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(accounts)
}

/// Find account by email for authentication. Returns the internal struct
/// with the password hash.
pub fn find_by_email(conn: &Connection, email: &str) -> rusqlite::Result<Option<Account>> {
    let mut stmt = conn.prepare(
        "SELECT id, email, password, is_admin, created_at, updated_at \
         FROM accounts WHERE email = ?1",
    )?;
    let mut rows = stmt.query_map(params![email], row_to_account)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<Account>> {
    let mut stmt = conn.prepare(
        "SELECT id, email, password, is_admin, created_at, updated_at \
         FROM accounts WHERE id = ?1",
    )?;
    let mut rows = stmt.query_map(params![id], row_to_account)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

pub fn count(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))
}

pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub is_admin: bool,
}

pub fn create(conn: &Connection, new: &NewAccount) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO accounts (email, password, is_admin) VALUES (?1, ?2, ?3)",
        params![new.email, new.password, new.is_admin as i64],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Grant or revoke the admin claim.
pub fn set_admin(conn: &Connection, id: i64, is_admin: bool) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE accounts SET is_admin = ?1, updated_at = strftime('%Y-%m-%dT%H:%M:%S','now') \
         WHERE id = ?2",
        params![is_admin as i64, id],
    )?;
    Ok(())
}

/// Whether a booth is still attached to this account. Deletion is refused
/// while one exists.
pub fn has_booth(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT COUNT(*) > 0 FROM booths WHERE account_id = ?1",
        params![id],
        |row| row.get(0),
    )
}

pub fn delete(conn: &Connection, id: i64) -> rusqlite::Result<()> {
    conn.execute("DELETE FROM accounts WHERE id = ?1", params![id])?;
    Ok(())
}

/// Form data from the create account form.
#[derive(Debug, Deserialize)]
pub struct AccountForm {
    pub email: String,
    pub password: String,
    pub csrf_token: String,
}

/// Form data for the admin-claim toggle.
#[derive(Debug, Deserialize)]
pub struct AccountRoleForm {
    pub is_admin: String,
    pub csrf_token: String,
}
