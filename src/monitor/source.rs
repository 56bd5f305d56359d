use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::booth::{self, Booth};
use crate::models::notice;

/// Where the refresh loop reads monitor data from. Split out as a trait so
/// the engine can be driven against a canned source in tests.
pub trait DataSource: Send + Sync {
    /// Booths sorted by organizer.
    fn fetch_booths(&self) -> Result<Vec<Booth>, AppError>;
    /// Texts of notices active at `now`, sorted by window start.
    fn fetch_notice_texts(&self, now: &str) -> Result<Vec<String>, AppError>;
}

/// Production source reading through the connection pool.
pub struct DbDataSource {
    pool: DbPool,
}

impl DbDataSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl DataSource for DbDataSource {
    fn fetch_booths(&self) -> Result<Vec<Booth>, AppError> {
        let conn = self.pool.get()?;
        Ok(booth::find_all_by_organizer(&conn)?)
    }

    fn fetch_notice_texts(&self, now: &str) -> Result<Vec<String>, AppError> {
        let conn = self.pool.get()?;
        let notices = notice::find_active(&conn, now)?;
        Ok(notices.into_iter().map(|n| n.text).collect())
    }
}
