use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

pub type DbPool = Pool<SqliteConnectionManager>;

pub const MIGRATIONS: &str = include_str!("schema.sql");

pub fn init_pool(database_url: &str) -> DbPool {
    let manager = SqliteConnectionManager::file(database_url).with_init(|conn| {
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        Ok(())
    });
    Pool::builder()
        .max_size(8)
        .build(manager)
        .expect("Failed to create DB pool")
}

pub fn run_migrations(pool: &DbPool) {
    let conn = pool
        .get()
        .expect("Failed to get DB connection for migrations");
    conn.execute_batch(MIGRATIONS)
        .expect("Failed to run migrations");
    log::info!("Database migrations complete");
}

/// Create the seed admin account on first boot. Skipped once any account
/// exists, so a changed ADMIN_PASSWORD never silently rewrites credentials.
pub fn seed_admin(pool: &DbPool, email: &str, password_hash: &str) {
    let conn = pool.get().expect("Failed to get DB connection for seeding");

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))
        .unwrap_or(0);
    if count > 0 {
        log::info!("Accounts already present ({count}), skipping admin seed");
        return;
    }

    conn.execute(
        "INSERT INTO accounts (email, password, is_admin) VALUES (?1, ?2, 1)",
        params![email, password_hash],
    )
    .expect("Failed to seed admin account");
    log::info!("Seeded admin account '{email}'");
}
