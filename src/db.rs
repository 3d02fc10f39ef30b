use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

pub type DbPool = Pool<SqliteConnectionManager>;

pub fn init_pool() -> Result<DbPool, Box<dyn std::error::Error>> {
    let manager = SqliteConnectionManager::file("website/db/ssa-site.db");
    let pool = Pool::builder().max_size(10).build(manager)?;

    // Enable WAL mode for better concurrent read performance
    let conn = pool.get()?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

    Ok(pool)
}

pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error>> {
    let conn = pool.get()?;

    conn.execute_batch(
        "
        -- Settings (key-value)
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT
        );

        -- Local storage analog (key-value); the inquiry list lives here
        CREATE TABLE IF NOT EXISTS local_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        ",
    )?;

    Ok(())
}

pub fn seed_defaults(pool: &DbPool) -> Result<(), Box<dyn std::error::Error>> {
    let conn = pool.get()?;

    let defaults = vec![
        // General
        ("site_name", "SSA Developers"),
        ("site_url", "http://localhost:8000"),
        ("content_root", "website/site"),
        // Slideshow discovery heuristics. The early-stop values mirror the
        // behavior the markup was built around; change with care.
        ("slideshow_max_check", "100"),
        ("slideshow_stop_after_misses", "6"),
        ("slideshow_min_checked", "5"),
        ("slideshow_probe_timeout_ms", "2500"),
        ("slideshow_interval_ms", "5000"),
    ];

    for (key, value) in defaults {
        conn.execute(
            "INSERT OR IGNORE INTO settings (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
    }

    Ok(())
}
