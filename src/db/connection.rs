use rusqlite::Connection;
use std::cell::RefCell;
use std::fs;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::db::{percentile, spatial};
use crate::errors::ServerError;

/// How many SQLite VM instructions run between deadline checks.
const PROGRESS_CHECK_OPS: i32 = 1_000;

// Thread-local connection slot, tagged with the path it was opened for.
thread_local! {
    static DB_CONN: RefCell<Option<(String, Connection)>> = RefCell::new(None);
}

/// Handle to the tract database.
///
/// Built once in `main` and handed to every request. Each worker thread opens
/// its own connection on first use.
#[derive(Clone, Debug)]
pub struct Database {
    path: String,
    query_timeout: Option<Duration>,
}

impl Database {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query_timeout: None,
        }
    }

    /// Interrupt any statement still running `timeout` after `with_conn` starts.
    pub fn with_query_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.query_timeout = timeout;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Provides a mutable connection to the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServerError>,
    {
        DB_CONN
            .try_with(|cell| {
                let mut slot = cell.borrow_mut();
                let stale = !matches!(slot.as_ref(), Some((path, _)) if *path == self.path);
                if stale {
                    *slot = Some((self.path.clone(), open_connection(&self.path)?));
                }
                let Some((_, conn)) = slot.as_mut() else {
                    return Err(ServerError::InternalError("connection slot empty".into()));
                };

                if let Some(timeout) = self.query_timeout {
                    let deadline = Instant::now() + timeout;
                    conn.progress_handler(
                        PROGRESS_CHECK_OPS,
                        Some(move || Instant::now() >= deadline),
                    );
                }
                let result = f(conn);
                if self.query_timeout.is_some() {
                    conn.progress_handler(0, None::<fn() -> bool>);
                }
                result
            })
            .map_err(|_| ServerError::InternalError("thread-local connection unavailable".into()))?
    }
}

/// Open a connection with the spatial and percentile functions registered.
pub fn open_connection(path: &str) -> Result<Connection, ServerError> {
    let conn = Connection::open(path)
        .map_err(|e| ServerError::DbError(format!("Open DB failed: {e}")))?;
    spatial::register(&conn)
        .and_then(|_| percentile::register(&conn))
        .map_err(|e| ServerError::DbError(format!("Registering SQL functions failed: {e}")))?;
    debug!(path, "opened database connection");
    Ok(conn)
}

/// Initialize database from a SQL schema file
pub fn init_db(db: &Database, schema_path: &str) -> Result<(), ServerError> {
    let schema_sql = fs::read_to_string(schema_path)
        .map_err(|e| ServerError::DbError(format!("Failed to read schema file: {e}")))?;

    db.with_conn(|conn| {
        conn.execute_batch(&schema_sql)
            .map_err(|e| ServerError::DbError(format!("Failed to apply schema: {e}")))?;
        Ok(())
    })?;

    info!(schema_path, db = db.path(), "database initialized");
    Ok(())
}
