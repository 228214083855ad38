//! Shared request state.
//!
//! # Invariants
//! - One SQLite connection is shared behind a mutex; each request holds the
//!   lock for the whole pipeline, on a blocking thread.
//! - Calendar "today" always comes from the injected [`Clock`].

use crate::error::ApiError;
use axum::http::HeaderName;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// Source of the current calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
    clock: Arc<dyn Clock>,
    user_header: HeaderName,
}

impl AppState {
    /// Wraps a migrated connection (see `todo_core::db::open_db`).
    pub fn new(conn: Connection, user_header: HeaderName) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            clock: Arc::new(SystemClock),
            user_header,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn user_header(&self) -> &HeaderName {
        &self.user_header
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Runs `job` against the shared connection on the blocking pool.
    pub async fn with_connection<T, F>(&self, job: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, ApiError> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let conn = db
                .lock()
                .map_err(|_| ApiError::Unavailable("connection lock poisoned".to_string()))?;
            job(&*conn)
        })
        .await
        .map_err(|err| ApiError::Unavailable(format!("blocking task failed: {err}")))?
    }
}
