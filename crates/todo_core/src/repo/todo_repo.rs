//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the persistence operations the handler depends on.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `TodoItem::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Every lookup is scoped by owner; a foreign task is indistinguishable
//!   from a missing one.

use crate::db::DbError;
use crate::model::todo_item::{TodoId, TodoItem, TodoValidationError};
use crate::repo::todo_query::TodoQuery;
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TODO_SELECT_SQL: &str = "SELECT
    id,
    title,
    owner,
    done,
    date
FROM todos";

const DATE_FORMAT: &str = "%Y-%m-%d";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TodoValidationError),
    Db(DbError),
    NotFound(TodoId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<TodoValidationError> for RepoError {
    fn from(value: TodoValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence operations consumed by `TodoHandler` and the read routes.
pub trait TodoRepository {
    fn create(&self, item: &TodoItem) -> RepoResult<()>;
    /// Fails with `NotFound` when no task has this id for this owner.
    fn update(&self, item: &TodoItem) -> RepoResult<()>;
    fn get_by_id(&self, id: TodoId, owner: &str) -> RepoResult<Option<TodoItem>>;
    /// Lists tasks ordered by `date ASC, title ASC, id ASC`.
    fn list(&self, query: &TodoQuery) -> RepoResult<Vec<TodoItem>>;

    fn get_all(&self, owner: &str) -> RepoResult<Vec<TodoItem>> {
        self.list(&TodoQuery::all(owner))
    }

    fn get_all_done(&self, owner: &str) -> RepoResult<Vec<TodoItem>> {
        self.list(&TodoQuery::done(owner))
    }

    fn get_all_undone(&self, owner: &str) -> RepoResult<Vec<TodoItem>> {
        self.list(&TodoQuery::undone(owner))
    }

    fn get_by_period(&self, owner: &str, date: NaiveDate, done: bool) -> RepoResult<Vec<TodoItem>> {
        self.list(&TodoQuery::period(owner, date, done))
    }
}

impl<R: TodoRepository + ?Sized> TodoRepository for &R {
    fn create(&self, item: &TodoItem) -> RepoResult<()> {
        (**self).create(item)
    }

    fn update(&self, item: &TodoItem) -> RepoResult<()> {
        (**self).update(item)
    }

    fn get_by_id(&self, id: TodoId, owner: &str) -> RepoResult<Option<TodoItem>> {
        (**self).get_by_id(id, owner)
    }

    fn list(&self, query: &TodoQuery) -> RepoResult<Vec<TodoItem>> {
        (**self).list(query)
    }
}

/// SQLite-backed task repository.
pub struct SqliteTodoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// Returns `InvalidData` when the `todos` table is missing, which means
    /// the connection did not come from `db::open_db*`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let ready: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'todos'
            );",
            [],
            |row| row.get(0),
        )?;
        if ready != 1 {
            return Err(RepoError::InvalidData(
                "todos table is missing; open the database through db::open_db".to_string(),
            ));
        }
        Ok(Self { conn })
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    fn create(&self, item: &TodoItem) -> RepoResult<()> {
        item.validate()?;

        self.conn.execute(
            "INSERT INTO todos (id, title, owner, done, date)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                item.id().to_string(),
                item.title(),
                item.owner(),
                bool_to_int(item.is_done()),
                date_to_db(item.date()),
            ],
        )?;

        Ok(())
    }

    fn update(&self, item: &TodoItem) -> RepoResult<()> {
        item.validate()?;

        let changed = self.conn.execute(
            "UPDATE todos
             SET
                title = ?1,
                done = ?2,
                date = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?4
               AND owner = ?5;",
            params![
                item.title(),
                bool_to_int(item.is_done()),
                date_to_db(item.date()),
                item.id().to_string(),
                item.owner(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(item.id()));
        }

        Ok(())
    }

    fn get_by_id(&self, id: TodoId, owner: &str) -> RepoResult<Option<TodoItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TODO_SELECT_SQL}
             WHERE id = ?1
               AND owner = ?2;"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), owner])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_todo_row(row)?));
        }

        Ok(None)
    }

    fn list(&self, query: &TodoQuery) -> RepoResult<Vec<TodoItem>> {
        let mut sql = format!("{TODO_SELECT_SQL} WHERE owner = ?");
        let mut bind_values: Vec<Value> = vec![Value::Text(query.owner().to_string())];

        if let Some(done) = query.done_filter() {
            sql.push_str(" AND done = ?");
            bind_values.push(Value::Integer(bool_to_int(done)));
        }

        if let Some(date) = query.date_filter() {
            sql.push_str(" AND date = ?");
            bind_values.push(Value::Text(date_to_db(date)));
        }

        sql.push_str(" ORDER BY date ASC, title ASC, id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(parse_todo_row(row)?);
        }

        Ok(items)
    }
}

fn parse_todo_row(row: &Row<'_>) -> RepoResult<TodoItem> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in todos.id"))
    })?;

    let date_text: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_text, DATE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!("invalid date value `{date_text}` in todos.date"))
    })?;

    let done = match row.get::<_, i64>("done")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid done value `{other}` in todos.done"
            )));
        }
    };

    let title: String = row.get("title")?;
    let owner: String = row.get("owner")?;
    Ok(TodoItem::with_id(id, title, owner, done, date)?)
}

fn date_to_db(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
