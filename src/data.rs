use rusqlite::{params, Connection};
use serde::Deserialize;
use tracing::{debug, info, warn};

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::internal_error::InternalResult;

pub type DBConnection = Arc<Mutex<Connection>>;

fn default_database_path() -> String {
    String::from("rtodo.db")
}

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

pub fn open_connection(path: impl AsRef<Path>) -> InternalResult<DBConnection> {
    let path = path.as_ref();
    info!("Opening database at {}", path.display());

    let connection = Connection::open(path)?;
    init_schema(&connection)?;

    Ok(Arc::new(Mutex::new(connection)))
}

pub fn init_schema(connection: &Connection) -> InternalResult<()> {
    connection.pragma_update(None, "foreign_keys", true)?;

    connection.execute(
        "CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            description TEXT NOT NULL,
            due_date TEXT NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0
        )",
        params![],
    )?;
    connection.execute(
        "CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        )",
        params![],
    )?;
    connection.execute(
        "CREATE TABLE IF NOT EXISTS categories_tasks (
            category_id INTEGER NOT NULL REFERENCES categories(id),
            task_id INTEGER NOT NULL REFERENCES tasks(id),
            UNIQUE (category_id, task_id)
        )",
        params![],
    )?;

    debug!("Database schema ready");
    Ok(())
}

pub fn close_connection(db_connection: DBConnection) -> InternalResult<()> {
    match Arc::try_unwrap(db_connection) {
        Ok(mutex) => {
            let connection = mutex.into_inner()?;
            connection.close().map_err(|(_, e)| e)?;
            info!("Database connection closed");
        }
        Err(_) => warn!("Database connection still shared at shutdown, leaving it to be dropped"),
    }

    Ok(())
}

#[cfg(test)]
pub fn open_test_connection() -> Connection {
    let connection = Connection::open_in_memory().unwrap();
    init_schema(&connection).unwrap();
    connection
}
