//! The `categories_tasks` join table.

use rusqlite::{params, Connection};
use tracing::debug;

use crate::categories::data::CategoryID;
use crate::internal_error::InternalResult;
use crate::repository::Entity;
use crate::tasks::data::TaskID;

const JOIN_TABLE: &str = "categories_tasks";

/// Links a category and a task. Returns `false` when the link already existed.
pub fn link(
    category_id: CategoryID,
    task_id: TaskID,
    db_connection: &Connection,
) -> InternalResult<bool> {
    let inserted = db_connection.execute(
        "INSERT OR IGNORE INTO categories_tasks (category_id, task_id) VALUES (?1, ?2)",
        params![category_id, task_id],
    )?;

    if inserted == 0 {
        debug!("Category {} already holds task {}", category_id, task_id);
    }

    Ok(inserted > 0)
}

/// Rows of `E` reachable from `id` through the join table. `own_key` is the
/// join column pointing at `E`, `other_key` the column matched against `id`.
fn related<E: Entity>(
    own_key: &str,
    other_key: &str,
    id: i64,
    db_connection: &Connection,
) -> InternalResult<Vec<E>> {
    let query = format!(
        "SELECT {columns} FROM {table}
         JOIN {join} ON {join}.{own_key} = {table}.id
         WHERE {join}.{other_key} = (?1)
         ORDER BY {table}.id",
        columns = E::COLUMNS,
        table = E::TABLE,
        join = JOIN_TABLE,
        own_key = own_key,
        other_key = other_key,
    );
    let mut statement = db_connection.prepare(&query)?;

    let rows = statement.query_map(params![id], |row| E::from_row(row))?;

    let mut entities = vec![];
    for row_result in rows {
        entities.push(row_result?);
    }

    Ok(entities)
}

pub fn categories_for_task<E: Entity>(
    task_id: TaskID,
    db_connection: &Connection,
) -> InternalResult<Vec<E>> {
    related("category_id", "task_id", task_id, db_connection)
}

pub fn tasks_for_category<E: Entity>(
    category_id: CategoryID,
    db_connection: &Connection,
) -> InternalResult<Vec<E>> {
    related("task_id", "category_id", category_id, db_connection)
}
