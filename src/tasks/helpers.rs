use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;

use crate::associations;
use crate::categories::data::Category;
use crate::internal_error::{InternalError, InternalResult};
use crate::repository::{Entity, Repository};

use super::data::*;

impl Entity for Task {
    const NAME: &'static str = "Task";
    const TABLE: &'static str = "tasks";
    const COLUMNS: &'static str = "id, description, due_date, completed";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn from_row(row: &Row) -> rusqlite::Result<Task> {
        Ok(Task {
            id: Some(row.get(0)?),
            description: row.get(1)?,
            due_date: row.get(2)?,
            completed: row.get(3)?,
        })
    }

    fn insert(&self, db_connection: &Connection) -> rusqlite::Result<usize> {
        db_connection.execute(
            "INSERT INTO tasks (description, due_date, completed) VALUES (?1, ?2, ?3)",
            params![self.description, self.due_date, self.completed],
        )
    }
}

impl Repository<'_, Task> {
    pub fn categories(&self, task: &Task) -> InternalResult<Vec<Category>> {
        let task_id = Self::require_id(task)?;
        associations::categories_for_task(task_id, self.connection())
    }

    pub fn add_category(&self, task: &Task, category: &Category) -> InternalResult<()> {
        let task_id = Self::require_id(task)?;
        let category_id = Repository::<Category>::require_id(category)?;

        if associations::link(category_id, task_id, self.connection())? {
            info!("Added task {} to category {}", task_id, category_id);
        }

        Ok(())
    }

    pub fn update_completed(&self, task: &mut Task, completed: bool) -> InternalResult<()> {
        let task_id = Self::require_id(task)?;

        let updated = self.connection().execute(
            "UPDATE tasks SET completed = (?1) WHERE id = (?2)",
            params![completed, task_id],
        )?;
        if updated == 0 {
            return Err(InternalError::NotFound {
                entity: Task::NAME,
                id: task_id,
            });
        }

        task.completed = completed;
        Ok(())
    }

    /// Flips the completed flag in a single statement and returns the new value.
    pub fn toggle_completed(&self, task_id: TaskID) -> InternalResult<bool> {
        let completed = self
            .connection()
            .query_row(
                "UPDATE tasks SET completed = NOT completed WHERE id = (?1) RETURNING completed",
                params![task_id],
                |row| row.get::<usize, bool>(0),
            )
            .optional()?
            .ok_or(InternalError::NotFound {
                entity: Task::NAME,
                id: task_id,
            })?;

        info!("Task {} completed: {}", task_id, completed);
        Ok(completed)
    }
}
