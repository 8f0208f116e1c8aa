use rusqlite::{params, Connection, Row};
use tracing::info;

use crate::associations;
use crate::internal_error::InternalResult;
use crate::repository::{Entity, Repository};
use crate::tasks::data::Task;

use super::data::*;

impl Entity for Category {
    const NAME: &'static str = "Category";
    const TABLE: &'static str = "categories";
    const COLUMNS: &'static str = "id, name";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn from_row(row: &Row) -> rusqlite::Result<Category> {
        Ok(Category {
            id: Some(row.get(0)?),
            name: row.get(1)?,
        })
    }

    fn insert(&self, db_connection: &Connection) -> rusqlite::Result<usize> {
        db_connection.execute("INSERT INTO categories (name) VALUES (?1)", params![self.name])
    }
}

impl Repository<'_, Category> {
    pub fn tasks(&self, category: &Category) -> InternalResult<Vec<Task>> {
        let category_id = Self::require_id(category)?;
        associations::tasks_for_category(category_id, self.connection())
    }

    pub fn add_task(&self, category: &Category, task: &Task) -> InternalResult<()> {
        let category_id = Self::require_id(category)?;
        let task_id = Repository::<Task>::require_id(task)?;

        if associations::link(category_id, task_id, self.connection())? {
            info!("Added task {} to category {}", task_id, category_id);
        }

        Ok(())
    }
}
