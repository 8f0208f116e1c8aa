//! Data access shared by every persisted entity.
//!
//! A [`Repository`] borrows the connection it runs on; it never opens one.
//! Entity specific operations (relations, flag updates) live in `impl`
//! blocks on `Repository<'_, Task>` and `Repository<'_, Category>`.

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use std::marker::PhantomData;

use crate::internal_error::{InternalError, InternalResult};

pub trait Entity: Sized {
    /// Name used in error messages.
    const NAME: &'static str;
    const TABLE: &'static str;
    /// Columns selected by the finders, `id` first.
    const COLUMNS: &'static str;

    fn id(&self) -> Option<i64>;
    fn set_id(&mut self, id: i64);

    /// Builds an instance from a row selected with [`Entity::COLUMNS`].
    fn from_row(row: &Row) -> rusqlite::Result<Self>;

    /// Inserts the entity's fields as a new row.
    fn insert(&self, db_connection: &Connection) -> rusqlite::Result<usize>;
}

pub struct Repository<'c, E> {
    db_connection: &'c Connection,
    entity: PhantomData<E>,
}

impl<'c, E: Entity> Repository<'c, E> {
    pub fn new(db_connection: &'c Connection) -> Self {
        Repository {
            db_connection,
            entity: PhantomData,
        }
    }

    pub fn connection(&self) -> &'c Connection {
        self.db_connection
    }

    pub fn save(&self, entity: &mut E) -> InternalResult<i64> {
        if let Some(id) = entity.id() {
            return Err(InternalError::AlreadySaved {
                entity: E::NAME,
                id,
            });
        }

        entity.insert(self.db_connection)?;
        let id = self.db_connection.last_insert_rowid();
        entity.set_id(id);

        debug!("Saved {} {}", E::NAME, id);
        Ok(id)
    }

    pub fn find_by_id(&self, id: i64) -> InternalResult<E> {
        let query = format!("SELECT {} FROM {} WHERE id = (?1)", E::COLUMNS, E::TABLE);

        self.db_connection
            .query_row(&query, params![id], |row| E::from_row(row))
            .optional()?
            .ok_or(InternalError::NotFound {
                entity: E::NAME,
                id,
            })
    }

    pub fn list_all(&self) -> InternalResult<Vec<E>> {
        let query = format!("SELECT {} FROM {} ORDER BY id", E::COLUMNS, E::TABLE);
        let mut statement = self.db_connection.prepare(&query)?;

        let rows = statement.query_map(params![], |row| E::from_row(row))?;

        let mut entities = vec![];
        for row_result in rows {
            entities.push(row_result?);
        }

        Ok(entities)
    }

    pub(crate) fn require_id(entity: &E) -> InternalResult<i64> {
        entity
            .id()
            .ok_or(InternalError::NotSaved { entity: E::NAME })
    }
}
