use chrono::NaiveDate;

use crate::categories::data::CategoryID;
use rocket::FromForm;
use serde::Serialize;

pub type TaskID = i64;

pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: Option<TaskID>,
    pub description: String,
    pub due_date: NaiveDate,
    pub completed: bool,
}

impl Task {
    /// A task that has not been saved yet.
    pub fn new(description: impl Into<String>, due_date: NaiveDate) -> Task {
        Task {
            id: None,
            description: description.into(),
            due_date,
            completed: false,
        }
    }
}

#[derive(FromForm, Debug)]
pub struct NewTaskForm {
    #[field(validate = len(1..))]
    pub description: String,
    #[field(validate = len(1..))]
    pub due_date: String,
}

#[derive(FromForm, Debug)]
pub struct AddCategoryForm {
    pub category_id: CategoryID,
    pub task_id: TaskID,
}

#[derive(FromForm, Debug)]
pub struct CompletedForm {
    pub completed: bool,
}
