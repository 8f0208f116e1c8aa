use rocket::FromForm;
use serde::Serialize;

use crate::tasks::data::TaskID;

pub type CategoryID = i64;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: Option<CategoryID>,
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Category {
        Category {
            id: None,
            name: name.into(),
        }
    }
}

#[derive(FromForm, Debug)]
pub struct NewCategoryForm {
    #[field(validate = len(1..))]
    pub name: String,
}

#[derive(FromForm, Debug)]
pub struct AddTaskForm {
    pub category_id: CategoryID,
    pub task_id: TaskID,
}
