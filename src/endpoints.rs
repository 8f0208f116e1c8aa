use rocket::serde::json::Json;
use rocket::{get, State};
use rocket_dyn_templates::{context, Template};

use crate::categories::data::{Category, CategoryID};
use crate::data::DBConnection;
use crate::internal_error::InternalResult;
use crate::repository::Repository;
use crate::tasks::data::{Task, TaskID};

#[get("/")]
pub fn index(db_connection: &State<DBConnection>) -> InternalResult<Template> {
    let db_connection = db_connection.lock()?;

    Ok(Template::render(
        "index",
        context! {
            categories: Repository::<Category>::new(&db_connection).list_all()?,
            tasks: Repository::<Task>::new(&db_connection).list_all()?,
        },
    ))
}

#[get("/tasks")]
pub fn get_tasks(db_connection: &State<DBConnection>) -> InternalResult<Json<Vec<Task>>> {
    let db_connection = db_connection.lock()?;

    Ok(Json(Repository::<Task>::new(&db_connection).list_all()?))
}

#[get("/categories")]
pub fn get_categories(db_connection: &State<DBConnection>) -> InternalResult<Json<Vec<Category>>> {
    let db_connection = db_connection.lock()?;

    Ok(Json(Repository::<Category>::new(&db_connection).list_all()?))
}

#[get("/tasks/<task_id>/categories")]
pub fn get_task_categories(
    task_id: TaskID,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<Vec<Category>>> {
    let db_connection = db_connection.lock()?;
    let tasks = Repository::<Task>::new(&db_connection);

    let task = tasks.find_by_id(task_id)?;

    Ok(Json(tasks.categories(&task)?))
}

#[get("/categories/<category_id>/tasks")]
pub fn get_category_tasks(
    category_id: CategoryID,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<Vec<Task>>> {
    let db_connection = db_connection.lock()?;
    let categories = Repository::<Category>::new(&db_connection);

    let category = categories.find_by_id(category_id)?;

    Ok(Json(categories.tasks(&category)?))
}
