use rocket::form::Form;
use rocket::{get, post, State};
use rocket_dyn_templates::{context, Template};
use rusqlite::Connection;
use tracing::info;

use crate::data::DBConnection;
use crate::internal_error::InternalResult;
use crate::repository::Repository;
use crate::tasks::data::{Task, TaskID};

use super::data::*;

pub fn render_categories(db_connection: &Connection) -> InternalResult<Template> {
    let categories = Repository::<Category>::new(db_connection).list_all()?;

    Ok(Template::render("categories", context! { categories }))
}

pub fn render_category(category: &Category, db_connection: &Connection) -> InternalResult<Template> {
    let categories = Repository::<Category>::new(db_connection);

    Ok(Template::render(
        "category",
        context! {
            category,
            tasks: categories.tasks(category)?,
            all_tasks: Repository::<Task>::new(db_connection).list_all()?,
        },
    ))
}

#[get("/categories")]
pub fn get_categories(db_connection: &State<DBConnection>) -> InternalResult<Template> {
    let db_connection = db_connection.lock()?;

    render_categories(&db_connection)
}

#[post("/categories", data = "<category_form>")]
pub fn add_category(
    category_form: Form<NewCategoryForm>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Template> {
    let mut category = Category::new(category_form.into_inner().name);

    let db_connection = db_connection.lock()?;
    let id = Repository::<Category>::new(&db_connection).save(&mut category)?;
    info!("Created category {}", id);

    render_categories(&db_connection)
}

#[get("/categories/<category_id>")]
pub fn get_category(
    category_id: CategoryID,
    db_connection: &State<DBConnection>,
) -> InternalResult<Template> {
    let db_connection = db_connection.lock()?;

    let category = Repository::<Category>::new(&db_connection).find_by_id(category_id)?;

    render_category(&category, &db_connection)
}

#[post("/add_tasks", data = "<add_task_form>")]
pub fn add_task(
    add_task_form: Form<AddTaskForm>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Template> {
    let db_connection = db_connection.lock()?;
    let categories = Repository::<Category>::new(&db_connection);

    let category = categories.find_by_id(add_task_form.category_id)?;
    let task = Repository::<Task>::new(&db_connection).find_by_id(add_task_form.task_id)?;
    categories.add_task(&category, &task)?;

    render_category(&category, &db_connection)
}

#[get("/categories/<category_id>/<task_id>/completed")]
pub fn toggle_task_completed(
    category_id: CategoryID,
    task_id: TaskID,
    db_connection: &State<DBConnection>,
) -> InternalResult<Template> {
    let db_connection = db_connection.lock()?;

    let category = Repository::<Category>::new(&db_connection).find_by_id(category_id)?;
    Repository::<Task>::new(&db_connection).toggle_completed(task_id)?;

    render_category(&category, &db_connection)
}
