use chrono::NaiveDate;
use rocket::form::Form;
use rocket::{get, post, State};
use rocket_dyn_templates::{context, Template};
use rusqlite::Connection;
use tracing::info;

use crate::categories::data::Category;
use crate::data::DBConnection;
use crate::internal_error::{InternalError, InternalResult};
use crate::repository::Repository;

use super::data::*;

pub fn render_tasks(db_connection: &Connection) -> InternalResult<Template> {
    let tasks = Repository::<Task>::new(db_connection).list_all()?;

    Ok(Template::render("tasks", context! { tasks }))
}

pub fn render_task(task: &Task, db_connection: &Connection) -> InternalResult<Template> {
    let tasks = Repository::<Task>::new(db_connection);

    Ok(Template::render(
        "task",
        context! {
            task,
            categories: tasks.categories(task)?,
            all_categories: Repository::<Category>::new(db_connection).list_all()?,
        },
    ))
}

fn parse_due_date(due_date: &str) -> InternalResult<NaiveDate> {
    NaiveDate::parse_from_str(due_date, DUE_DATE_FORMAT).map_err(|e| {
        InternalError::InvalidInput(format!("due date {:?} is not YYYY-MM-DD: {}", due_date, e))
    })
}

#[get("/tasks")]
pub fn get_tasks(db_connection: &State<DBConnection>) -> InternalResult<Template> {
    let db_connection = db_connection.lock()?;

    render_tasks(&db_connection)
}

#[post("/tasks", data = "<task_form>")]
pub fn add_task(
    task_form: Form<NewTaskForm>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Template> {
    let due_date = parse_due_date(&task_form.due_date)?;
    let mut task = Task::new(task_form.into_inner().description, due_date);

    let db_connection = db_connection.lock()?;
    let id = Repository::<Task>::new(&db_connection).save(&mut task)?;
    info!("Created task {}", id);

    render_tasks(&db_connection)
}

#[get("/tasks/<task_id>")]
pub fn get_task(task_id: TaskID, db_connection: &State<DBConnection>) -> InternalResult<Template> {
    let db_connection = db_connection.lock()?;

    let task = Repository::<Task>::new(&db_connection).find_by_id(task_id)?;

    render_task(&task, &db_connection)
}

#[post("/add_categories", data = "<add_category_form>")]
pub fn add_category(
    add_category_form: Form<AddCategoryForm>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Template> {
    let db_connection = db_connection.lock()?;
    let tasks = Repository::<Task>::new(&db_connection);

    let category =
        Repository::<Category>::new(&db_connection).find_by_id(add_category_form.category_id)?;
    let task = tasks.find_by_id(add_category_form.task_id)?;
    tasks.add_category(&task, &category)?;

    render_task(&task, &db_connection)
}

#[get("/tasks/<task_id>/completed")]
pub fn toggle_completed(
    task_id: TaskID,
    db_connection: &State<DBConnection>,
) -> InternalResult<Template> {
    let db_connection = db_connection.lock()?;

    Repository::<Task>::new(&db_connection).toggle_completed(task_id)?;

    render_tasks(&db_connection)
}

#[post("/tasks/<task_id>/completed", data = "<completed_form>")]
pub fn set_completed(
    task_id: TaskID,
    completed_form: Form<CompletedForm>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Template> {
    let db_connection = db_connection.lock()?;
    let tasks = Repository::<Task>::new(&db_connection);

    let mut task = tasks.find_by_id(task_id)?;
    tasks.update_completed(&mut task, completed_form.completed)?;

    render_task(&task, &db_connection)
}
