use rocket::figment::Figment;
use rocket::fs::FileServer;
use rocket::{Build, Rocket};
use rocket_dyn_templates::Template;

use std::error::Error;

mod associations;
mod categories;
mod data;
mod endpoints;
mod internal_error;
mod repository;
mod tasks;

use data::{AppConfig, DBConnection};

#[macro_use]
extern crate rocket;

pub fn build_rocket(figment: Figment, db_connection: DBConnection) -> Rocket<Build> {
    rocket::custom(figment)
        .manage(db_connection)
        .attach(Template::fairing())
        .mount(
            "/",
            routes![
                endpoints::index,
                tasks::endpoints::get_tasks,
                tasks::endpoints::add_task,
                tasks::endpoints::get_task,
                tasks::endpoints::add_category,
                tasks::endpoints::toggle_completed,
                tasks::endpoints::set_completed,
                categories::endpoints::get_categories,
                categories::endpoints::add_category,
                categories::endpoints::get_category,
                categories::endpoints::add_task,
                categories::endpoints::toggle_task_completed,
            ],
        )
        .mount(
            "/api",
            routes![
                endpoints::get_tasks,
                endpoints::get_categories,
                endpoints::get_task_categories,
                endpoints::get_category_tasks,
            ],
        )
        .mount(
            "/static",
            FileServer::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
        )
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let figment = rocket::Config::figment();
    let app_config: AppConfig = figment.extract()?;

    let db_connection = data::open_connection(&app_config.database_path)?;

    build_rocket(figment, db_connection.clone()).launch().await?;

    data::close_connection(db_connection)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocket::http::{ContentType, Status};
    use rocket::local::blocking::Client;
    use serde_json::Value;

    use std::sync::{Arc, Mutex};

    fn client() -> Client {
        let figment = rocket::Config::figment()
            .merge((
                "template_dir",
                concat!(env!("CARGO_MANIFEST_DIR"), "/templates"),
            ))
            .merge(("log_level", "off"));
        let db_connection = Arc::new(Mutex::new(data::open_test_connection()));

        Client::tracked(build_rocket(figment, db_connection)).unwrap()
    }

    fn post_form(client: &Client, uri: &'static str, body: &'static str) -> Status {
        client
            .post(uri)
            .header(ContentType::Form)
            .body(body)
            .dispatch()
            .status()
    }

    fn get_json(client: &Client, uri: &'static str) -> Value {
        let response = client.get(uri).dispatch();
        assert_eq!(response.status(), Status::Ok);

        serde_json::from_str(&response.into_string().unwrap()).unwrap()
    }

    #[test]
    fn pages_render() {
        let client = client();

        for uri in &["/", "/tasks", "/categories"] {
            let response = client.get(*uri).dispatch();
            assert_eq!(response.status(), Status::Ok, "{}", uri);
            assert_eq!(response.content_type(), Some(ContentType::HTML));
        }
    }

    #[test]
    fn created_task_toggles() {
        let client = client();

        let response = client
            .post("/tasks")
            .header(ContentType::Form)
            .body("description=Buy%20milk&due_date=2024-01-01")
            .dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert!(response.into_string().unwrap().contains("Buy milk"));

        let tasks = get_json(&client, "/api/tasks");
        assert_eq!(tasks.as_array().unwrap().len(), 1);
        assert_eq!(tasks[0]["description"], "Buy milk");
        assert_eq!(tasks[0]["due_date"], "2024-01-01");
        assert_eq!(tasks[0]["completed"], false);

        assert_eq!(client.get("/tasks/1/completed").dispatch().status(), Status::Ok);
        assert_eq!(get_json(&client, "/api/tasks")[0]["completed"], true);

        assert_eq!(client.get("/tasks/1/completed").dispatch().status(), Status::Ok);
        assert_eq!(get_json(&client, "/api/tasks")[0]["completed"], false);
    }

    #[test]
    fn task_input_is_checked() {
        let client = client();

        assert_eq!(
            post_form(&client, "/tasks", "description=Buy%20milk&due_date=soon"),
            Status::BadRequest
        );
        assert_eq!(
            post_form(&client, "/tasks", "description=&due_date=2024-01-01"),
            Status::UnprocessableEntity
        );
        assert_eq!(
            post_form(&client, "/categories", "name="),
            Status::UnprocessableEntity
        );
        assert_eq!(get_json(&client, "/api/tasks").as_array().unwrap().len(), 0);
    }

    #[test]
    fn missing_rows_are_not_found() {
        let client = client();

        assert_eq!(client.get("/tasks/99").dispatch().status(), Status::NotFound);
        assert_eq!(client.get("/categories/99").dispatch().status(), Status::NotFound);
        assert_eq!(
            client.get("/tasks/99/completed").dispatch().status(),
            Status::NotFound
        );
        assert_eq!(
            client.get("/api/tasks/99/categories").dispatch().status(),
            Status::NotFound
        );
    }

    #[test]
    fn categories_collect_tasks() {
        let client = client();

        assert_eq!(post_form(&client, "/categories", "name=Groceries"), Status::Ok);
        assert_eq!(
            post_form(&client, "/tasks", "description=Buy%20milk&due_date=2024-01-01"),
            Status::Ok
        );

        assert_eq!(post_form(&client, "/add_tasks", "category_id=1&task_id=1"), Status::Ok);
        assert_eq!(
            post_form(&client, "/add_categories", "category_id=1&task_id=1"),
            Status::Ok
        );

        let tasks = get_json(&client, "/api/categories/1/tasks");
        assert_eq!(tasks.as_array().unwrap().len(), 1);
        assert_eq!(tasks[0]["description"], "Buy milk");

        let categories = get_json(&client, "/api/tasks/1/categories");
        assert_eq!(categories.as_array().unwrap().len(), 1);
        assert_eq!(categories[0]["name"], "Groceries");

        let all_categories = get_json(&client, "/api/categories");
        assert_eq!(all_categories.as_array().unwrap().len(), 1);
        assert_eq!(all_categories[0]["id"], 1);
        assert_eq!(all_categories[0]["name"], "Groceries");

        let response = client.get("/categories/1").dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert!(response.into_string().unwrap().contains("Buy milk"));

        assert_eq!(client.get("/categories/1/1/completed").dispatch().status(), Status::Ok);
        assert_eq!(get_json(&client, "/api/categories/1/tasks")[0]["completed"], true);
    }

    #[test]
    fn completed_flag_can_be_set_explicitly() {
        let client = client();

        assert_eq!(
            post_form(&client, "/tasks", "description=Buy%20milk&due_date=2024-01-01"),
            Status::Ok
        );

        assert_eq!(post_form(&client, "/tasks/1/completed", "completed=true"), Status::Ok);
        assert_eq!(get_json(&client, "/api/tasks")[0]["completed"], true);

        assert_eq!(post_form(&client, "/tasks/1/completed", "completed=true"), Status::Ok);
        assert_eq!(get_json(&client, "/api/tasks")[0]["completed"], true);

        assert_eq!(post_form(&client, "/tasks/1/completed", ""), Status::Ok);
        assert_eq!(get_json(&client, "/api/tasks")[0]["completed"], false);
    }

    #[test]
    fn linking_unknown_task_is_not_found() {
        let client = client();

        assert_eq!(post_form(&client, "/categories", "name=Groceries"), Status::Ok);
        assert_eq!(
            post_form(&client, "/add_tasks", "category_id=1&task_id=99"),
            Status::NotFound
        );
        assert_eq!(
            get_json(&client, "/api/categories/1/tasks")
                .as_array()
                .unwrap()
                .len(),
            0
        );
    }

    #[test]
    fn linking_unknown_category_is_not_found() {
        let client = client();

        assert_eq!(
            post_form(&client, "/tasks", "description=Buy%20milk&due_date=2024-01-01"),
            Status::Ok
        );
        assert_eq!(
            post_form(&client, "/add_categories", "category_id=99&task_id=1"),
            Status::NotFound
        );
        assert_eq!(
            get_json(&client, "/api/tasks/1/categories")
                .as_array()
                .unwrap()
                .len(),
            0
        );
    }
}
