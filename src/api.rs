//! HTTP surface of the roster service.
//!
//! | Route | Success | Failure |
//! |---|---|---|
//! | `GET /students` | 200, array of students | |
//! | `POST /students` | 200, `{ message, data }` | 400 on a malformed body |
//! | `PUT /students/{id}` | 200, `{ message, data }` | 404, `{ error }` for an unknown id |
//! | `DELETE /students/{id}` | 200, `{ message }` | |
//!
//! Plus `GET /` (greeting), `GET /healthz` and `GET /readyz` for probes.
//!
//! The body is trusted to be `{ "name": ... }`. An empty body or a missing
//! `name` yields an empty name; only undecodable JSON is rejected.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::router::Router;
use crate::service::StudentService;
use crate::status::Status;
use crate::store::Student;

pub const GREETING: &str = "Welcome to the roster student service!";

/// Builds the full route table around `service`.
pub fn router(service: Arc<StudentService>) -> Router<StudentService> {
    Router::with_state(service)
        .get("/", welcome)
        .get("/healthz", liveness)
        .get("/readyz", readiness)
        .get("/students", list_students)
        .post("/students", create_student)
        .put("/students/{id}", update_student)
        .delete("/students/{id}", delete_student)
}

// ── Wire shapes ───────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct StudentBody {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
struct Confirmation {
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Student>,
}

#[derive(Debug, Serialize)]
struct Failure {
    error: String,
}

fn failure(status: Status, error: impl Into<String>) -> Response {
    (status, Json(Failure { error: error.into() })).into_response()
}

/// `:id` as an integer. Anything unparsable matches no student.
fn student_id(req: &Request) -> Option<u32> {
    req.param("id")?.parse().ok()
}

fn student_name(req: &Request) -> Result<String, Response> {
    match req.json::<StudentBody>() {
        Ok(body) => Ok(body.name.unwrap_or_default()),
        Err(e) => {
            debug!(path = req.path(), "rejecting body: {e}");
            Err(failure(Status::BadRequest, e.to_string()))
        }
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

async fn welcome(_req: Request) -> &'static str {
    GREETING
}

/// Liveness: if the process answers HTTP at all, it is alive.
async fn liveness(_req: Request) -> &'static str {
    "ok"
}

async fn readiness(service: Arc<StudentService>, _req: Request) -> Response {
    Json(serde_json::json!({ "status": "ready", "students": service.count() })).into_response()
}

async fn list_students(service: Arc<StudentService>, _req: Request) -> Json<Vec<Student>> {
    Json(service.list())
}

async fn create_student(service: Arc<StudentService>, req: Request) -> Response {
    let name = match student_name(&req) {
        Ok(name) => name,
        Err(res) => return res,
    };
    let student = service.create(name);
    Json(Confirmation { message: "Student Added", data: Some(student) }).into_response()
}

async fn update_student(service: Arc<StudentService>, req: Request) -> Response {
    let name = match student_name(&req) {
        Ok(name) => name,
        Err(res) => return res,
    };
    let Some(id) = student_id(&req) else {
        return failure(Status::NotFound, "Student not found");
    };
    match service.update(id, name) {
        Ok(student) => Json(Confirmation { message: "Student Updated", data: Some(student) }).into_response(),
        Err(_) => failure(Status::NotFound, "Student not found"),
    }
}

async fn delete_student(service: Arc<StudentService>, req: Request) -> Json<Confirmation> {
    if let Some(id) = student_id(&req) {
        service.delete(id);
    }
    Json(Confirmation { message: "Student Deleted", data: None })
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::HeaderMap;
    use serde_json::{Value, json};

    use super::*;
    use crate::method::Method;
    use crate::store::{IdPolicy, StudentStore};

    struct App {
        router: Router<StudentService>,
    }

    impl App {
        fn seeded() -> Self {
            let service = StudentService::new(StudentStore::seeded(IdPolicy::default()));
            Self { router: router(Arc::new(service)) }
        }

        async fn call(&self, method: Method, path: &str, body: &str) -> (u16, Value) {
            let req = Request::new(method, path, HeaderMap::new(), Bytes::from(body.to_owned()));
            let res = self.router.handle(req).await;
            let value = serde_json::from_slice(res.body()).unwrap_or(Value::Null);
            (res.status_code(), value)
        }

        async fn list(&self) -> Value {
            self.call(Method::Get, "/students", "").await.1
        }
    }

    fn seed() -> Value {
        json!([{ "id": 1, "name": "Priyanshu" }, { "id": 2, "name": "Aarav" }])
    }

    #[tokio::test]
    async fn create_appends_with_next_id() {
        let app = App::seeded();
        let (status, body) = app.call(Method::Post, "/students", r#"{"name":"Zoya"}"#).await;
        assert_eq!(status, 200);
        assert_eq!(body, json!({ "message": "Student Added", "data": { "id": 3, "name": "Zoya" } }));
        assert_eq!(
            app.list().await,
            json!([
                { "id": 1, "name": "Priyanshu" },
                { "id": 2, "name": "Aarav" },
                { "id": 3, "name": "Zoya" },
            ])
        );
    }

    #[tokio::test]
    async fn update_replaces_name_in_place() {
        let app = App::seeded();
        let (status, body) = app.call(Method::Put, "/students/2", r#"{"name":"Aarav K."}"#).await;
        assert_eq!(status, 200);
        assert_eq!(body, json!({ "message": "Student Updated", "data": { "id": 2, "name": "Aarav K." } }));
        assert_eq!(
            app.list().await,
            json!([{ "id": 1, "name": "Priyanshu" }, { "id": 2, "name": "Aarav K." }])
        );
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let app = App::seeded();
        let (status, body) = app.call(Method::Put, "/students/99", r#"{"name":"X"}"#).await;
        assert_eq!(status, 404);
        assert_eq!(body, json!({ "error": "Student not found" }));
        assert_eq!(app.list().await, seed());
    }

    #[tokio::test]
    async fn update_non_numeric_id_is_not_found() {
        let app = App::seeded();
        let (status, _) = app.call(Method::Put, "/students/abc", r#"{"name":"X"}"#).await;
        assert_eq!(status, 404);
        assert_eq!(app.list().await, seed());
    }

    #[tokio::test]
    async fn delete_twice_is_a_no_op() {
        let app = App::seeded();
        let (status, body) = app.call(Method::Delete, "/students/1", "").await;
        assert_eq!(status, 200);
        assert_eq!(body, json!({ "message": "Student Deleted" }));
        assert_eq!(app.list().await, json!([{ "id": 2, "name": "Aarav" }]));

        let (status, _) = app.call(Method::Delete, "/students/1", "").await;
        assert_eq!(status, 200);
        assert_eq!(app.list().await, json!([{ "id": 2, "name": "Aarav" }]));
    }

    #[tokio::test]
    async fn delete_non_numeric_id_changes_nothing() {
        let app = App::seeded();
        let (status, _) = app.call(Method::Delete, "/students/first", "").await;
        assert_eq!(status, 200);
        assert_eq!(app.list().await, seed());
    }

    #[tokio::test]
    async fn missing_name_becomes_empty() {
        let app = App::seeded();
        let (_, body) = app.call(Method::Post, "/students", "").await;
        assert_eq!(body["data"], json!({ "id": 3, "name": "" }));
        let (_, body) = app.call(Method::Post, "/students", "{}").await;
        assert_eq!(body["data"], json!({ "id": 4, "name": "" }));
    }

    #[tokio::test]
    async fn update_without_name_blanks_it() {
        let app = App::seeded();
        let (status, body) = app.call(Method::Put, "/students/1", "{}").await;
        assert_eq!(status, 200);
        assert_eq!(body["data"], json!({ "id": 1, "name": "" }));

        let (status, body) = app.call(Method::Put, "/students/2", r#"{"name":null}"#).await;
        assert_eq!(status, 200);
        assert_eq!(body["data"], json!({ "id": 2, "name": "" }));

        assert_eq!(app.list().await, json!([{ "id": 1, "name": "" }, { "id": 2, "name": "" }]));
    }

    #[tokio::test]
    async fn head_on_students_answers_like_get() {
        let app = App::seeded();
        let req = Request::new(Method::Head, "/students", HeaderMap::new(), Bytes::new());
        let res = app.router.handle(req).await;
        assert_eq!(res.status_code(), 200);
        assert!(res.body().is_empty());
        assert_eq!(res.header("content-type"), Some("application/json"));
    }

    #[tokio::test]
    async fn malformed_body_is_rejected_without_side_effects() {
        let app = App::seeded();
        let (status, body) = app.call(Method::Post, "/students", "{name").await;
        assert_eq!(status, 400);
        assert!(body["error"].is_string());
        assert_eq!(app.list().await, seed());
    }

    #[tokio::test]
    async fn probes_and_greeting() {
        let app = App::seeded();
        let req = Request::new(Method::Get, "/", HeaderMap::new(), Bytes::new());
        let res = app.router.handle(req).await;
        assert_eq!(res.body(), GREETING.as_bytes());

        let (status, body) = app.call(Method::Get, "/readyz", "").await;
        assert_eq!(status, 200);
        assert_eq!(body, json!({ "status": "ready", "students": 2 }));
    }
}
