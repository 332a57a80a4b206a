use crate::{
    api::Clock,
    error::ApiError,
    gateway::Gateway,
    model::employee::{Department, Employee, EmployeeWithAttendance, NewEmployee},
    table::{SortDirection, Stats, ViewConfig, build_view},
    utils::validation::validate_new_employee,
};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmployeeQuery {
    /// Case-insensitive match on employee id, name or email
    pub search: Option<String>,
    /// Exact department label
    pub department: Option<String>,
    /// One of employee_id, full_name, email, department
    pub sort: Option<String>,
    #[param(value_type = Option<String>, example = "asc")]
    pub direction: Option<SortDirection>,
}

impl EmployeeQuery {
    fn view_config(&self) -> ViewConfig {
        ViewConfig::sorted_by(
            self.sort.as_deref().unwrap_or("employee_id"),
            self.direction.unwrap_or(SortDirection::Asc),
        )
        .search(self.search.clone())
        .filter("department", self.department.clone())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeTable {
    pub rows: Vec<Employee>,
    pub stats: Stats,
}

#[utoipa::path(
    get,
    path = "/employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Filtered, sorted employees with whole-list statistics", body = EmployeeTable),
        (status = 400, description = "Unknown sort field")
    ),
    tag = "Employee"
)]
#[instrument(name = "list_employees", skip(gateway, clock))]
pub async fn list_employees(
    gateway: web::Data<dyn Gateway>,
    clock: web::Data<Clock>,
    query: web::Query<EmployeeQuery>,
) -> Result<HttpResponse, ApiError> {
    let employees = gateway.list_employees().await?;
    let view = build_view(&employees, &query.view_config(), clock.today())?;

    debug!(shown = view.rows.len(), total = view.stats.total, "Employee view built");

    Ok(HttpResponse::Ok().json(EmployeeTable {
        rows: view.rows.into_iter().cloned().collect(),
        stats: view.stats,
    }))
}

#[utoipa::path(
    post,
    path = "/employees",
    request_body = NewEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Invalid fields, or duplicate employee id or email", body = Object, example = json!({
            "detail": "Employee ID EMP001 already exists"
        }))
    ),
    tag = "Employee"
)]
#[instrument(
    name = "create_employee",
    skip(gateway, payload),
    fields(employee_id = %payload.employee_id)
)]
pub async fn create_employee(
    gateway: web::Data<dyn Gateway>,
    payload: web::Json<NewEmployee>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    validate_new_employee(&payload)?;

    let created = gateway.create_employee(payload).await?;
    info!(id = created.id, "Employee created");

    Ok(HttpResponse::Created().json(created))
}

#[utoipa::path(
    get,
    path = "/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee with attendance history", body = EmployeeWithAttendance),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    gateway: web::Data<dyn Gateway>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let employee = gateway
        .get_employee(&employee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".into()))?;
    let attendance_records = gateway.attendance_by_employee(&employee_id).await?;

    Ok(HttpResponse::Ok().json(EmployeeWithAttendance {
        employee,
        attendance_records,
    }))
}

#[utoipa::path(
    delete,
    path = "/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Employee deleted successfully"
        })),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
#[instrument(name = "delete_employee", skip(gateway))]
pub async fn delete_employee(
    gateway: web::Data<dyn Gateway>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    gateway.delete_employee(&path).await?;
    info!("Employee deleted");

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee deleted successfully"
    })))
}

/// Suggested department labels for the employee form
#[utoipa::path(
    get,
    path = "/departments",
    responses(
        (status = 200, description = "Suggested labels", body = [String])
    ),
    tag = "Employee"
)]
pub async fn list_departments() -> HttpResponse {
    let labels: Vec<String> = Department::iter().map(|d| d.to_string()).collect();
    HttpResponse::Ok().json(labels)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test};
    use serde_json::Value;

    use crate::api::testing::{from_peer, test_app};
    use crate::gateway::{Gateway, MemoryGateway};
    use crate::model::employee::NewEmployee;

    async fn seeded() -> Arc<MemoryGateway> {
        let gateway = Arc::new(MemoryGateway::new());
        let people = [
            ("EMP003", "Cara Diaz", "Engineering"),
            ("EMP001", "Alan Brook", "Sales"),
            ("EMP002", "Bea Chen", "Engineering"),
        ];
        for (id, name, dept) in people {
            gateway
                .create_employee(NewEmployee {
                    employee_id: id.into(),
                    full_name: name.into(),
                    email: format!("{}@company.com", id.to_lowercase()),
                    department: dept.into(),
                })
                .await
                .unwrap();
        }
        gateway
    }

    #[actix_web::test]
    async fn list_filters_rows_but_counts_everyone() {
        let app = test_app!(seeded().await);

        let req = from_peer(test::TestRequest::get().uri("/employees?department=Engineering"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let ids: Vec<&str> = body["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["employee_id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["EMP002", "EMP003"]);
        assert_eq!(body["stats"]["total"], 3);
        assert_eq!(body["stats"]["by_status"]["Engineering"], 2);
    }

    #[actix_web::test]
    async fn list_sorts_by_name_descending() {
        let app = test_app!(seeded().await);

        let req = from_peer(test::TestRequest::get().uri("/employees?sort=full_name&direction=desc"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let names: Vec<&str> = body["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["full_name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Cara Diaz", "Bea Chen", "Alan Brook"]);
    }

    #[actix_web::test]
    async fn unknown_sort_field_is_a_bad_request() {
        let app = test_app!(seeded().await);

        let req = from_peer(test::TestRequest::get().uri("/employees?sort=salary")).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "invalid sort field: salary");
    }

    #[actix_web::test]
    async fn unknown_direction_gets_a_json_detail() {
        let app = test_app!(seeded().await);

        let req = from_peer(test::TestRequest::get().uri("/employees?direction=up")).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert!(body["detail"].as_str().unwrap().contains("unknown variant `up`"));
    }

    #[actix_web::test]
    async fn create_validates_then_rejects_duplicates() {
        let app = test_app!(seeded().await);

        let req = from_peer(test::TestRequest::post().uri("/employees"))
            .set_json(serde_json::json!({
                "employee_id": "bad id",
                "full_name": "",
                "email": "nope",
                "department": "Sales"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["errors"]["full_name"], "Full name is required");
        assert_eq!(body["errors"]["email"], "Invalid email format");

        let req = from_peer(test::TestRequest::post().uri("/employees"))
            .set_json(serde_json::json!({
                "employee_id": "EMP001",
                "full_name": "Someone Else",
                "email": "else@company.com",
                "department": "Sales"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "Employee ID EMP001 already exists");

        let req = from_peer(test::TestRequest::post().uri("/employees"))
            .set_json(serde_json::json!({
                "employee_id": "EMP004",
                "full_name": "Dan Evans",
                "email": "dan@company.com",
                "department": "Finance"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["id"], 4);
    }

    #[actix_web::test]
    async fn get_and_delete() {
        let app = test_app!(seeded().await);

        let req = from_peer(test::TestRequest::get().uri("/employees/EMP002")).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["full_name"], "Bea Chen");
        assert!(body["attendance_records"].as_array().unwrap().is_empty());

        let req = from_peer(test::TestRequest::delete().uri("/employees/EMP002")).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = from_peer(test::TestRequest::get().uri("/employees/EMP002")).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = from_peer(test::TestRequest::delete().uri("/employees/EMP002")).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn departments_are_listed() {
        let app = test_app!(Arc::new(MemoryGateway::new()));

        let req = from_peer(test::TestRequest::get().uri("/departments")).to_request();
        let body: Vec<String> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.len(), 10);
        assert_eq!(body[0], "Engineering");
    }
}
