use crate::{
    api::Clock,
    error::ApiError,
    gateway::Gateway,
    model::{
        attendance::{Attendance, NewAttendance},
        employee::Employee,
    },
    table::{
        SortDirection, Stats, ViewConfig, build_view, parse_date,
        roster::{already_marked, unmarked_employees},
    },
    utils::{
        csv_export::{attendance_csv, export_file_name},
        validation::validate_new_attendance,
    },
};
use actix_web::{HttpResponse, http::header, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendanceQuery {
    /// Case-insensitive match on employee id
    pub search: Option<String>,
    /// Present or Absent
    pub status: Option<String>,
    /// all, today, yesterday, thisWeek, thisMonth or lastMonth
    pub range: Option<String>,
    /// One of date, status, employee_id
    pub sort: Option<String>,
    #[param(value_type = Option<String>, example = "desc")]
    pub direction: Option<SortDirection>,
}

impl AttendanceQuery {
    fn view_config(&self) -> ViewConfig {
        ViewConfig::sorted_by(
            self.sort.as_deref().unwrap_or("date"),
            self.direction.unwrap_or(SortDirection::Desc),
        )
        .search(self.search.clone())
        .filter("status", self.status.clone())
        .bucket(self.range.clone())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AttendanceTable {
    pub rows: Vec<Attendance>,
    pub stats: Stats,
}

fn table(
    records: &[Attendance],
    query: &AttendanceQuery,
    clock: &Clock,
) -> Result<AttendanceTable, ApiError> {
    let view = build_view(records, &query.view_config(), clock.today())?;
    debug!(shown = view.rows.len(), total = view.stats.total, "Attendance view built");

    Ok(AttendanceTable {
        rows: view.rows.into_iter().cloned().collect(),
        stats: view.stats,
    })
}

#[utoipa::path(
    post,
    path = "/attendance",
    request_body = NewAttendance,
    responses(
        (status = 201, description = "Attendance marked", body = Attendance),
        (status = 400, description = "Invalid fields"),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Attendance already marked for that day", body = Object, example = json!({
            "detail": "Attendance already marked for 2024-03-01"
        }))
    ),
    tag = "Attendance"
)]
#[instrument(
    name = "mark_attendance",
    skip(gateway, clock, payload),
    fields(employee_id = %payload.employee_id, date = %payload.date)
)]
pub async fn mark_attendance(
    gateway: web::Data<dyn Gateway>,
    clock: web::Data<Clock>,
    payload: web::Json<NewAttendance>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    validate_new_attendance(&payload, clock.today())?;

    // Fast path only; the gateway enforces uniqueness.
    let day = gateway.attendance_by_date(payload.date).await?;
    if already_marked(&day, &payload.employee_id, payload.date) {
        info!("Attendance already marked, rejected before submission");
        return Err(ApiError::Conflict(format!(
            "Attendance already marked for this employee on {}",
            payload.date.format("%Y-%m-%d")
        )));
    }

    let created = gateway.mark_attendance(payload).await?;
    info!(id = created.id, status = created.status.as_ref(), "Attendance marked");

    Ok(HttpResponse::Created().json(created))
}

#[utoipa::path(
    get,
    path = "/attendance/employee/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID"),
        AttendanceQuery
    ),
    responses(
        (status = 200, description = "Attendance history with whole-history statistics", body = AttendanceTable),
        (status = 400, description = "Unknown sort field, filter or date range")
    ),
    tag = "Attendance"
)]
pub async fn attendance_by_employee(
    gateway: web::Data<dyn Gateway>,
    clock: web::Data<Clock>,
    path: web::Path<String>,
    query: web::Query<AttendanceQuery>,
) -> Result<HttpResponse, ApiError> {
    let records = gateway.attendance_by_employee(&path).await?;
    Ok(HttpResponse::Ok().json(table(&records, &query, &clock)?))
}

#[utoipa::path(
    get,
    path = "/attendance/date/{date}",
    params(
        ("date", Path, description = "Day in yyyy-MM-dd form"),
        AttendanceQuery
    ),
    responses(
        (status = 200, description = "Daily roster with statistics", body = AttendanceTable),
        (status = 400, description = "Malformed date or bad query")
    ),
    tag = "Attendance"
)]
pub async fn attendance_by_date(
    gateway: web::Data<dyn Gateway>,
    clock: web::Data<Clock>,
    path: web::Path<String>,
    query: web::Query<AttendanceQuery>,
) -> Result<HttpResponse, ApiError> {
    let date = parse_date(&path)?;
    let records = gateway.attendance_by_date(date).await?;
    Ok(HttpResponse::Ok().json(table(&records, &query, &clock)?))
}

/// Employees with nothing marked yet on the given day
#[utoipa::path(
    get,
    path = "/attendance/date/{date}/unmarked",
    params(
        ("date", Path, description = "Day in yyyy-MM-dd form")
    ),
    responses(
        (status = 200, description = "Employees still to mark", body = [Employee]),
        (status = 400, description = "Malformed date")
    ),
    tag = "Attendance"
)]
pub async fn unmarked_on_date(
    gateway: web::Data<dyn Gateway>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let date = parse_date(&path)?;
    let employees = gateway.list_employees().await?;
    let day = gateway.attendance_by_date(date).await?;

    let pending: Vec<&Employee> = unmarked_employees(&employees, &day);
    Ok(HttpResponse::Ok().json(pending))
}

/// Full attendance history as a CSV download
#[utoipa::path(
    get,
    path = "/attendance/employee/{employee_id}/export",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv", body = String),
        (status = 404, description = "Employee not found")
    ),
    tag = "Attendance"
)]
#[instrument(name = "export_attendance", skip(gateway, clock))]
pub async fn export_attendance(
    gateway: web::Data<dyn Gateway>,
    clock: web::Data<Clock>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee = gateway
        .get_employee(&path)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".into()))?;
    let records = gateway.attendance_by_employee(&employee.employee_id).await?;

    let file_name = export_file_name(Some(&employee.employee_id), clock.today());
    info!(rows = records.len(), file = %file_name, "Exporting attendance");

    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        ))
        .body(attendance_csv(&records, &employee.full_name)))
}
