use crate::api::attendance::AttendanceTable;
use crate::api::dashboard::DashboardStats;
use crate::api::employee::EmployeeTable;
use crate::model::attendance::{Attendance, AttendanceStatus, NewAttendance};
use crate::model::employee::{Employee, EmployeeWithAttendance, NewEmployee};
use crate::table::Stats;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "1.0.0",
        description = r#"
## Lightweight Human Resource Management System

### Key Features
- **Employee Management**
  - Create, list, view and delete employee records
  - Search, department filter and sorting on the employee table
- **Attendance Management**
  - Mark one Present/Absent record per employee per day
  - History by employee, roster by date, relative date ranges
  - CSV export of an employee's full history
- **Dashboard**
  - Headcount and today's attendance

### Response Format
- JSON responses; list endpoints return `{rows, stats}` where `stats`
  always describes the whole collection, not the filtered rows
- Errors are `{"detail": "..."}`
"#,
    ),
    paths(
        crate::api::health::index,
        crate::api::health::health,

        crate::api::employee::list_employees,
        crate::api::employee::create_employee,
        crate::api::employee::get_employee,
        crate::api::employee::delete_employee,
        crate::api::employee::list_departments,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::attendance_by_employee,
        crate::api::attendance::attendance_by_date,
        crate::api::attendance::unmarked_on_date,
        crate::api::attendance::export_attendance,

        crate::api::dashboard::dashboard
    ),
    components(
        schemas(
            Employee,
            NewEmployee,
            EmployeeWithAttendance,
            EmployeeTable,
            Attendance,
            AttendanceStatus,
            NewAttendance,
            AttendanceTable,
            Stats,
            DashboardStats
        )
    ),
    tags(
        (name = "Health", description = "Liveness probes"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
        (name = "Dashboard", description = "Summary APIs"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/employees",
            "/employees/{employee_id}",
            "/attendance",
            "/attendance/employee/{employee_id}",
            "/attendance/date/{date}",
            "/dashboard",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
