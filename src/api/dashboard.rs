use crate::{api::Clock, error::ApiError, gateway::Gateway, table::aggregate};
use actix_web::{HttpResponse, web};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    #[schema(example = 10)]
    pub total_employees: usize,
    #[schema(example = 7)]
    pub today_present: usize,
    /// Everyone not marked present today, marked absent or not.
    #[schema(example = 3)]
    pub today_absent: usize,
}

#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Headcount and today's attendance", body = DashboardStats)
    ),
    tag = "Dashboard"
)]
pub async fn dashboard(
    gateway: web::Data<dyn Gateway>,
    clock: web::Data<Clock>,
) -> Result<HttpResponse, ApiError> {
    let employees = gateway.list_employees().await?;
    let today = gateway.attendance_by_date(clock.today()).await?;

    let today_present = aggregate(&today).by_status.get("Present").copied().unwrap_or(0);

    Ok(HttpResponse::Ok().json(DashboardStats {
        total_employees: employees.len(),
        today_present,
        today_absent: employees.len().saturating_sub(today_present),
    }))
}
