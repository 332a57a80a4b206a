//! Data-access boundary to the HRMS backend store.

pub mod memory;
pub mod mysql;

use async_trait::async_trait;
use chrono::NaiveDate;
use derive_more::Display;

use crate::model::attendance::{Attendance, NewAttendance};
use crate::model::employee::{Employee, NewEmployee};

pub use memory::MemoryGateway;
pub use mysql::MySqlGateway;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GatewayError {
    /// The payload was understood but refused, e.g. a duplicate employee id.
    #[display(fmt = "{}", _0)]
    Validation(String),

    #[display(fmt = "{}", _0)]
    NotFound(String),

    /// `(employee_id, date)` already has an attendance record.
    #[display(fmt = "{}", _0)]
    Conflict(String),

    #[display(fmt = "backend failure: {}", _0)]
    Backend(String),
}

impl std::error::Error for GatewayError {}

#[async_trait]
pub trait Gateway: Send + Sync {
    async fn list_employees(&self) -> Result<Vec<Employee>, GatewayError>;

    async fn get_employee(&self, employee_id: &str) -> Result<Option<Employee>, GatewayError>;

    async fn create_employee(&self, employee: NewEmployee) -> Result<Employee, GatewayError>;

    /// Removes the employee together with its attendance history.
    async fn delete_employee(&self, employee_id: &str) -> Result<(), GatewayError>;

    async fn mark_attendance(&self, attendance: NewAttendance) -> Result<Attendance, GatewayError>;

    async fn attendance_by_employee(&self, employee_id: &str)
        -> Result<Vec<Attendance>, GatewayError>;

    async fn attendance_by_date(&self, date: NaiveDate) -> Result<Vec<Attendance>, GatewayError>;
}

pub(crate) fn duplicate_id(employee_id: &str) -> GatewayError {
    GatewayError::Validation(format!("Employee ID {employee_id} already exists"))
}

pub(crate) fn duplicate_email(email: &str) -> GatewayError {
    GatewayError::Validation(format!("Email {email} already exists"))
}

pub(crate) fn employee_not_found(employee_id: &str) -> GatewayError {
    GatewayError::NotFound(format!("Employee with ID {employee_id} not found"))
}

pub(crate) fn already_marked(date: NaiveDate) -> GatewayError {
    GatewayError::Conflict(format!(
        "Attendance already marked for {}",
        date.format("%Y-%m-%d")
    ))
}
