use std::collections::BTreeMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::model::attendance::NewAttendance;
use crate::model::employee::NewEmployee;

static EMPLOYEE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid employee id pattern"));

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Field name → message for every field that failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub BTreeMap<&'static str, &'static str>);

impl ValidationErrors {
    fn add(&mut self, field: &'static str, message: &'static str) {
        self.0.insert(field, message);
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() { Ok(()) } else { Err(self) }
    }
}

pub fn validate_new_employee(employee: &NewEmployee) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if employee.employee_id.trim().is_empty() {
        errors.add("employee_id", "Employee ID is required");
    } else if !EMPLOYEE_ID.is_match(&employee.employee_id) {
        errors.add(
            "employee_id",
            "Only letters, numbers, underscores, and hyphens allowed",
        );
    }

    if employee.full_name.trim().is_empty() {
        errors.add("full_name", "Full name is required");
    }

    if employee.email.trim().is_empty() {
        errors.add("email", "Email is required");
    } else if !EMAIL.is_match(&employee.email) {
        errors.add("email", "Invalid email format");
    }

    if employee.department.trim().is_empty() {
        errors.add("department", "Department is required");
    }

    errors.into_result()
}

pub fn validate_new_attendance(
    attendance: &NewAttendance,
    today: NaiveDate,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if attendance.employee_id.trim().is_empty() {
        errors.add("employee_id", "Please select an employee");
    }
    if attendance.date > today {
        errors.add("date", "Date cannot be in the future");
    }

    errors.into_result()
}
