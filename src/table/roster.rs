//! Duplicate-attendance pre-check over a day's already-fetched roster.
//!
//! Only a fast client-side guard: the gateway is the authority on
//! `(employee_id, date)` uniqueness.

use chrono::NaiveDate;

use super::{Criteria, matches};
use crate::model::attendance::{Attendance, AttendanceField};
use crate::model::employee::Employee;

pub fn already_marked(day_records: &[Attendance], employee_id: &str, date: NaiveDate) -> bool {
    let criteria = Criteria::new(date)
        .exact(AttendanceField::EmployeeId, employee_id)
        .exact(AttendanceField::Date, date.format("%Y-%m-%d").to_string());

    day_records.iter().any(|record| matches(record, &criteria))
}

/// Employees with no record in `day_records`, in input order.
pub fn unmarked_employees<'a>(
    employees: &'a [Employee],
    day_records: &[Attendance],
) -> Vec<&'a Employee> {
    employees
        .iter()
        .filter(|e| !day_records.iter().any(|r| r.employee_id == e.employee_id))
        .collect()
}
