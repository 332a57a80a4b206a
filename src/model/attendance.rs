use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumString};
use utoipa::ToSchema;

use crate::table::{FieldValue, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, AsRefStr, ToSchema)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Attendance {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "EMP001")]
    pub employee_id: String,
    /// `yyyy-MM-dd`, kept as delivered by the backend.
    #[schema(example = "2024-03-01", format = "date")]
    pub date: String,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NewAttendance {
    #[schema(example = "EMP001")]
    pub employee_id: String,
    #[schema(example = "2024-03-01", format = "date", value_type = String)]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

impl NewAttendance {
    pub fn into_attendance(self, id: u64) -> Attendance {
        Attendance {
            id,
            employee_id: self.employee_id,
            date: self.date.format("%Y-%m-%d").to_string(),
            status: self.status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum AttendanceField {
    EmployeeId,
    Date,
    Status,
}

impl Record for Attendance {
    type Field = AttendanceField;

    fn search_values(&self) -> Vec<&str> {
        vec![self.employee_id.as_str()]
    }

    fn field(&self, field: AttendanceField) -> FieldValue<'_> {
        match field {
            AttendanceField::EmployeeId => FieldValue::Text(self.employee_id.as_str()),
            AttendanceField::Date => FieldValue::Date(self.date.as_str()),
            AttendanceField::Status => FieldValue::Text(self.status.as_ref()),
        }
    }

    fn date(&self) -> Option<&str> {
        Some(self.date.as_str())
    }

    fn group(&self) -> &str {
        self.status.as_ref()
    }

    fn is_positive(&self) -> bool {
        self.status == AttendanceStatus::Present
    }

    fn known_groups() -> &'static [&'static str] {
        &["Present", "Absent"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_capitalised() {
        assert_eq!(serde_json::to_string(&AttendanceStatus::Present).unwrap(), "\"Present\"");
        assert_eq!("Absent".parse::<AttendanceStatus>().ok(), Some(AttendanceStatus::Absent));
    }

    #[test]
    fn new_attendance_formats_iso_date() {
        let body = r#"{"employee_id":"E1","date":"2024-03-01","status":"Absent"}"#;
        let new: NewAttendance = serde_json::from_str(body).unwrap();
        let record = new.into_attendance(9);
        assert_eq!(record.date, "2024-03-01");
        assert_eq!(record.status, AttendanceStatus::Absent);
    }

    #[test]
    fn bad_status_is_rejected_at_the_boundary() {
        let body = r#"{"employee_id":"E1","date":"2024-03-01","status":"Late"}"#;
        assert!(serde_json::from_str::<NewAttendance>(body).is_err());
    }
}
