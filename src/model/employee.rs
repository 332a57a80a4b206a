use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

use crate::model::attendance::Attendance;
use crate::table::{FieldValue, Record};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": "EMP001",
        "full_name": "John Doe",
        "email": "john.doe@company.com",
        "department": "Engineering"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "EMP001")]
    pub employee_id: String,

    #[schema(example = "John Doe")]
    pub full_name: String,

    #[schema(example = "john.doe@company.com")]
    pub email: String,

    #[schema(example = "Engineering")]
    pub department: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NewEmployee {
    #[schema(example = "EMP001")]
    pub employee_id: String,
    #[schema(example = "John Doe")]
    pub full_name: String,
    #[schema(example = "john.doe@company.com", format = "email")]
    pub email: String,
    #[schema(example = "Engineering")]
    pub department: String,
}

impl NewEmployee {
    pub fn into_employee(self, id: u64) -> Employee {
        Employee {
            id,
            employee_id: self.employee_id,
            full_name: self.full_name,
            email: self.email,
            department: self.department,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct EmployeeWithAttendance {
    #[serde(flatten)]
    pub employee: Employee,
    pub attendance_records: Vec<Attendance>,
}

/// Suggested department labels. Not enforced on `Employee::department`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter, AsRefStr)]
pub enum Department {
    Engineering,
    Marketing,
    Sales,
    #[strum(serialize = "Human Resources")]
    HumanResources,
    Finance,
    Operations,
    #[strum(serialize = "IT Support")]
    ItSupport,
    #[strum(serialize = "Research & Development")]
    ResearchAndDevelopment,
    #[strum(serialize = "Customer Support")]
    CustomerSupport,
    #[strum(serialize = "Product Management")]
    ProductManagement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum EmployeeField {
    EmployeeId,
    FullName,
    Email,
    Department,
}

impl Record for Employee {
    type Field = EmployeeField;

    fn search_values(&self) -> Vec<&str> {
        vec![
            self.full_name.as_str(),
            self.employee_id.as_str(),
            self.email.as_str(),
        ]
    }

    fn field(&self, field: EmployeeField) -> FieldValue<'_> {
        FieldValue::Text(match field {
            EmployeeField::EmployeeId => self.employee_id.as_str(),
            EmployeeField::FullName => self.full_name.as_str(),
            EmployeeField::Email => self.email.as_str(),
            EmployeeField::Department => self.department.as_str(),
        })
    }

    fn group(&self) -> &str {
        &self.department
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn ten_suggested_departments_with_display_labels() {
        let labels: Vec<String> = Department::iter().map(|d| d.to_string()).collect();
        assert_eq!(labels.len(), 10);
        assert!(labels.contains(&"Research & Development".to_string()));
        assert_eq!(
            "Human Resources".parse::<Department>().ok(),
            Some(Department::HumanResources)
        );
    }

    #[test]
    fn field_names_parse_from_wire_names() {
        assert_eq!("full_name".parse::<EmployeeField>().ok(), Some(EmployeeField::FullName));
        assert!("fullName".parse::<EmployeeField>().is_err());
    }

    #[test]
    fn create_payload_rejects_unknown_fields() {
        let body = r#"{"employee_id":"E1","full_name":"A","email":"a@b.co","department":"Sales","salary":1}"#;
        assert!(serde_json::from_str::<NewEmployee>(body).is_err());
    }

    #[test]
    fn employee_with_attendance_flattens() {
        let employee = Employee {
            id: 7,
            employee_id: "E1".into(),
            full_name: "A".into(),
            email: "a@b.co".into(),
            department: "Sales".into(),
        };
        let value = serde_json::to_value(EmployeeWithAttendance {
            employee,
            attendance_records: vec![],
        })
        .unwrap();
        assert_eq!(value["employee_id"], "E1");
        assert!(value["attendance_records"].as_array().unwrap().is_empty());
    }
}
