use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use super::{
    Gateway, GatewayError, already_marked, duplicate_email, duplicate_id, employee_not_found,
};
use crate::model::attendance::{Attendance, NewAttendance};
use crate::model::employee::{Employee, NewEmployee};

#[derive(Default)]
struct Store {
    employees: Vec<Employee>,
    attendance: Vec<Attendance>,
    last_employee_id: u64,
    last_attendance_id: u64,
}

/// In-process store with the same contract as the database gateway.
#[derive(Default)]
pub struct MemoryGateway {
    store: RwLock<Store>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Store>, GatewayError> {
        self.store
            .read()
            .map_err(|_| GatewayError::Backend("memory store poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Store>, GatewayError> {
        self.store
            .write()
            .map_err(|_| GatewayError::Backend("memory store poisoned".into()))
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn list_employees(&self) -> Result<Vec<Employee>, GatewayError> {
        Ok(self.read()?.employees.clone())
    }

    async fn get_employee(&self, employee_id: &str) -> Result<Option<Employee>, GatewayError> {
        Ok(self
            .read()?
            .employees
            .iter()
            .find(|e| e.employee_id == employee_id)
            .cloned())
    }

    async fn create_employee(&self, employee: NewEmployee) -> Result<Employee, GatewayError> {
        let mut store = self.write()?;

        if store.employees.iter().any(|e| e.employee_id == employee.employee_id) {
            return Err(duplicate_id(&employee.employee_id));
        }
        if store.employees.iter().any(|e| e.email == employee.email) {
            return Err(duplicate_email(&employee.email));
        }

        store.last_employee_id += 1;
        let created = employee.into_employee(store.last_employee_id);
        store.employees.push(created.clone());

        debug!(employee_id = %created.employee_id, "Employee stored in memory");
        Ok(created)
    }

    async fn delete_employee(&self, employee_id: &str) -> Result<(), GatewayError> {
        let mut store = self.write()?;

        let Some(index) = store.employees.iter().position(|e| e.employee_id == employee_id) else {
            return Err(employee_not_found(employee_id));
        };

        store.attendance.retain(|a| a.employee_id != employee_id);
        store.employees.remove(index);
        Ok(())
    }

    async fn mark_attendance(&self, attendance: NewAttendance) -> Result<Attendance, GatewayError> {
        let mut store = self.write()?;

        if !store.employees.iter().any(|e| e.employee_id == attendance.employee_id) {
            return Err(employee_not_found(&attendance.employee_id));
        }

        let date = attendance.date.format("%Y-%m-%d").to_string();
        if store
            .attendance
            .iter()
            .any(|a| a.employee_id == attendance.employee_id && a.date == date)
        {
            return Err(already_marked(attendance.date));
        }

        store.last_attendance_id += 1;
        let created = attendance.into_attendance(store.last_attendance_id);
        store.attendance.push(created.clone());
        Ok(created)
    }

    async fn attendance_by_employee(
        &self,
        employee_id: &str,
    ) -> Result<Vec<Attendance>, GatewayError> {
        Ok(self
            .read()?
            .attendance
            .iter()
            .filter(|a| a.employee_id == employee_id)
            .cloned()
            .collect())
    }

    async fn attendance_by_date(&self, date: NaiveDate) -> Result<Vec<Attendance>, GatewayError> {
        let date = date.format("%Y-%m-%d").to_string();
        Ok(self
            .read()?
            .attendance
            .iter()
            .filter(|a| a.date == date)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attendance::AttendanceStatus;

    fn new_employee(id: &str, email: &str) -> NewEmployee {
        NewEmployee {
            employee_id: id.into(),
            full_name: format!("Person {id}"),
            email: email.into(),
            department: "Engineering".into(),
        }
    }

    fn mark(id: &str, date: &str, status: AttendanceStatus) -> NewAttendance {
        NewAttendance {
            employee_id: id.into(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            status,
        }
    }

    #[actix_web::test]
    async fn create_assigns_ids_and_rejects_duplicates() {
        let gateway = MemoryGateway::new();
        let first = gateway.create_employee(new_employee("E1", "e1@x.io")).await.unwrap();
        let second = gateway.create_employee(new_employee("E2", "e2@x.io")).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        let err = gateway.create_employee(new_employee("E1", "other@x.io")).await;
        assert_eq!(err, Err(GatewayError::Validation("Employee ID E1 already exists".into())));

        let err = gateway.create_employee(new_employee("E3", "e2@x.io")).await;
        assert_eq!(err, Err(GatewayError::Validation("Email e2@x.io already exists".into())));

        assert_eq!(gateway.list_employees().await.unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn duplicate_attendance_is_a_conflict() {
        let gateway = MemoryGateway::new();
        gateway.create_employee(new_employee("E1", "e1@x.io")).await.unwrap();
        gateway
            .mark_attendance(mark("E1", "2024-03-01", AttendanceStatus::Present))
            .await
            .unwrap();

        let err = gateway
            .mark_attendance(mark("E1", "2024-03-01", AttendanceStatus::Absent))
            .await;
        assert_eq!(
            err,
            Err(GatewayError::Conflict("Attendance already marked for 2024-03-01".into()))
        );

        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let roster = gateway.attendance_by_date(day).await.unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].status, AttendanceStatus::Present);
    }

    #[actix_web::test]
    async fn unknown_employee_cannot_be_marked() {
        let gateway = MemoryGateway::new();
        let err = gateway
            .mark_attendance(mark("ghost", "2024-03-01", AttendanceStatus::Present))
            .await;
        assert_eq!(err, Err(GatewayError::NotFound("Employee with ID ghost not found".into())));
    }

    #[actix_web::test]
    async fn delete_cascades_to_attendance() {
        let gateway = MemoryGateway::new();
        gateway.create_employee(new_employee("E1", "e1@x.io")).await.unwrap();
        gateway.create_employee(new_employee("E2", "e2@x.io")).await.unwrap();
        for id in ["E1", "E2"] {
            gateway
                .mark_attendance(mark(id, "2024-03-01", AttendanceStatus::Present))
                .await
                .unwrap();
        }

        gateway.delete_employee("E1").await.unwrap();

        assert!(gateway.get_employee("E1").await.unwrap().is_none());
        assert!(gateway.attendance_by_employee("E1").await.unwrap().is_empty());
        assert_eq!(gateway.attendance_by_employee("E2").await.unwrap().len(), 1);
        assert!(matches!(
            gateway.delete_employee("E1").await,
            Err(GatewayError::NotFound(_))
        ));
    }

    #[actix_web::test]
    async fn employee_ids_are_case_sensitive() {
        let gateway = MemoryGateway::new();
        gateway.create_employee(new_employee("E1", "e1@x.io")).await.unwrap();

        assert!(gateway.get_employee("e1").await.unwrap().is_none());
        assert!(matches!(
            gateway
                .mark_attendance(mark("e1", "2024-03-01", AttendanceStatus::Present))
                .await,
            Err(GatewayError::NotFound(_))
        ));

        let lower = gateway.create_employee(new_employee("e1", "lower@x.io")).await.unwrap();
        assert_eq!(lower.employee_id, "e1");
        for id in ["E1", "e1"] {
            gateway
                .mark_attendance(mark(id, "2024-03-01", AttendanceStatus::Present))
                .await
                .unwrap();
        }
    }
}
