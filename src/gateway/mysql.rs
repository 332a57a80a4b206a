use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, MySqlPool};
use tracing::{debug, error};

use super::{
    Gateway, GatewayError, already_marked, duplicate_email, duplicate_id, employee_not_found,
};
use crate::model::attendance::{Attendance, AttendanceStatus, NewAttendance};
use crate::model::employee::{Employee, NewEmployee};

/// MySQL's SQLSTATE for integrity constraint violations (unique keys included).
const INTEGRITY_VIOLATION: &str = "23000";

#[derive(FromRow)]
struct AttendanceRow {
    id: u64,
    employee_id: String,
    date: NaiveDate,
    status: String,
}

impl TryFrom<AttendanceRow> for Attendance {
    type Error = GatewayError;

    fn try_from(row: AttendanceRow) -> Result<Self, Self::Error> {
        let status: AttendanceStatus = row
            .status
            .parse()
            .map_err(|_| GatewayError::Backend(format!("unknown attendance status {}", row.status)))?;

        Ok(Attendance {
            id: row.id,
            employee_id: row.employee_id,
            date: row.date.format("%Y-%m-%d").to_string(),
            status,
        })
    }
}

fn is_integrity_violation(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(INTEGRITY_VIOLATION),
        _ => false,
    }
}

/// Name of the unique key a duplicate-entry error fired on, e.g.
/// `employees.email` from "Duplicate entry 'a@b.co' for key 'employees.email'".
fn duplicate_key(message: &str) -> Option<&str> {
    let (_, key) = message.rsplit_once("for key ")?;
    Some(key.trim().trim_matches(|c| c == '\'' || c == '`'))
}

fn violates_email_key(e: &sqlx::Error) -> bool {
    let sqlx::Error::Database(db_err) = e else {
        return false;
    };
    db_err
        .constraint()
        .or_else(|| duplicate_key(db_err.message()))
        .is_some_and(|key| key.ends_with("email"))
}

fn backend(e: sqlx::Error) -> GatewayError {
    error!(error = %e, "Database error");
    GatewayError::Backend(e.to_string())
}

pub struct MySqlGateway {
    pool: MySqlPool,
}

impl MySqlGateway {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn attendance_where(
        &self,
        condition: &str,
        bind: String,
    ) -> Result<Vec<Attendance>, GatewayError> {
        let sql = format!(
            "SELECT id, employee_id, date, status FROM attendance WHERE {condition} ORDER BY id"
        );
        debug!(sql = %sql, bind = %bind, "Fetching attendance");

        sqlx::query_as::<_, AttendanceRow>(&sql)
            .bind(bind)
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?
            .into_iter()
            .map(Attendance::try_from)
            .collect()
    }
}

#[async_trait]
impl Gateway for MySqlGateway {
    async fn list_employees(&self) -> Result<Vec<Employee>, GatewayError> {
        sqlx::query_as::<_, Employee>(
            "SELECT id, employee_id, full_name, email, department FROM employees ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(backend)
    }

    async fn get_employee(&self, employee_id: &str) -> Result<Option<Employee>, GatewayError> {
        sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, employee_id, full_name, email, department
            FROM employees
            WHERE employee_id = ?
            "#,
        )
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)
    }

    async fn create_employee(&self, employee: NewEmployee) -> Result<Employee, GatewayError> {
        if self.get_employee(&employee.employee_id).await?.is_some() {
            return Err(duplicate_id(&employee.employee_id));
        }

        let email_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE email = ? LIMIT 1)",
        )
        .bind(&employee.email)
        .fetch_one(&self.pool)
        .await
        .map_err(backend)?;
        if email_taken {
            return Err(duplicate_email(&employee.email));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO employees (employee_id, full_name, email, department)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&employee.employee_id)
        .bind(&employee.full_name)
        .bind(&employee.email)
        .bind(&employee.department)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(employee.into_employee(done.last_insert_id())),
            // Lost a race with a concurrent insert.
            Err(e) if is_integrity_violation(&e) && violates_email_key(&e) => {
                Err(duplicate_email(&employee.email))
            }
            Err(e) if is_integrity_violation(&e) => Err(duplicate_id(&employee.employee_id)),
            Err(e) => Err(backend(e)),
        }
    }

    async fn delete_employee(&self, employee_id: &str) -> Result<(), GatewayError> {
        let mut tx = self.pool.begin().await.map_err(backend)?;

        sqlx::query("DELETE FROM attendance WHERE employee_id = ?")
            .bind(employee_id)
            .execute(&mut *tx)
            .await
            .map_err(backend)?;

        let deleted = sqlx::query("DELETE FROM employees WHERE employee_id = ?")
            .bind(employee_id)
            .execute(&mut *tx)
            .await
            .map_err(backend)?;

        if deleted.rows_affected() == 0 {
            tx.rollback().await.map_err(backend)?;
            return Err(employee_not_found(employee_id));
        }

        tx.commit().await.map_err(backend)
    }

    async fn mark_attendance(&self, attendance: NewAttendance) -> Result<Attendance, GatewayError> {
        if self.get_employee(&attendance.employee_id).await?.is_none() {
            return Err(employee_not_found(&attendance.employee_id));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO attendance (employee_id, date, status)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&attendance.employee_id)
        .bind(attendance.date)
        .bind(attendance.status.as_ref())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(attendance.into_attendance(done.last_insert_id())),
            // Unique key on (employee_id, date).
            Err(e) if is_integrity_violation(&e) => Err(already_marked(attendance.date)),
            Err(e) => Err(backend(e)),
        }
    }

    async fn attendance_by_employee(
        &self,
        employee_id: &str,
    ) -> Result<Vec<Attendance>, GatewayError> {
        self.attendance_where("employee_id = ?", employee_id.to_string())
            .await
    }

    async fn attendance_by_date(&self, date: NaiveDate) -> Result<Vec<Attendance>, GatewayError> {
        self.attendance_where("date = ?", date.format("%Y-%m-%d").to_string())
            .await
    }
}
