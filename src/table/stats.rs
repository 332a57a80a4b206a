use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use super::Record;

/// Summary counts over a whole record collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct Stats {
    #[schema(example = 5)]
    pub total: usize,
    /// Count per group: attendance status, or department for employees.
    #[schema(example = json!({"Present": 3, "Absent": 2}))]
    pub by_status: BTreeMap<String, usize>,
    /// Positive records as a whole percentage of `total`, rounded half up.
    #[schema(example = 60)]
    pub rate: u32,
}

pub fn aggregate<R: Record>(records: &[R]) -> Stats {
    let mut by_status: BTreeMap<String, usize> = R::known_groups()
        .iter()
        .map(|group| (group.to_string(), 0))
        .collect();

    let mut positive = 0usize;
    for record in records {
        *by_status.entry(record.group().to_string()).or_default() += 1;
        if record.is_positive() {
            positive += 1;
        }
    }

    Stats {
        total: records.len(),
        by_status,
        rate: rate(positive, records.len()),
    }
}

// round(part / total * 100), halves rounded up, in integer arithmetic.
fn rate(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part * 200 + total) / (total * 2)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attendance::{Attendance, AttendanceStatus};
    use crate::model::employee::Employee;

    fn roster(statuses: &[AttendanceStatus]) -> Vec<Attendance> {
        statuses
            .iter()
            .enumerate()
            .map(|(i, status)| Attendance {
                id: i as u64,
                employee_id: format!("EMP{i:03}"),
                date: "2024-03-01".into(),
                status: *status,
            })
            .collect()
    }

    #[test]
    fn three_present_two_absent() {
        use AttendanceStatus::*;
        let stats = aggregate(&roster(&[Present, Absent, Present, Absent, Present]));

        assert_eq!(stats.total, 5);
        assert_eq!(stats.by_status.get("Present"), Some(&3));
        assert_eq!(stats.by_status.get("Absent"), Some(&2));
        assert_eq!(stats.rate, 60);
    }

    #[test]
    fn empty_collection_has_zero_rate_and_seeded_statuses() {
        let stats = aggregate::<Attendance>(&[]);

        assert_eq!(stats.total, 0);
        assert_eq!(stats.rate, 0);
        assert_eq!(stats.by_status.get("Present"), Some(&0));
        assert_eq!(stats.by_status.get("Absent"), Some(&0));
    }

    #[test]
    fn rate_rounds_half_up() {
        assert_eq!(rate(1, 8), 13); // 12.5
        assert_eq!(rate(1, 3), 33);
        assert_eq!(rate(2, 3), 67);
        assert_eq!(rate(1, 200), 1); // 0.5
        assert_eq!(rate(4, 4), 100);
    }

    #[test]
    fn employees_group_by_department() {
        let employees: Vec<Employee> = ["Sales", "Finance", "Sales"]
            .iter()
            .enumerate()
            .map(|(i, dept)| Employee {
                id: i as u64,
                employee_id: format!("E{i}"),
                full_name: format!("Person {i}"),
                email: format!("p{i}@example.com"),
                department: dept.to_string(),
            })
            .collect();

        let stats = aggregate(&employees);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_status.get("Sales"), Some(&2));
        assert_eq!(stats.by_status.get("Finance"), Some(&1));
        assert_eq!(stats.rate, 0);
    }
}
