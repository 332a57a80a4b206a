use chrono::NaiveDate;

use crate::model::attendance::Attendance;
use crate::table::parse_date;

const HEADER: [&str; 5] = ["Date", "Employee ID", "Name", "Status", "Day"];

/// Renders the whole attendance collection as CSV, one line per record.
pub fn attendance_csv(records: &[Attendance], employee_name: &str) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(HEADER.join(","));

    for record in records {
        let day = parse_date(&record.date)
            .map(|d| d.format("%A").to_string())
            .unwrap_or_default();
        let row = [
            record.date.as_str(),
            record.employee_id.as_str(),
            employee_name,
            record.status.as_ref(),
            day.as_str(),
        ];
        lines.push(row.iter().map(|f| escape(f)).collect::<Vec<_>>().join(","));
    }

    lines.join("\n")
}

pub fn export_file_name(employee_id: Option<&str>, today: NaiveDate) -> String {
    format!(
        "attendance_{}_{}.csv",
        employee_id.unwrap_or("all"),
        today.format("%Y-%m-%d")
    )
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
