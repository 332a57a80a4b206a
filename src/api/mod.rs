pub mod attendance;
pub mod dashboard;
pub mod employee;
pub mod health;

use chrono::{Local, NaiveDate};

/// Source of "today" for handlers; the table pipeline never reads the clock.
#[derive(Debug, Clone, Copy)]
pub enum Clock {
    System,
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Local::now().date_naive(),
            Clock::Fixed(date) => *date,
        }
    }
}
