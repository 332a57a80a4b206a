//! HRMS Lite: employee records and daily attendance over a REST API, with a
//! pure filter/sort/statistics pipeline shared by every list view.

pub mod api;
pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod gateway;
pub mod model;
pub mod routes;
pub mod table;
pub mod utils;
