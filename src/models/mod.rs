//! Data models for employee records and the US state list.

pub mod employee;
pub mod states;

pub use employee::{CreateEmployee, EmployeeDraft, EmployeeRecord, Gender, UpdateEmployee};
pub use states::{US_STATES, is_us_state};
