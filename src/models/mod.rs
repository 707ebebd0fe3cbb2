//! Core data models for the attendance engine.
//!
//! This module contains all the domain types used throughout the engine.

mod attendance;
mod employee;
mod leave_request;
mod payroll;
mod principal;
mod settings;

pub use attendance::{AttendanceRecord, AttendanceStatus, PAYABLE_STATUSES};
pub use employee::{Employee, EmployeeStatus};
pub use leave_request::{LeaveRequest, LeaveStatus, inclusive_day_count};
pub use payroll::{DayCounts, PaymentStatus, PayrollRecord};
pub use principal::{Principal, Role};
pub use settings::{MAX_RADIUS_M, MIN_RADIUS_M, OfficeSettings, SettingsUpdate};
