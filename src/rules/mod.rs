//! The attendance-and-payroll computation engine.
//!
//! This module contains the core rules: great-circle distance for the
//! geofence, check-in/check-out validation and daily-status derivation,
//! leave-to-attendance reconciliation, and prorated payroll calculation.
//! Every operation takes the backing [`crate::store::Store`], the
//! resolved caller, and (where time matters) an injected `now`.

pub mod attendance;
pub mod employees;
mod geo;
pub mod leave;
pub mod payroll;
pub mod settings;

pub use attendance::{
    AttendanceUpdate, CheckInOutcome, CheckInRequest, CheckOutRequest, LEAVE_DAY_END,
    LEAVE_DAY_START, MonthlyRecap, ON_TIME_CUTOFF,
};
pub use employees::NewEmployee;
pub use geo::{Coordinates, EARTH_RADIUS_M, distance_meters};
pub use leave::LeaveSubmission;
pub use payroll::{ASSUMED_WORKING_DAYS, month_bounds};
