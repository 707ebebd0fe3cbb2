//! Attendance record model and related types.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The derived status of one attendance day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Checked in on or before the on-time cutoff.
    Present,
    /// Checked in strictly after the on-time cutoff.
    Late,
    /// On approved leave for the day.
    OnLeave,
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "Present"),
            AttendanceStatus::Late => write!(f, "Late"),
            AttendanceStatus::OnLeave => write!(f, "OnLeave"),
        }
    }
}

/// Statuses that count toward salary proration.
pub const PAYABLE_STATUSES: [AttendanceStatus; 3] = [
    AttendanceStatus::Present,
    AttendanceStatus::Late,
    AttendanceStatus::OnLeave,
];

/// One employee's attendance for one calendar day.
///
/// At most one record exists per (employee, date); the store enforces
/// this, application-level existence checks are only a fast path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier for the record.
    pub id: Uuid,
    /// The employee this record belongs to.
    pub employee_id: Uuid,
    /// The calendar day the record covers.
    pub date: NaiveDate,
    /// When the employee checked in, if they have.
    #[serde(default)]
    pub check_in: Option<NaiveDateTime>,
    /// When the employee checked out, if they have.
    #[serde(default)]
    pub check_out: Option<NaiveDateTime>,
    /// The derived status for the day.
    pub status: AttendanceStatus,
    /// Free-text note (check-in distance, leave reason, admin remarks).
    #[serde(default)]
    pub note: String,
    /// Opaque reference to an uploaded attendance photo, if provided.
    #[serde(default)]
    pub photo_ref: Option<String>,
}
