//! Leave request model and related types.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The lifecycle state of a leave request.
///
/// `Pending → Approved` and `Pending → Rejected` are the only
/// transitions; both end states are terminal and can only be undone by
/// deleting the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting an admin decision.
    Pending,
    /// Approved; attendance records were generated for the range.
    Approved,
    /// Rejected; no attendance side effects.
    Rejected,
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaveStatus::Pending => write!(f, "Pending"),
            LeaveStatus::Approved => write!(f, "Approved"),
            LeaveStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

/// An employee's application for a leave of absence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: Uuid,
    /// The requesting employee.
    pub employee_id: Uuid,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Number of calendar days covered, inclusive of both endpoints.
    pub day_count: u32,
    /// The employee's stated reason.
    pub reason: String,
    /// Opaque reference to an uploaded supporting document, if provided.
    #[serde(default)]
    pub attachment_ref: Option<String>,
    /// Current lifecycle state.
    pub status: LeaveStatus,
    /// Note left by the deciding admin, if decided.
    #[serde(default)]
    pub admin_note: Option<String>,
    /// The admin who decided the request, if decided.
    #[serde(default)]
    pub decided_by: Option<Uuid>,
    /// When the request was decided, if decided.
    #[serde(default)]
    pub decided_at: Option<NaiveDateTime>,
    /// When the request was submitted.
    pub submitted_at: NaiveDateTime,
}

/// Counts the calendar days in `[start, end]`, inclusive of both ends.
///
/// # Example
///
/// ```
/// use attendance_engine::models::inclusive_day_count;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 3, 11).unwrap();
/// assert_eq!(inclusive_day_count(start, end), 3);
/// assert_eq!(inclusive_day_count(start, start), 1);
/// ```
pub fn inclusive_day_count(start: NaiveDate, end: NaiveDate) -> u32 {
    (end - start).num_days().unsigned_abs() as u32 + 1
}
