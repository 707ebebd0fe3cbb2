//! Leave request lifecycle and reconciliation.
//!
//! Translates an approved leave request into per-day attendance records
//! and undoes that translation when the request is deleted, keeping
//! `Employee::status` consistent with the records that exist. The
//! request state machine is `Pending → Approved | Rejected`; both end
//! states are terminal and reversible only by deletion.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, AttendanceStatus, EmployeeStatus, LeaveRequest, LeaveStatus, Principal, Role,
    inclusive_day_count,
};
use crate::store::{AttendanceStore, EmployeeStore, LeaveStore, Store};

use super::attendance::{LEAVE_DAY_END, LEAVE_DAY_START, wall_clock};

/// A new leave application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveSubmission {
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// The employee's stated reason.
    pub reason: String,
    /// Opaque reference to an uploaded supporting document.
    #[serde(default)]
    pub attachment_ref: Option<String>,
}

/// Submits a leave request for the calling employee.
///
/// The start date may not lie in the past (date-only comparison against
/// `now`), and the end date may not precede the start date. The stored
/// day count is the inclusive span of the range.
pub fn submit(
    store: &dyn Store,
    principal: &Principal,
    submission: LeaveSubmission,
    now: NaiveDateTime,
) -> EngineResult<LeaveRequest> {
    principal.require_employee()?;

    if submission.reason.trim().is_empty() {
        return Err(EngineError::validation("Reason is required."));
    }
    if submission.start_date < now.date() {
        return Err(EngineError::validation("Start date must not be in the past."));
    }
    if submission.end_date < submission.start_date {
        return Err(EngineError::validation(
            "End date must not be earlier than the start date.",
        ));
    }

    let request = LeaveRequest {
        id: Uuid::new_v4(),
        employee_id: principal.id,
        start_date: submission.start_date,
        end_date: submission.end_date,
        day_count: inclusive_day_count(submission.start_date, submission.end_date),
        reason: submission.reason,
        attachment_ref: submission.attachment_ref,
        status: LeaveStatus::Pending,
        admin_note: None,
        decided_by: None,
        decided_at: None,
        submitted_at: now,
    };
    store.insert_leave(request.clone())?;
    Ok(request)
}

/// Approves a pending leave request (admin).
///
/// Creates an `OnLeave` attendance record for every day in the range
/// that does not already have one, then marks the request approved and
/// flips the employee to `OnLeave`. The fan-out runs before the state
/// transition so a partially failed approval leaves the request Pending
/// and safely re-runnable; days populated in the meantime are skipped,
/// never overwritten.
pub fn approve(
    store: &dyn Store,
    principal: &Principal,
    request_id: Uuid,
    admin_note: Option<String>,
    now: NaiveDateTime,
) -> EngineResult<LeaveRequest> {
    principal.require_admin()?;
    let mut request = store
        .leave_by_id(request_id)?
        .ok_or_else(|| EngineError::not_found("Leave request not found."))?;
    if request.status != LeaveStatus::Pending {
        return Err(EngineError::conflict(format!(
            "Leave request is already {}.",
            request.status
        )));
    }

    let mut created = 0u32;
    for date in request
        .start_date
        .iter_days()
        .take_while(|d| *d <= request.end_date)
    {
        if store.attendance_on(request.employee_id, date)?.is_some() {
            continue;
        }
        let record = AttendanceRecord {
            id: Uuid::new_v4(),
            employee_id: request.employee_id,
            date,
            check_in: Some(wall_clock(date, LEAVE_DAY_START)),
            check_out: Some(wall_clock(date, LEAVE_DAY_END)),
            status: AttendanceStatus::OnLeave,
            note: format!("Approved leave: {}", request.reason),
            photo_ref: None,
        };
        match store.insert_attendance(record) {
            Ok(()) => created += 1,
            // lost a race for this day; it is populated either way
            Err(EngineError::Conflict { .. }) => {}
            Err(other) => return Err(other),
        }
    }

    request.status = LeaveStatus::Approved;
    request.admin_note = Some(admin_note.unwrap_or_else(|| "Approved".to_string()));
    request.decided_by = Some(principal.id);
    request.decided_at = Some(now);
    store.update_leave(request.clone())?;

    store.set_employee_status(request.employee_id, EmployeeStatus::OnLeave)?;

    tracing::info!(
        request_id = %request.id,
        employee_id = %request.employee_id,
        days_created = created,
        "Leave request approved"
    );
    Ok(request)
}

/// Rejects a pending leave request (admin). No attendance side effects.
pub fn reject(
    store: &dyn Store,
    principal: &Principal,
    request_id: Uuid,
    admin_note: Option<String>,
    now: NaiveDateTime,
) -> EngineResult<LeaveRequest> {
    principal.require_admin()?;
    let mut request = store
        .leave_by_id(request_id)?
        .ok_or_else(|| EngineError::not_found("Leave request not found."))?;
    if request.status != LeaveStatus::Pending {
        return Err(EngineError::conflict(format!(
            "Leave request is already {}.",
            request.status
        )));
    }

    request.status = LeaveStatus::Rejected;
    request.admin_note = Some(admin_note.unwrap_or_else(|| "Rejected".to_string()));
    request.decided_by = Some(principal.id);
    request.decided_at = Some(now);
    store.update_leave(request.clone())?;
    Ok(request)
}

/// Deletes a leave request.
///
/// Employees may delete only their own requests and only while Pending;
/// admins may delete any request. Deleting an Approved request also
/// removes the `OnLeave` attendance records in its range and reverts the
/// employee to `Active` if they are currently flagged `OnLeave`.
pub fn delete(
    store: &dyn Store,
    principal: &Principal,
    request_id: Uuid,
) -> EngineResult<LeaveRequest> {
    let request = store
        .leave_by_id(request_id)?
        .ok_or_else(|| EngineError::not_found("Leave request not found."))?;

    if principal.role == Role::Employee {
        if request.employee_id != principal.id {
            return Err(EngineError::ForbiddenRole {
                required: Role::Admin,
            });
        }
        if request.status != LeaveStatus::Pending {
            return Err(EngineError::conflict(
                "Only Pending leave requests can be deleted.",
            ));
        }
    }

    if request.status == LeaveStatus::Approved {
        let removed = store.delete_on_leave_in_range(
            request.employee_id,
            request.start_date,
            request.end_date,
        )?;
        if let Some(employee) = store.employee(request.employee_id)? {
            if employee.is_on_leave() {
                store.set_employee_status(employee.id, EmployeeStatus::Active)?;
            }
        }
        tracing::info!(
            request_id = %request.id,
            employee_id = %request.employee_id,
            records_removed = removed,
            "Approved leave request deleted, attendance reverted"
        );
    }

    store.delete_leave(request_id)?;
    Ok(request)
}

/// Returns the calling employee's requests, newest first.
pub fn my_requests(store: &dyn Store, principal: &Principal) -> EngineResult<Vec<LeaveRequest>> {
    principal.require_employee()?;
    store.leaves_for_employee(principal.id)
}

/// Returns all requests, optionally filtered by status (admin).
pub fn all_requests(
    store: &dyn Store,
    principal: &Principal,
    status: Option<LeaveStatus>,
) -> EngineResult<Vec<LeaveRequest>> {
    principal.require_admin()?;
    store.leaves_with_status(status)
}
