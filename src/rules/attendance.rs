//! Check-in and check-out rules.
//!
//! Validates and records one check-in and one check-out per employee per
//! calendar day, enforcing the office geofence and the on-time cutoff.
//! The "today" window is `[midnight, next midnight)` in server-local
//! time; each operation derives it once from the instant it was given.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, AttendanceStatus, EmployeeStatus, PAYABLE_STATUSES, Principal,
};
use crate::store::{AttendanceStore, EmployeeStore, SettingsStore, Store};

use super::geo::{Coordinates, distance_meters};
use super::payroll::month_bounds;

/// Wall-clock cutoff for an on-time check-in, as (hour, minute).
///
/// Check-ins strictly after this instant count as `Late`; a check-in at
/// exactly the cutoff is still on time. Fixed policy, not configurable.
pub const ON_TIME_CUTOFF: (u32, u32) = (8, 30);

/// Nominal check-in time stamped on generated leave records.
pub const LEAVE_DAY_START: (u32, u32) = (8, 0);

/// Nominal check-out time stamped on generated leave records.
pub const LEAVE_DAY_END: (u32, u32) = (17, 0);

pub(crate) fn wall_clock(date: NaiveDate, (hour, minute): (u32, u32)) -> NaiveDateTime {
    date.and_hms_opt(hour, minute, 0)
        .expect("policy times are valid wall-clock times")
}

/// A check-in attempt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckInRequest {
    /// The employee's reported latitude.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// The employee's reported longitude.
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Opaque reference to an uploaded attendance photo.
    #[serde(default)]
    pub photo_ref: Option<String>,
}

/// A check-out attempt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckOutRequest {
    /// The employee's reported latitude.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// The employee's reported longitude.
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// The result of a successful check-in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckInOutcome {
    /// The recorded check-in instant.
    pub checked_in_at: NaiveDateTime,
    /// The derived status for the day.
    pub status: AttendanceStatus,
    /// True if the check-in flipped the employee back from `OnLeave`.
    pub resumed_from_leave: bool,
}

fn required_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> EngineResult<Coordinates> {
    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Ok(Coordinates::new(latitude, longitude)),
        _ => Err(EngineError::validation(
            "Location data (latitude and longitude) is required.",
        )),
    }
}

// Loads settings (creating defaults on first access), measures the
// distance, and rejects points outside the configured radius. Returns
// the measured distance in meters.
fn enforce_geofence(store: &dyn Store, point: Coordinates) -> EngineResult<f64> {
    let settings = store.office_settings()?;
    let office = Coordinates::new(settings.office_latitude, settings.office_longitude);
    let distance = distance_meters(point, office);
    if distance > settings.max_radius_m {
        return Err(EngineError::OutOfRange {
            distance_m: distance.round() as u64,
            radius_m: settings.max_radius_m.round() as u64,
        });
    }
    Ok(distance)
}

/// Records a check-in for the calling employee.
///
/// Rejects callers that are not employees, check-ins without location
/// data, days already covered by a leave record (leave takes precedence
/// over the geofence), locations outside the office radius, and days
/// that already have any record. A check-in while the employee is
/// flagged `OnLeave` resumes them to `Active`.
pub fn check_in(
    store: &dyn Store,
    principal: &Principal,
    request: &CheckInRequest,
    now: NaiveDateTime,
) -> EngineResult<CheckInOutcome> {
    principal.require_employee()?;
    let point = required_coordinates(request.latitude, request.longitude)?;

    let today = now.date();
    let existing = store.attendance_on(principal.id, today)?;
    if let Some(record) = &existing {
        if record.status == AttendanceStatus::OnLeave {
            return Err(EngineError::conflict(
                "You are on approved leave today. Check-in is not available.",
            ));
        }
    }

    let distance = enforce_geofence(store, point)?;

    if existing.is_some() {
        return Err(EngineError::conflict("You have already checked in today."));
    }

    let employee = store
        .employee(principal.id)?
        .ok_or_else(|| EngineError::not_found("Employee not found."))?;

    let status = if now > wall_clock(today, ON_TIME_CUTOFF) {
        AttendanceStatus::Late
    } else {
        AttendanceStatus::Present
    };

    // A check-in while flagged OnLeave means the leave ended early.
    let resumed_from_leave = employee.is_on_leave();
    if resumed_from_leave {
        store.set_employee_status(employee.id, EmployeeStatus::Active)?;
    }

    let record = AttendanceRecord {
        id: Uuid::new_v4(),
        employee_id: employee.id,
        date: today,
        check_in: Some(now),
        check_out: None,
        status,
        note: format!(
            "Check-in from a valid location ({}m from office).",
            distance.round() as u64
        ),
        photo_ref: request.photo_ref.clone(),
    };
    store.insert_attendance(record)?;

    Ok(CheckInOutcome {
        checked_in_at: now,
        status,
        resumed_from_leave,
    })
}

/// Records a check-out for the calling employee.
///
/// Requires a same-day record with no prior check-out, and applies the
/// same role and geofence validation as check-in.
pub fn check_out(
    store: &dyn Store,
    principal: &Principal,
    request: &CheckOutRequest,
    now: NaiveDateTime,
) -> EngineResult<AttendanceRecord> {
    principal.require_employee()?;
    let point = required_coordinates(request.latitude, request.longitude)?;
    enforce_geofence(store, point)?;

    let mut record = store.attendance_on(principal.id, now.date())?.ok_or_else(|| {
        EngineError::not_found("No check-in record found for today. You must check in first.")
    })?;
    if record.check_out.is_some() {
        return Err(EngineError::conflict("You have already checked out today."));
    }

    record.check_out = Some(now);
    record.note.push_str(" | Check-out from a valid location.");
    store.update_attendance(record.clone())?;
    Ok(record)
}

/// Returns the calling employee's record for today, if any.
pub fn today_status(
    store: &dyn Store,
    principal: &Principal,
    now: NaiveDateTime,
) -> EngineResult<Option<AttendanceRecord>> {
    principal.require_employee()?;
    store.attendance_on(principal.id, now.date())
}

/// Returns the calling employee's full history, newest day first.
pub fn history(store: &dyn Store, principal: &Principal) -> EngineResult<Vec<AttendanceRecord>> {
    principal.require_employee()?;
    store.attendance_for_employee(principal.id)
}

/// Counts the calling employee's payable days (Present, Late, OnLeave)
/// in the current month.
pub fn payable_days_count(
    store: &dyn Store,
    principal: &Principal,
    now: NaiveDateTime,
) -> EngineResult<u64> {
    principal.require_employee()?;
    let (first, last) = month_bounds(now.date().month(), now.date().year())?;
    store.count_attendance_in_range(principal.id, first, last, &PAYABLE_STATUSES)
}

/// Per-status day counts for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRecap {
    /// Days checked in on time.
    pub present: u64,
    /// Days checked in late.
    pub late: u64,
    /// Days on approved leave.
    pub leave: u64,
}

/// Tallies the calling employee's statuses for the current month.
pub fn monthly_recap(
    store: &dyn Store,
    principal: &Principal,
    now: NaiveDateTime,
) -> EngineResult<MonthlyRecap> {
    principal.require_employee()?;
    let (first, last) = month_bounds(now.date().month(), now.date().year())?;
    let mut recap = MonthlyRecap::default();
    for record in store.attendance_in_range(principal.id, first, last)? {
        match record.status {
            AttendanceStatus::Present => recap.present += 1,
            AttendanceStatus::Late => recap.late += 1,
            AttendanceStatus::OnLeave => recap.leave += 1,
        }
    }
    Ok(recap)
}

/// Returns every employee's records for the given month (admin).
pub fn records_for_month(
    store: &dyn Store,
    principal: &Principal,
    month: u32,
    year: i32,
) -> EngineResult<Vec<AttendanceRecord>> {
    principal.require_admin()?;
    let (first, last) = month_bounds(month, year)?;
    store.all_attendance_in_range(first, last)
}

/// Returns every employee's records for today (admin).
pub fn todays_activity(
    store: &dyn Store,
    principal: &Principal,
    now: NaiveDateTime,
) -> EngineResult<Vec<AttendanceRecord>> {
    principal.require_admin()?;
    store.all_attendance_in_range(now.date(), now.date())
}

/// Records a single leave day for an employee (admin).
///
/// Creates an `OnLeave` record with the nominal workday times and flips
/// the employee to `OnLeave`. Rejects days that already have a record of
/// any status.
pub fn record_leave_day(
    store: &dyn Store,
    principal: &Principal,
    employee_id: Uuid,
    date: NaiveDate,
) -> EngineResult<AttendanceRecord> {
    principal.require_admin()?;
    let employee = store
        .employee(employee_id)?
        .ok_or_else(|| EngineError::not_found("Employee not found."))?;

    if let Some(existing) = store.attendance_on(employee_id, date)? {
        return Err(EngineError::conflict(format!(
            "Employee already has an attendance record (status {}) on {}.",
            existing.status, date
        )));
    }

    let record = AttendanceRecord {
        id: Uuid::new_v4(),
        employee_id,
        date,
        check_in: Some(wall_clock(date, LEAVE_DAY_START)),
        check_out: Some(wall_clock(date, LEAVE_DAY_END)),
        status: AttendanceStatus::OnLeave,
        note: "Leave recorded by admin.".to_string(),
        photo_ref: None,
    };
    store.insert_attendance(record.clone())?;
    store.set_employee_status(employee.id, EmployeeStatus::OnLeave)?;
    Ok(record)
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A partial edit of an attendance record (admin). `None` fields are
/// unchanged; `check_out` distinguishes "leave alone" (absent) from
/// "clear" (null).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttendanceUpdate {
    /// New calendar day, if changing.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// New check-in instant, if changing.
    #[serde(default)]
    pub check_in: Option<NaiveDateTime>,
    /// New check-out instant; `Some(None)` clears it.
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out: Option<Option<NaiveDateTime>>,
    /// New status, if changing.
    #[serde(default)]
    pub status: Option<AttendanceStatus>,
    /// New note, if changing.
    #[serde(default)]
    pub note: Option<String>,
}

/// Applies a partial edit to a record (admin).
pub fn update_record(
    store: &dyn Store,
    principal: &Principal,
    record_id: Uuid,
    update: AttendanceUpdate,
) -> EngineResult<AttendanceRecord> {
    principal.require_admin()?;
    let mut record = store
        .attendance_by_id(record_id)?
        .ok_or_else(|| EngineError::not_found("Attendance record not found."))?;

    if let Some(date) = update.date {
        record.date = date;
    }
    if let Some(check_in) = update.check_in {
        record.check_in = Some(check_in);
    }
    if let Some(check_out) = update.check_out {
        record.check_out = check_out;
    }
    if let Some(status) = update.status {
        record.status = status;
    }
    if let Some(note) = update.note {
        record.note = note;
    }

    store.update_attendance(record.clone())?;
    Ok(record)
}

/// Deletes a record by id (admin).
pub fn delete_record(store: &dyn Store, principal: &Principal, record_id: Uuid) -> EngineResult<()> {
    principal.require_admin()?;
    store.delete_attendance(record_id)
}
