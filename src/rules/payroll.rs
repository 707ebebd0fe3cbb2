//! Prorated payroll generation.
//!
//! Aggregates one month of attendance records into a payroll record,
//! scaling gross pay by the ratio of payable days to the assumed
//! working days in a month. Generation is an upsert keyed on
//! (employee, month, year); running it again recomputes in place.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceStatus, DayCounts, PaymentStatus, PayrollRecord, Principal};
use crate::store::{AttendanceStore, EmployeeStore, PayrollStore, Store};

/// Assumed total working days per month for proration.
pub const ASSUMED_WORKING_DAYS: u32 = 30;

/// Returns the first and last day of the given month, validating the
/// month and year along the way.
pub fn month_bounds(month: u32, year: i32) -> EngineResult<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| EngineError::validation("Parameter 'month' must be between 1 and 12."))?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| EngineError::validation("Parameter 'year' is out of range."))?;
    let last = next_month
        .pred_opt()
        .ok_or_else(|| EngineError::validation("Parameter 'year' is out of range."))?;
    Ok((first, last))
}

fn tally_days(
    store: &dyn Store,
    employee_id: Uuid,
    first: NaiveDate,
    last: NaiveDate,
) -> EngineResult<DayCounts> {
    let records = store.attendance_in_range(employee_id, first, last)?;

    let mut counts = DayCounts::default();
    let mut covered: HashSet<NaiveDate> = HashSet::with_capacity(records.len());
    for record in &records {
        covered.insert(record.date);
        match record.status {
            AttendanceStatus::Present => counts.present += 1,
            AttendanceStatus::Late => counts.late += 1,
            AttendanceStatus::OnLeave => counts.leave += 1,
        }
    }

    // a weekday with no record of any status counts as an absence
    for date in first.iter_days().take_while(|d| *d <= last) {
        let weekday = date.weekday();
        if weekday != Weekday::Sat && weekday != Weekday::Sun && !covered.contains(&date) {
            counts.absent += 1;
        }
    }
    Ok(counts)
}

/// Generates (or regenerates) one employee's payroll for one month
/// (admin).
///
/// Gross pay is the salary plus allowances snapshot; net pay is the
/// per-day rate (gross / [`ASSUMED_WORKING_DAYS`]) times the payable
/// days found in attendance; the attendance deduction is the remainder.
/// Regenerating for the same period overwrites the computed fields while
/// preserving previously entered other-deductions (folded back into the
/// totals) and the payment state.
pub fn generate(
    store: &dyn Store,
    principal: &Principal,
    employee_id: Uuid,
    month: u32,
    year: i32,
    now: NaiveDateTime,
) -> EngineResult<PayrollRecord> {
    principal.require_admin()?;
    let (first, last) = month_bounds(month, year)?;
    let employee = store
        .employee(employee_id)?
        .ok_or_else(|| EngineError::not_found("Employee not found or has an invalid status."))?;

    let day_counts = tally_days(store, employee_id, first, last)?;

    let gross_pay = employee.gross_pay();
    let per_day = gross_pay / Decimal::from(ASSUMED_WORKING_DAYS);
    let prorated_net = per_day * Decimal::from(day_counts.payable());
    let attendance_deduction = gross_pay - prorated_net;

    let existing = store.payroll_for_period(employee_id, month, year)?;
    let other_deductions = existing
        .as_ref()
        .map(|p| p.other_deductions)
        .unwrap_or(Decimal::ZERO);
    let total_deduction = attendance_deduction + other_deductions;
    let net_pay = gross_pay - total_deduction;

    let record = PayrollRecord {
        id: existing.as_ref().map(|p| p.id).unwrap_or_else(Uuid::new_v4),
        employee_id,
        month,
        year,
        base_salary: employee.base_salary,
        position_allowance: employee.position_allowance,
        transport_allowance: employee.transport_allowance,
        meal_allowance: employee.meal_allowance,
        total_allowances: employee.total_allowances(),
        gross_pay,
        attendance_deduction,
        other_deductions,
        total_deduction,
        net_pay,
        day_counts,
        payment_status: existing
            .as_ref()
            .map(|p| p.payment_status)
            .unwrap_or(PaymentStatus::Unpaid),
        paid_at: existing.as_ref().and_then(|p| p.paid_at),
        generated_by: principal.id,
        generated_at: now,
    };
    store.upsert_payroll(record.clone())?;

    tracing::info!(
        employee_id = %employee_id,
        month,
        year,
        regenerated = existing.is_some(),
        "Payroll generated"
    );
    Ok(record)
}

/// Sets the manually entered deductions on a payroll record (admin).
///
/// Negative amounts are coerced to zero. The total deduction and net pay
/// are recomputed from the stored attendance deduction.
pub fn set_other_deductions(
    store: &dyn Store,
    principal: &Principal,
    payroll_id: Uuid,
    amount: Decimal,
) -> EngineResult<PayrollRecord> {
    principal.require_admin()?;
    let mut record = store
        .payroll_by_id(payroll_id)?
        .ok_or_else(|| EngineError::not_found("Payroll record not found."))?;

    record.other_deductions = amount.max(Decimal::ZERO);
    record.total_deduction = record.attendance_deduction + record.other_deductions;
    record.net_pay = record.gross_pay - record.total_deduction;
    store.update_payroll(record.clone())?;
    Ok(record)
}

/// Sets the payment status of a payroll record (admin).
///
/// Moving to `Paid` stamps `now` as the payment date; any other status
/// clears it.
pub fn set_payment_status(
    store: &dyn Store,
    principal: &Principal,
    payroll_id: Uuid,
    status: PaymentStatus,
    now: NaiveDateTime,
) -> EngineResult<PayrollRecord> {
    principal.require_admin()?;
    let mut record = store
        .payroll_by_id(payroll_id)?
        .ok_or_else(|| EngineError::not_found("Payroll record not found."))?;

    record.payment_status = status;
    record.paid_at = (status == PaymentStatus::Paid).then_some(now);
    store.update_payroll(record.clone())?;
    Ok(record)
}

/// Returns the calling employee's payroll history, optionally narrowed
/// to a month and/or year, newest period first.
pub fn my_history(
    store: &dyn Store,
    principal: &Principal,
    month: Option<u32>,
    year: Option<i32>,
) -> EngineResult<Vec<PayrollRecord>> {
    principal.require_employee()?;
    store.payrolls_for_employee(principal.id, month, year)
}

/// Returns every employee's payroll for one period (admin).
pub fn list_for_period(
    store: &dyn Store,
    principal: &Principal,
    month: u32,
    year: i32,
) -> EngineResult<Vec<PayrollRecord>> {
    principal.require_admin()?;
    month_bounds(month, year)?;
    store.payrolls_for_period(month, year)
}

/// Deletes a payroll record (admin).
pub fn delete(store: &dyn Store, principal: &Principal, payroll_id: Uuid) -> EngineResult<()> {
    principal.require_admin()?;
    store.delete_payroll(payroll_id)
}
