//! Storage traits and the in-memory reference store.
//!
//! The engine talks to persistence through the small trait seams in this
//! module. Uniqueness of (employee, date) for attendance and
//! (employee, month, year) for payroll is enforced inside the store;
//! the existence checks the rules perform first are only a fast path,
//! not the correctness guarantee.

mod memory;

pub use memory::MemoryStore;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{
    AttendanceRecord, AttendanceStatus, Employee, EmployeeStatus, LeaveRequest, LeaveStatus,
    OfficeSettings, PayrollRecord,
};

/// Persistence operations for employees.
pub trait EmployeeStore {
    /// Inserts a new employee. Fails with `Conflict` if the id is taken.
    fn insert_employee(&self, employee: Employee) -> EngineResult<()>;

    /// Fetches an employee by id.
    fn employee(&self, id: Uuid) -> EngineResult<Option<Employee>>;

    /// Lists all employees, ordered by name.
    fn employees(&self) -> EngineResult<Vec<Employee>>;

    /// Sets an employee's status. Fails with `NotFound` if absent.
    fn set_employee_status(&self, id: Uuid, status: EmployeeStatus) -> EngineResult<()>;
}

/// Persistence operations for attendance records.
pub trait AttendanceStore {
    /// Inserts a new record. Fails with `Conflict` if a record already
    /// exists for the same (employee, date).
    fn insert_attendance(&self, record: AttendanceRecord) -> EngineResult<()>;

    /// Fetches a record by id.
    fn attendance_by_id(&self, id: Uuid) -> EngineResult<Option<AttendanceRecord>>;

    /// Fetches the record for an employee on a specific day, if any.
    fn attendance_on(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> EngineResult<Option<AttendanceRecord>>;

    /// Replaces a record by id. Fails with `NotFound` if absent, or with
    /// `Conflict` if a date change would collide with another record.
    fn update_attendance(&self, record: AttendanceRecord) -> EngineResult<()>;

    /// Deletes a record by id. Fails with `NotFound` if absent.
    fn delete_attendance(&self, id: Uuid) -> EngineResult<()>;

    /// All records for one employee, newest date first.
    fn attendance_for_employee(&self, employee_id: Uuid) -> EngineResult<Vec<AttendanceRecord>>;

    /// One employee's records with `from <= date <= to`, oldest first.
    fn attendance_in_range(
        &self,
        employee_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>>;

    /// Every employee's records with `from <= date <= to`, newest first.
    fn all_attendance_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>>;

    /// Counts one employee's records in the range whose status is in
    /// `statuses`.
    fn count_attendance_in_range(
        &self,
        employee_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
        statuses: &[AttendanceStatus],
    ) -> EngineResult<u64>;

    /// Deletes the employee's `OnLeave` records in the range, returning
    /// how many were removed. Records with other statuses are untouched.
    fn delete_on_leave_in_range(
        &self,
        employee_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<u32>;
}

/// Persistence operations for leave requests.
pub trait LeaveStore {
    /// Inserts a new leave request.
    fn insert_leave(&self, request: LeaveRequest) -> EngineResult<()>;

    /// Fetches a leave request by id.
    fn leave_by_id(&self, id: Uuid) -> EngineResult<Option<LeaveRequest>>;

    /// Replaces a leave request by id. Fails with `NotFound` if absent.
    fn update_leave(&self, request: LeaveRequest) -> EngineResult<()>;

    /// Deletes a leave request by id. Fails with `NotFound` if absent.
    fn delete_leave(&self, id: Uuid) -> EngineResult<()>;

    /// All requests from one employee, newest submission first.
    fn leaves_for_employee(&self, employee_id: Uuid) -> EngineResult<Vec<LeaveRequest>>;

    /// All requests, optionally filtered by status, newest submission
    /// first.
    fn leaves_with_status(&self, status: Option<LeaveStatus>) -> EngineResult<Vec<LeaveRequest>>;
}

/// Persistence operations for payroll records.
pub trait PayrollStore {
    /// Creates or replaces the record for the record's
    /// (employee, month, year), keeping at most one per period.
    fn upsert_payroll(&self, record: PayrollRecord) -> EngineResult<()>;

    /// Fetches a payroll record by id.
    fn payroll_by_id(&self, id: Uuid) -> EngineResult<Option<PayrollRecord>>;

    /// Fetches the record for one employee and period, if any.
    fn payroll_for_period(
        &self,
        employee_id: Uuid,
        month: u32,
        year: i32,
    ) -> EngineResult<Option<PayrollRecord>>;

    /// Replaces a payroll record by id. Fails with `NotFound` if absent.
    fn update_payroll(&self, record: PayrollRecord) -> EngineResult<()>;

    /// Deletes a payroll record by id. Fails with `NotFound` if absent.
    fn delete_payroll(&self, id: Uuid) -> EngineResult<()>;

    /// All records for one period, ordered by employee id.
    fn payrolls_for_period(&self, month: u32, year: i32) -> EngineResult<Vec<PayrollRecord>>;

    /// One employee's records, optionally narrowed to a month and/or
    /// year, newest period first.
    fn payrolls_for_employee(
        &self,
        employee_id: Uuid,
        month: Option<u32>,
        year: Option<i32>,
    ) -> EngineResult<Vec<PayrollRecord>>;
}

/// Persistence operations for the settings singleton.
pub trait SettingsStore {
    /// Returns the office settings, creating them with defaults on first
    /// access.
    fn office_settings(&self) -> EngineResult<OfficeSettings>;

    /// Replaces the office settings.
    fn save_office_settings(&self, settings: OfficeSettings) -> EngineResult<()>;
}

/// The full storage surface the engine operates against.
pub trait Store:
    EmployeeStore + AttendanceStore + LeaveStore + PayrollStore + SettingsStore + Send + Sync
{
}

impl<T> Store for T where
    T: EmployeeStore + AttendanceStore + LeaveStore + PayrollStore + SettingsStore + Send + Sync
{
}
