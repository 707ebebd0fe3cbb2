//! In-memory reference implementation of the storage traits.
//!
//! Backs the test suite and small deployments. All maps live behind a
//! single `RwLock`, so every operation is one atomic critical section
//! and the uniqueness indexes cannot be observed half-updated.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, AttendanceStatus, Employee, EmployeeStatus, LeaveRequest, LeaveStatus,
    OfficeSettings, PayrollRecord,
};

use super::{AttendanceStore, EmployeeStore, LeaveStore, PayrollStore, SettingsStore};

#[derive(Default)]
struct Inner {
    employees: HashMap<Uuid, Employee>,
    attendance: HashMap<Uuid, AttendanceRecord>,
    // unique index: (employee, date) -> record id
    attendance_by_day: HashMap<(Uuid, NaiveDate), Uuid>,
    leaves: HashMap<Uuid, LeaveRequest>,
    payrolls: HashMap<Uuid, PayrollRecord>,
    // unique index: (employee, month, year) -> record id
    payroll_by_period: HashMap<(Uuid, u32, i32), Uuid>,
    settings: Option<OfficeSettings>,
}

/// A thread-safe in-memory store.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> EngineResult<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| EngineError::storage("store lock poisoned"))
    }

    fn write(&self) -> EngineResult<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| EngineError::storage("store lock poisoned"))
    }
}

impl EmployeeStore for MemoryStore {
    fn insert_employee(&self, employee: Employee) -> EngineResult<()> {
        let mut inner = self.write()?;
        if inner.employees.contains_key(&employee.id) {
            return Err(EngineError::conflict("An employee with this id already exists."));
        }
        inner.employees.insert(employee.id, employee);
        Ok(())
    }

    fn employee(&self, id: Uuid) -> EngineResult<Option<Employee>> {
        Ok(self.read()?.employees.get(&id).cloned())
    }

    fn employees(&self) -> EngineResult<Vec<Employee>> {
        let inner = self.read()?;
        let mut employees: Vec<_> = inner.employees.values().cloned().collect();
        employees.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(employees)
    }

    fn set_employee_status(&self, id: Uuid, status: EmployeeStatus) -> EngineResult<()> {
        let mut inner = self.write()?;
        let employee = inner
            .employees
            .get_mut(&id)
            .ok_or_else(|| EngineError::not_found("Employee not found."))?;
        employee.status = status;
        Ok(())
    }
}

impl AttendanceStore for MemoryStore {
    fn insert_attendance(&self, record: AttendanceRecord) -> EngineResult<()> {
        let mut inner = self.write()?;
        let key = (record.employee_id, record.date);
        if inner.attendance_by_day.contains_key(&key) {
            return Err(EngineError::conflict(format!(
                "An attendance record already exists for this employee on {}.",
                record.date
            )));
        }
        inner.attendance_by_day.insert(key, record.id);
        inner.attendance.insert(record.id, record);
        Ok(())
    }

    fn attendance_by_id(&self, id: Uuid) -> EngineResult<Option<AttendanceRecord>> {
        Ok(self.read()?.attendance.get(&id).cloned())
    }

    fn attendance_on(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> EngineResult<Option<AttendanceRecord>> {
        let inner = self.read()?;
        Ok(inner
            .attendance_by_day
            .get(&(employee_id, date))
            .and_then(|id| inner.attendance.get(id))
            .cloned())
    }

    fn update_attendance(&self, record: AttendanceRecord) -> EngineResult<()> {
        let mut inner = self.write()?;
        let old = inner
            .attendance
            .get(&record.id)
            .ok_or_else(|| EngineError::not_found("Attendance record not found."))?;

        let old_key = (old.employee_id, old.date);
        let new_key = (record.employee_id, record.date);
        if new_key != old_key {
            if inner.attendance_by_day.contains_key(&new_key) {
                return Err(EngineError::conflict(format!(
                    "An attendance record already exists for this employee on {}.",
                    record.date
                )));
            }
            inner.attendance_by_day.remove(&old_key);
            inner.attendance_by_day.insert(new_key, record.id);
        }
        inner.attendance.insert(record.id, record);
        Ok(())
    }

    fn delete_attendance(&self, id: Uuid) -> EngineResult<()> {
        let mut inner = self.write()?;
        let record = inner
            .attendance
            .remove(&id)
            .ok_or_else(|| EngineError::not_found("Attendance record not found."))?;
        inner
            .attendance_by_day
            .remove(&(record.employee_id, record.date));
        Ok(())
    }

    fn attendance_for_employee(&self, employee_id: Uuid) -> EngineResult<Vec<AttendanceRecord>> {
        let inner = self.read()?;
        let mut records: Vec<_> = inner
            .attendance
            .values()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }

    fn attendance_in_range(
        &self,
        employee_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        let inner = self.read()?;
        let mut records: Vec<_> = inner
            .attendance
            .values()
            .filter(|r| r.employee_id == employee_id && r.date >= from && r.date <= to)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(records)
    }

    fn all_attendance_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        let inner = self.read()?;
        let mut records: Vec<_> = inner
            .attendance
            .values()
            .filter(|r| r.date >= from && r.date <= to)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }

    fn count_attendance_in_range(
        &self,
        employee_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
        statuses: &[AttendanceStatus],
    ) -> EngineResult<u64> {
        let inner = self.read()?;
        Ok(inner
            .attendance
            .values()
            .filter(|r| {
                r.employee_id == employee_id
                    && r.date >= from
                    && r.date <= to
                    && statuses.contains(&r.status)
            })
            .count() as u64)
    }

    fn delete_on_leave_in_range(
        &self,
        employee_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<u32> {
        let mut inner = self.write()?;
        let doomed: Vec<(Uuid, NaiveDate)> = inner
            .attendance
            .values()
            .filter(|r| {
                r.employee_id == employee_id
                    && r.date >= from
                    && r.date <= to
                    && r.status == AttendanceStatus::OnLeave
            })
            .map(|r| (r.id, r.date))
            .collect();

        for (id, date) in &doomed {
            inner.attendance.remove(id);
            inner.attendance_by_day.remove(&(employee_id, *date));
        }
        Ok(doomed.len() as u32)
    }
}

impl LeaveStore for MemoryStore {
    fn insert_leave(&self, request: LeaveRequest) -> EngineResult<()> {
        self.write()?.leaves.insert(request.id, request);
        Ok(())
    }

    fn leave_by_id(&self, id: Uuid) -> EngineResult<Option<LeaveRequest>> {
        Ok(self.read()?.leaves.get(&id).cloned())
    }

    fn update_leave(&self, request: LeaveRequest) -> EngineResult<()> {
        let mut inner = self.write()?;
        if !inner.leaves.contains_key(&request.id) {
            return Err(EngineError::not_found("Leave request not found."));
        }
        inner.leaves.insert(request.id, request);
        Ok(())
    }

    fn delete_leave(&self, id: Uuid) -> EngineResult<()> {
        self.write()?
            .leaves
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| EngineError::not_found("Leave request not found."))
    }

    fn leaves_for_employee(&self, employee_id: Uuid) -> EngineResult<Vec<LeaveRequest>> {
        let inner = self.read()?;
        let mut requests: Vec<_> = inner
            .leaves
            .values()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(requests)
    }

    fn leaves_with_status(&self, status: Option<LeaveStatus>) -> EngineResult<Vec<LeaveRequest>> {
        let inner = self.read()?;
        let mut requests: Vec<_> = inner
            .leaves
            .values()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(requests)
    }
}

impl PayrollStore for MemoryStore {
    fn upsert_payroll(&self, record: PayrollRecord) -> EngineResult<()> {
        let mut inner = self.write()?;
        let key = (record.employee_id, record.month, record.year);
        if let Some(existing_id) = inner.payroll_by_period.get(&key).copied() {
            if existing_id != record.id {
                inner.payrolls.remove(&existing_id);
            }
        }
        inner.payroll_by_period.insert(key, record.id);
        inner.payrolls.insert(record.id, record);
        Ok(())
    }

    fn payroll_by_id(&self, id: Uuid) -> EngineResult<Option<PayrollRecord>> {
        Ok(self.read()?.payrolls.get(&id).cloned())
    }

    fn payroll_for_period(
        &self,
        employee_id: Uuid,
        month: u32,
        year: i32,
    ) -> EngineResult<Option<PayrollRecord>> {
        let inner = self.read()?;
        Ok(inner
            .payroll_by_period
            .get(&(employee_id, month, year))
            .and_then(|id| inner.payrolls.get(id))
            .cloned())
    }

    fn update_payroll(&self, record: PayrollRecord) -> EngineResult<()> {
        let mut inner = self.write()?;
        let old = inner
            .payrolls
            .get(&record.id)
            .ok_or_else(|| EngineError::not_found("Payroll record not found."))?;

        let old_key = (old.employee_id, old.month, old.year);
        let new_key = (record.employee_id, record.month, record.year);
        if new_key != old_key {
            if inner.payroll_by_period.contains_key(&new_key) {
                return Err(EngineError::conflict(
                    "A payroll record already exists for this employee and period.",
                ));
            }
            inner.payroll_by_period.remove(&old_key);
            inner.payroll_by_period.insert(new_key, record.id);
        }
        inner.payrolls.insert(record.id, record);
        Ok(())
    }

    fn delete_payroll(&self, id: Uuid) -> EngineResult<()> {
        let mut inner = self.write()?;
        let record = inner
            .payrolls
            .remove(&id)
            .ok_or_else(|| EngineError::not_found("Payroll record not found."))?;
        inner
            .payroll_by_period
            .remove(&(record.employee_id, record.month, record.year));
        Ok(())
    }

    fn payrolls_for_period(&self, month: u32, year: i32) -> EngineResult<Vec<PayrollRecord>> {
        let inner = self.read()?;
        let mut records: Vec<_> = inner
            .payrolls
            .values()
            .filter(|r| r.month == month && r.year == year)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.employee_id);
        Ok(records)
    }

    fn payrolls_for_employee(
        &self,
        employee_id: Uuid,
        month: Option<u32>,
        year: Option<i32>,
    ) -> EngineResult<Vec<PayrollRecord>> {
        let inner = self.read()?;
        let mut records: Vec<_> = inner
            .payrolls
            .values()
            .filter(|r| {
                r.employee_id == employee_id
                    && month.is_none_or(|m| r.month == m)
                    && year.is_none_or(|y| r.year == y)
            })
            .cloned()
            .collect();
        records.sort_by(|a, b| (b.year, b.month).cmp(&(a.year, a.month)));
        Ok(records)
    }
}

impl SettingsStore for MemoryStore {
    fn office_settings(&self) -> EngineResult<OfficeSettings> {
        let mut inner = self.write()?;
        Ok(inner
            .settings
            .get_or_insert_with(OfficeSettings::default)
            .clone())
    }

    fn save_office_settings(&self, settings: OfficeSettings) -> EngineResult<()> {
        self.write()?.settings = Some(settings);
        Ok(())
    }
}
