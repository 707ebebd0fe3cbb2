//! Employee model and related types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Role;

/// The employment status of an employee.
///
/// An employee is `OnLeave` exactly while an approved leave interval
/// covers today (or an admin recorded a leave day for them); otherwise
/// `Active`. The leave reconciler and check-in are the only writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Working normally.
    Active,
    /// Currently on approved leave.
    OnLeave,
}

/// An employee's identity and compensation profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Contact email, if one is on file.
    #[serde(default)]
    pub email: Option<String>,
    /// Job title, if assigned.
    #[serde(default)]
    pub position: Option<String>,
    /// Department, if assigned.
    #[serde(default)]
    pub department: Option<String>,
    /// The date the employee joined the company.
    pub joined_date: NaiveDate,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Monthly position allowance.
    pub position_allowance: Decimal,
    /// Monthly transport allowance.
    pub transport_allowance: Decimal,
    /// Monthly meal allowance.
    pub meal_allowance: Decimal,
    /// Current employment status.
    pub status: EmployeeStatus,
    /// The principal role this profile maps to. Always [`Role::Employee`].
    pub role: Role,
}

impl Employee {
    /// Sum of the three monthly allowances.
    pub fn total_allowances(&self) -> Decimal {
        self.position_allowance + self.transport_allowance + self.meal_allowance
    }

    /// Monthly gross pay: base salary plus all allowances.
    pub fn gross_pay(&self) -> Decimal {
        self.base_salary + self.total_allowances()
    }

    /// Returns true if the employee is currently on leave.
    pub fn is_on_leave(&self) -> bool {
        self.status == EmployeeStatus::OnLeave
    }
}
