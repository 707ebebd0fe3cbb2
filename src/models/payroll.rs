//! Payroll record model and related types.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The payment state of a payroll record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Generated but not yet paid out.
    Unpaid,
    /// Payment is being processed.
    Processing,
    /// Paid out; `paid_at` records when.
    Paid,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Unpaid => write!(f, "Unpaid"),
            PaymentStatus::Processing => write!(f, "Processing"),
            PaymentStatus::Paid => write!(f, "Paid"),
        }
    }
}

/// Per-status day tallies for one payroll month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCounts {
    /// Days with a `Present` attendance record.
    pub present: u32,
    /// Days with a `Late` attendance record.
    pub late: u32,
    /// Days with an `OnLeave` attendance record.
    pub leave: u32,
    /// Weekdays in the month with no attendance record at all.
    pub absent: u32,
}

impl DayCounts {
    /// Days that count toward salary proration (Present, Late, OnLeave).
    pub fn payable(&self) -> u32 {
        self.present + self.late + self.leave
    }
}

/// One employee's computed payroll for one (month, year).
///
/// Salary and allowances are snapshotted at generation time; regenerating
/// for the same period overwrites the computed fields in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Unique identifier for the record.
    pub id: Uuid,
    /// The employee the payroll belongs to.
    pub employee_id: Uuid,
    /// Calendar month, 1-12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Base salary at generation time.
    pub base_salary: Decimal,
    /// Position allowance at generation time.
    pub position_allowance: Decimal,
    /// Transport allowance at generation time.
    pub transport_allowance: Decimal,
    /// Meal allowance at generation time.
    pub meal_allowance: Decimal,
    /// Sum of the three allowances.
    pub total_allowances: Decimal,
    /// Base salary plus all allowances.
    pub gross_pay: Decimal,
    /// Prorated shortfall for non-payable days.
    pub attendance_deduction: Decimal,
    /// Manually entered deductions (insurance, tax withholding, ...).
    pub other_deductions: Decimal,
    /// Attendance deduction plus other deductions.
    pub total_deduction: Decimal,
    /// Gross pay minus total deduction.
    pub net_pay: Decimal,
    /// Day tallies the computation was based on.
    pub day_counts: DayCounts,
    /// Current payment state.
    pub payment_status: PaymentStatus,
    /// When the payroll was paid, if it has been.
    #[serde(default)]
    pub paid_at: Option<NaiveDateTime>,
    /// The admin who generated the record.
    pub generated_by: Uuid,
    /// When the record was last generated.
    pub generated_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_payable_days_exclude_absences() {
        let counts = DayCounts {
            present: 15,
            late: 3,
            leave: 2,
            absent: 4,
        };
        assert_eq!(counts.payable(), 20);
    }

    #[test]
    fn test_payment_status_serialization() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Unpaid).unwrap(),
            "\"unpaid\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Processing).unwrap(),
            "\"processing\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Paid).unwrap(),
            "\"paid\""
        );
    }

    #[test]
    fn test_payroll_record_round_trip() {
        let record = PayrollRecord {
            id: Uuid::new_v4(),
            employee_id: Uuid::new_v4(),
            month: 3,
            year: 2026,
            base_salary: dec("3000000"),
            position_allowance: dec("500000"),
            transport_allowance: dec("300000"),
            meal_allowance: dec("200000"),
            total_allowances: dec("1000000"),
            gross_pay: dec("4000000"),
            attendance_deduction: dec("666666.67"),
            other_deductions: dec("150000"),
            total_deduction: dec("816666.67"),
            net_pay: dec("3183333.33"),
            day_counts: DayCounts {
                present: 20,
                late: 3,
                leave: 2,
                absent: 1,
            },
            payment_status: PaymentStatus::Paid,
            paid_at: Some(
                NaiveDateTime::parse_from_str("2026-04-01 09:15:00", "%Y-%m-%d %H:%M:%S").unwrap(),
            ),
            generated_by: Uuid::new_v4(),
            generated_at: NaiveDateTime::parse_from_str("2026-03-31 17:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
        };

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: PayrollRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }
}
