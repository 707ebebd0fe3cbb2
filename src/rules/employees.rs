//! Admin employee management.
//!
//! Credential handling lives upstream; these operations only manage the
//! identity and compensation profile the engine computes against.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, EmployeeStatus, Principal, Role};
use crate::store::{EmployeeStore, Store};

/// A new employee profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmployee {
    /// Display name.
    pub name: String,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Job title.
    #[serde(default)]
    pub position: Option<String>,
    /// Department.
    #[serde(default)]
    pub department: Option<String>,
    /// Joining date; defaults to today when omitted.
    #[serde(default)]
    pub joined_date: Option<NaiveDate>,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Monthly position allowance.
    #[serde(default)]
    pub position_allowance: Decimal,
    /// Monthly transport allowance.
    #[serde(default)]
    pub transport_allowance: Decimal,
    /// Monthly meal allowance.
    #[serde(default)]
    pub meal_allowance: Decimal,
}

/// Creates an employee (admin). New employees start `Active`.
pub fn create(
    store: &dyn Store,
    principal: &Principal,
    new_employee: NewEmployee,
    now: NaiveDateTime,
) -> EngineResult<Employee> {
    principal.require_admin()?;

    if new_employee.name.trim().is_empty() {
        return Err(EngineError::validation("Name is required."));
    }
    if new_employee.base_salary < Decimal::ZERO {
        return Err(EngineError::validation("Base salary must not be negative."));
    }
    for allowance in [
        new_employee.position_allowance,
        new_employee.transport_allowance,
        new_employee.meal_allowance,
    ] {
        if allowance < Decimal::ZERO {
            return Err(EngineError::validation("Allowances must not be negative."));
        }
    }

    let employee = Employee {
        id: Uuid::new_v4(),
        name: new_employee.name,
        email: new_employee.email,
        position: new_employee.position,
        department: new_employee.department,
        joined_date: new_employee.joined_date.unwrap_or_else(|| now.date()),
        base_salary: new_employee.base_salary,
        position_allowance: new_employee.position_allowance,
        transport_allowance: new_employee.transport_allowance,
        meal_allowance: new_employee.meal_allowance,
        status: EmployeeStatus::Active,
        role: Role::Employee,
    };
    store.insert_employee(employee.clone())?;
    Ok(employee)
}

/// Lists all employees, ordered by name (admin).
pub fn list(store: &dyn Store, principal: &Principal) -> EngineResult<Vec<Employee>> {
    principal.require_admin()?;
    store.employees()
}

/// Fetches one employee. Admins may fetch anyone; employees only
/// themselves.
pub fn fetch(store: &dyn Store, principal: &Principal, employee_id: Uuid) -> EngineResult<Employee> {
    if principal.role != Role::Admin && principal.id != employee_id {
        return Err(EngineError::ForbiddenRole {
            required: Role::Admin,
        });
    }
    store
        .employee(employee_id)?
        .ok_or_else(|| EngineError::not_found("Employee not found."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    use crate::store::MemoryStore;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn admin() -> Principal {
        Principal {
            id: Uuid::new_v4(),
            role: Role::Admin,
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2026-03-02 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn new_employee(name: &str) -> NewEmployee {
        NewEmployee {
            name: name.to_string(),
            email: None,
            position: Some("QA Engineer".to_string()),
            department: None,
            joined_date: None,
            base_salary: dec("2800000"),
            position_allowance: Decimal::ZERO,
            transport_allowance: Decimal::ZERO,
            meal_allowance: Decimal::ZERO,
        }
    }

    #[test]
    fn test_create_defaults_to_active_today() {
        let store = MemoryStore::new();
        let employee = create(&store, &admin(), new_employee("Putri Handayani"), now()).unwrap();

        assert_eq!(employee.status, EmployeeStatus::Active);
        assert_eq!(employee.role, Role::Employee);
        assert_eq!(employee.joined_date, now().date());
    }

    #[test]
    fn test_create_rejects_blank_name_and_negative_amounts() {
        let store = MemoryStore::new();

        assert!(create(&store, &admin(), new_employee("  "), now()).is_err());

        let mut negative_salary = new_employee("Putri");
        negative_salary.base_salary = dec("-1");
        assert!(create(&store, &admin(), negative_salary, now()).is_err());

        let mut negative_allowance = new_employee("Putri");
        negative_allowance.meal_allowance = dec("-1");
        assert!(create(&store, &admin(), negative_allowance, now()).is_err());
    }

    #[test]
    fn test_create_requires_admin() {
        let store = MemoryStore::new();
        let principal = Principal {
            id: Uuid::new_v4(),
            role: Role::Employee,
        };
        let result = create(&store, &principal, new_employee("Putri"), now());
        assert!(matches!(result, Err(EngineError::ForbiddenRole { .. })));
    }

    #[test]
    fn test_list_is_ordered_by_name() {
        let store = MemoryStore::new();
        let deciding_admin = admin();
        create(&store, &deciding_admin, new_employee("Citra"), now()).unwrap();
        create(&store, &deciding_admin, new_employee("Agus"), now()).unwrap();
        create(&store, &deciding_admin, new_employee("Bagus"), now()).unwrap();

        let names: Vec<_> = list(&store, &deciding_admin)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Agus", "Bagus", "Citra"]);
    }

    #[test]
    fn test_fetch_self_allowed_others_forbidden() {
        let store = MemoryStore::new();
        let employee = create(&store, &admin(), new_employee("Putri"), now()).unwrap();

        let own = Principal {
            id: employee.id,
            role: Role::Employee,
        };
        assert_eq!(fetch(&store, &own, employee.id).unwrap().id, employee.id);

        let stranger = Principal {
            id: Uuid::new_v4(),
            role: Role::Employee,
        };
        assert!(matches!(
            fetch(&store, &stranger, employee.id),
            Err(EngineError::ForbiddenRole { .. })
        ));

        assert!(fetch(&store, &admin(), employee.id).is_ok());
    }
}
