//! Caller identity types.
//!
//! Token verification happens upstream; the engine only ever sees a
//! resolved [`Principal`] and is responsible for role checks.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// The role of an authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Administrative staff: manages employees, leave decisions, and payroll.
    Admin,
    /// A regular employee: checks in and out, requests leave.
    Employee,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Employee => write!(f, "employee"),
        }
    }
}

/// A resolved caller identity.
///
/// For employee principals, `id` is the employee's id; for admin
/// principals it identifies the admin account that approved or generated
/// something.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// The caller's unique id.
    pub id: Uuid,
    /// The caller's role.
    pub role: Role,
}

impl Principal {
    /// Returns an error unless the principal holds the given role.
    pub fn require_role(&self, required: Role) -> EngineResult<()> {
        if self.role == required {
            Ok(())
        } else {
            Err(EngineError::ForbiddenRole { required })
        }
    }

    /// Returns an error unless the principal is an admin.
    pub fn require_admin(&self) -> EngineResult<()> {
        self.require_role(Role::Admin)
    }

    /// Returns an error unless the principal is an employee.
    pub fn require_employee(&self) -> EngineResult<()> {
        self.require_role(Role::Employee)
    }
}
