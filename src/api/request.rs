//! Request types and identity extraction for the attendance engine API.
//!
//! Token verification happens upstream (a gateway or reverse proxy);
//! handlers receive the resolved identity through the `x-actor-id` and
//! `x-actor-role` headers and turn it into a [`Principal`].

use axum::{async_trait, extract::FromRequestParts, http::StatusCode, http::request::Parts};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{LeaveStatus, PaymentStatus, Principal, Role};

use super::response::{ApiError, ApiErrorResponse};

/// Header carrying the resolved caller id.
pub const ACTOR_ID_HEADER: &str = "x-actor-id";
/// Header carrying the resolved caller role.
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(ACTOR_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok());
        let role = parts
            .headers
            .get(ACTOR_ROLE_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| match value {
                "admin" => Some(Role::Admin),
                "employee" => Some(Role::Employee),
                _ => None,
            });

        match (id, role) {
            (Some(id), Some(role)) => Ok(Principal { id, role }),
            _ => Err(ApiErrorResponse {
                status: StatusCode::UNAUTHORIZED,
                error: ApiError::new(
                    "UNAUTHENTICATED",
                    "Missing or invalid identity headers.",
                ),
            }),
        }
    }
}

/// Body for the admin single-day leave endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordLeaveBody {
    /// The employee to record leave for.
    pub employee_id: Uuid,
    /// The day of leave.
    pub date: NaiveDate,
}

/// Body for leave approval and rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionBody {
    /// Optional note from the deciding admin.
    #[serde(default)]
    pub note: Option<String>,
}

/// Body for editing a payroll record's other deductions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtherDeductionsBody {
    /// The new other-deductions amount.
    pub other_deductions: Decimal,
}

/// Body for changing a payroll record's payment status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentStatusBody {
    /// The new payment status.
    pub status: PaymentStatus,
}

/// Query for payroll generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePayrollQuery {
    /// The employee to generate payroll for.
    pub employee_id: Uuid,
    /// Calendar month, 1-12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

/// Query naming one calendar period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodQuery {
    /// Calendar month, 1-12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

/// Query for the personal payroll history endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryQuery {
    /// Narrow to one month, if given.
    #[serde(default)]
    pub month: Option<u32>,
    /// Narrow to one year, if given.
    #[serde(default)]
    pub year: Option<i32>,
}

/// Query for the admin leave request listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaveFilterQuery {
    /// Narrow to one status, if given.
    #[serde(default)]
    pub status: Option<LeaveStatus>,
}
