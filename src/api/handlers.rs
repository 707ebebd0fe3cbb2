//! HTTP request handlers for the attendance engine API.
//!
//! Thin wrappers: each handler extracts the caller identity, hands the
//! request to the rules with the store and the clock's `now`, and maps
//! the result onto a status code. All policy lives in [`crate::rules`].

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{Principal, SettingsUpdate};
use crate::rules::attendance::{AttendanceUpdate, CheckInRequest, CheckOutRequest};
use crate::rules::employees::NewEmployee;
use crate::rules::leave::LeaveSubmission;
use crate::rules::{attendance, employees, leave, payroll, settings};

use super::request::{
    DecisionBody, GeneratePayrollQuery, HistoryQuery, LeaveFilterQuery, OtherDeductionsBody,
    PaymentStatusBody, PeriodQuery, RecordLeaveBody,
};
use super::response::ApiErrorResponse;
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/attendance/check-in", post(check_in))
        .route("/attendance/check-out", post(check_out))
        .route("/attendance/status", get(today_status))
        .route("/attendance/history", get(attendance_history))
        .route("/attendance/payable-days", get(payable_days))
        .route("/attendance/recap", get(monthly_recap))
        .route("/attendance/leave", post(record_leave_day))
        .route("/attendance/by-month", get(attendance_by_month))
        .route("/attendance/today", get(todays_activity))
        .route(
            "/attendance/:id",
            put(update_attendance).delete(delete_attendance),
        )
        .route("/leave-requests", post(submit_leave).get(list_leave_requests))
        .route("/leave-requests/mine", get(my_leave_requests))
        .route("/leave-requests/:id/approve", put(approve_leave))
        .route("/leave-requests/:id/reject", put(reject_leave))
        .route("/leave-requests/:id", axum::routing::delete(delete_leave))
        .route("/payroll/generate", post(generate_payroll))
        .route("/payroll/mine", get(my_payroll_history))
        .route("/payroll", get(payrolls_for_period))
        .route("/payroll/:id/deductions", put(edit_other_deductions))
        .route("/payroll/:id/status", put(edit_payment_status))
        .route("/payroll/:id", axum::routing::delete(delete_payroll))
        .route("/settings", get(get_settings).put(put_settings))
        .route("/employees", post(create_employee).get(list_employees))
        .route("/employees/:id", get(get_employee))
        .with_state(state)
}

async fn check_in(
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<CheckInRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    match attendance::check_in(state.store(), &principal, &body, state.now()) {
        Ok(outcome) => {
            info!(
                employee_id = %principal.id,
                status = %outcome.status,
                resumed = outcome.resumed_from_leave,
                "Check-in recorded"
            );
            Ok((StatusCode::CREATED, Json(outcome)))
        }
        Err(err) => {
            warn!(employee_id = %principal.id, error = %err, "Check-in rejected");
            Err(err.into())
        }
    }
}

async fn check_out(
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<CheckOutRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let record = attendance::check_out(state.store(), &principal, &body, state.now())?;
    info!(employee_id = %principal.id, "Check-out recorded");
    Ok(Json(record))
}

async fn today_status(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let record = attendance::today_status(state.store(), &principal, state.now())?;
    Ok(Json(record))
}

async fn attendance_history(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let records = attendance::history(state.store(), &principal)?;
    Ok(Json(records))
}

async fn payable_days(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let count = attendance::payable_days_count(state.store(), &principal, state.now())?;
    Ok(Json(serde_json::json!({ "payable_days": count })))
}

async fn monthly_recap(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let recap = attendance::monthly_recap(state.store(), &principal, state.now())?;
    Ok(Json(recap))
}

async fn record_leave_day(
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<RecordLeaveBody>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let record =
        attendance::record_leave_day(state.store(), &principal, body.employee_id, body.date)?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn attendance_by_month(
    State(state): State<AppState>,
    principal: Principal,
    Query(query): Query<PeriodQuery>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let records =
        attendance::records_for_month(state.store(), &principal, query.month, query.year)?;
    Ok(Json(records))
}

async fn todays_activity(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let records = attendance::todays_activity(state.store(), &principal, state.now())?;
    Ok(Json(records))
}

async fn update_attendance(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(body): Json<AttendanceUpdate>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let record = attendance::update_record(state.store(), &principal, id, body)?;
    Ok(Json(record))
}

async fn delete_attendance(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    attendance::delete_record(state.store(), &principal, id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn submit_leave(
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<LeaveSubmission>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let request = leave::submit(state.store(), &principal, body, state.now())?;
    Ok((StatusCode::CREATED, Json(request)))
}

async fn list_leave_requests(
    State(state): State<AppState>,
    principal: Principal,
    Query(query): Query<LeaveFilterQuery>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let requests = leave::all_requests(state.store(), &principal, query.status)?;
    Ok(Json(requests))
}

async fn my_leave_requests(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let requests = leave::my_requests(state.store(), &principal)?;
    Ok(Json(requests))
}

async fn approve_leave(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(body): Json<DecisionBody>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    match leave::approve(state.store(), &principal, id, body.note, state.now()) {
        Ok(request) => Ok(Json(request)),
        Err(err) => {
            warn!(request_id = %id, error = %err, "Leave approval failed");
            Err(err.into())
        }
    }
}

async fn reject_leave(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(body): Json<DecisionBody>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let request = leave::reject(state.store(), &principal, id, body.note, state.now())?;
    Ok(Json(request))
}

async fn delete_leave(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    leave::delete(state.store(), &principal, id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn generate_payroll(
    State(state): State<AppState>,
    principal: Principal,
    Query(query): Query<GeneratePayrollQuery>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    match payroll::generate(
        state.store(),
        &principal,
        query.employee_id,
        query.month,
        query.year,
        state.now(),
    ) {
        Ok(record) => Ok(Json(record)),
        Err(err) => {
            warn!(
                employee_id = %query.employee_id,
                month = query.month,
                year = query.year,
                error = %err,
                "Payroll generation failed"
            );
            Err(err.into())
        }
    }
}

async fn my_payroll_history(
    State(state): State<AppState>,
    principal: Principal,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let records = payroll::my_history(state.store(), &principal, query.month, query.year)?;
    Ok(Json(records))
}

async fn payrolls_for_period(
    State(state): State<AppState>,
    principal: Principal,
    Query(query): Query<PeriodQuery>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let records = payroll::list_for_period(state.store(), &principal, query.month, query.year)?;
    Ok(Json(records))
}

async fn edit_other_deductions(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(body): Json<OtherDeductionsBody>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let record =
        payroll::set_other_deductions(state.store(), &principal, id, body.other_deductions)?;
    Ok(Json(record))
}

async fn edit_payment_status(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(body): Json<PaymentStatusBody>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let record =
        payroll::set_payment_status(state.store(), &principal, id, body.status, state.now())?;
    Ok(Json(record))
}

async fn delete_payroll(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    payroll::delete(state.store(), &principal, id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_settings(
    State(state): State<AppState>,
    _principal: Principal,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let settings = settings::fetch(state.store())?;
    Ok(Json(settings))
}

async fn put_settings(
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<SettingsUpdate>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let settings = settings::update(state.store(), &principal, body)?;
    info!(admin_id = %principal.id, "Office settings updated");
    Ok(Json(settings))
}

async fn create_employee(
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<NewEmployee>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let employee = employees::create(state.store(), &principal, body, state.now())?;
    Ok((StatusCode::CREATED, Json(employee)))
}

async fn list_employees(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let all = employees::list(state.store(), &principal)?;
    Ok(Json(all))
}

async fn get_employee(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let employee = employees::fetch(state.store(), &principal, id)?;
    Ok(Json(employee))
}
