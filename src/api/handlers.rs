//! HTTP request handlers for the PAYE engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_payroll;
use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::{AuditTrace, CalculationResult};
use crate::presentation::{DEFAULT_COMPANY_NAME, Payslip};
use crate::validation::{PayForm, validate_form};

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse, PayslipResponse, ScheduleResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/payslip", post(payslip_handler))
        .route("/schedule", get(schedule_handler))
        .with_state(state)
}

/// Handler for POST /calculate.
///
/// Validates the pay form and returns the full calculation with its audit trace.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Result<Json<CalculationResult>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = parse_request(payload, correlation_id)?;
    let effective_date = request.effective_date.unwrap_or_else(today);

    let result = run_calculation(&request.form, effective_date, state.config(), correlation_id)?;
    Ok(Json(result))
}

/// Handler for POST /payslip.
///
/// Runs the same calculation as `/calculate` and lays the result out as a
/// payslip.
async fn payslip_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Result<Json<PayslipResponse>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payslip request");

    let request = parse_request(payload, correlation_id)?;
    let effective_date = request.effective_date.unwrap_or_else(today);
    let company_name = request
        .company_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_COMPANY_NAME);

    let result = run_calculation(&request.form, effective_date, state.config(), correlation_id)?;
    let payslip = Payslip::new(
        result.employee,
        &result.pay,
        &result.currency,
        company_name,
        effective_date,
    );

    Ok(Json(PayslipResponse {
        file_name: payslip.file_name(),
        text: payslip.render_text(),
        payslip,
    }))
}

/// Handler for GET /schedule.
///
/// Returns the tax bands and contribution scheme in force today.
async fn schedule_handler(
    State(state): State<AppState>,
) -> Result<Json<ScheduleResponse>, ApiErrorResponse> {
    let config = state.config();
    let schedule = config.get_schedule(today())?;

    Ok(Json(ScheduleResponse {
        jurisdiction: config.jurisdiction().clone(),
        schedule: schedule.clone(),
    }))
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn parse_request(
    payload: Result<Json<CalculationRequest>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<CalculationRequest, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

fn run_calculation(
    form: &PayForm,
    effective_date: NaiveDate,
    config: &ConfigLoader,
    correlation_id: Uuid,
) -> Result<CalculationResult, ApiErrorResponse> {
    match perform_calculation(form, effective_date, config) {
        Ok(result) => {
            for warning in &result.audit_trace.warnings {
                warn!(
                    correlation_id = %correlation_id,
                    code = %warning.code,
                    "{}",
                    warning.message
                );
            }
            info!(
                correlation_id = %correlation_id,
                employee_id = %result.employee.id,
                schedule = %result.schedule_effective_date,
                net_pay = %result.pay.net_pay,
                duration_us = result.audit_trace.duration_us,
                "Calculation completed successfully"
            );
            Ok(result)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            Err(err.into())
        }
    }
}

/// Validates `form` and computes net pay under the schedule effective on
/// `effective_date`.
pub fn perform_calculation(
    form: &PayForm,
    effective_date: NaiveDate,
    config: &ConfigLoader,
) -> EngineResult<CalculationResult> {
    let start_time = Instant::now();

    let validated = validate_form(form)?;
    let schedule = config.get_schedule(effective_date)?;
    let calculation = calculate_payroll(&validated.input, schedule)?;

    let duration_us = start_time.elapsed().as_micros() as u64;

    Ok(CalculationResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        schedule_effective_date: schedule.effective_date,
        currency: config.currency().to_string(),
        employee: validated.employee,
        contribution_tier: validated.input.contribution_tier,
        pay: calculation.pay,
        tax_breakdown: calculation.tax_breakdown,
        audit_trace: AuditTrace {
            steps: calculation.audit_steps,
            warnings: calculation.warnings,
            duration_us,
        },
    })
}
