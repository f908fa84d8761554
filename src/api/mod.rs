//! HTTP API module for the PAYE engine.
//!
//! This module provides the REST endpoints for calculating net pay,
//! producing payslips and inspecting the statutory schedule in force.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{create_router, perform_calculation};
pub use request::CalculationRequest;
pub use response::{ApiError, ApiErrorResponse, PayslipResponse, ScheduleResponse};
pub use state::AppState;
