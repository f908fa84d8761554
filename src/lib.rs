//! Net pay engine for Ugandan PAYE income tax and NSSF contributions.
//!
//! Converts a gross salary (monthly or annual), allowances and other
//! deductions into PAYE tax, employee and employer NSSF contributions and
//! net pay. Tax bands and contribution rates are loaded from dated YAML
//! schedules, and every calculation carries an audit trace of its steps.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod presentation;
pub mod validation;
