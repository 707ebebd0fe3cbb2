//! Attendance, leave, and payroll engine.
//!
//! This crate provides geofenced check-in/check-out validation,
//! leave-to-attendance reconciliation, and prorated payroll calculation,
//! plus a thin REST layer over the engine. Authentication, file uploads,
//! and durable persistence are collaborators outside this crate.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod rules;
pub mod store;
