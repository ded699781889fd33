//! Care Allowance Engine
//!
//! This crate calculates the allowance a carer receives for the dependents in
//! their care. Weekly rates depend on each dependent's age bracket, special
//! care needs and the carer's experience, and are prorated over the weeks of
//! the year each dependent is in care.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod telemetry;
