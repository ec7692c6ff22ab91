#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for goblin-report
//!
//! This library holds all functionality of the goblin-report tool, which looks
//! up quality metrics for a project's direct dependencies on a remote metrics
//! service and renders them as a linkable report.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`facts`]: Metric retrieval and report row assembly
//! - [`reports`]: Report generation in multiple formats

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub mod facts;
pub mod reports;

pub use crate::commands::{Host, run};
