//! Smoke-test harness for the government fees API.
//!
//! Runs a fixed sequence of endpoint checks, records a PASS / FAIL / WARN
//! verdict for every asserted behaviour, and persists a summary report.
//!
//! # Architecture
//!
//! - [`recorder::Recorder`] - Append-only verdict log and run summary
//! - [`shape::Shape`] - Per-endpoint field expectations with severities
//! - [`checks`] - One check function per endpoint
//! - [`orchestrator::run`] - Fixed-order driver with the API key short-circuit
//! - [`report`] - Human summary block and the persisted JSON report
//! - [`workflow`] - End-to-end walk through the typed client

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

pub mod checks;
pub mod config;
pub mod orchestrator;
pub mod probe;
pub mod recorder;
pub mod report;
pub mod shape;
pub mod verdict;
pub mod workflow;
