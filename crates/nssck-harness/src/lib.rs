//! Conformance checks for a user/group identity directory.
//!
//! This crate provides:
//! - Equivalence checks: every enumerated record must be re-derivable,
//!   structurally identical, through the by-name, by-id, and reentrant
//!   lookup paths.
//! - Duplicate detection: no two snapshot positions may share a primary key.
//! - Membership validation: the aggregate group-list query must agree with
//!   manual inspection of every group's member list.
//! - Suite runner + report: one pass/fail/skip verdict per named check,
//!   JSON/markdown artifacts, JSONL structured log.

#![forbid(unsafe_code)]

pub mod diff;
pub mod duplicates;
pub mod equivalence;
pub mod log;
pub mod membership;
pub mod report;
pub mod suite;

pub use report::{CheckOutcome, CheckReport, SuiteReport};
pub use suite::run_suite;
