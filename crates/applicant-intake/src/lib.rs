//! Applicant identity intake: validation, payload mapping, and sandbox
//! screening decisions shared by the HTTP and terminal front ends.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
