//! gobump - Go module dependency bumper library
//!
//! This library bumps the direct dependencies of a Go module one at a time:
//! - Candidate versions come from a Go module proxy
//! - Each bump is applied with `go get` and validated against the go directive
//! - Optional verification commands decide whether a bump is kept
//! - Failed bumps are rolled back before the next attempt

pub mod changelog;
pub mod cli;
pub mod command;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod registry;
pub mod telemetry;
pub mod update;
