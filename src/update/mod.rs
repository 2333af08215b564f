//! Upgrade decision logic
//!
//! This module provides:
//! - Candidate resolution from the module proxy
//! - Allow-list and exclusion filtering
//! - Validation of upgraded manifests
//! - Result aggregation for reporting

mod aggregate;
mod filter;
mod resolver;
mod validation;

pub use aggregate::aggregate;
pub use filter::{Selection, SelectionFilter};
pub use resolver::{select_candidates, CandidateResolver};
pub use validation::{validate_upgrade, ValidationError};
