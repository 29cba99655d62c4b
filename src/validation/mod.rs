//! Conformance checks for decoded profiles documents.
//!
//! A document is conformant when every dictionary table follows the
//! index-0 conventions, every cross-table reference is in range, no
//! attribute list repeats a key, and every sample fits its profile's time
//! window and shape rules.
//!
//! # Architecture
//!
//! Each check returns its own [`ValidationResult`] and never aborts on the
//! first problem. Callers fold child results into their own with a path
//! prefix, so a finding deep in the tree renders as
//! `profile 0: sample[1]: stack_index: index 5 is out of range [0..3)`.
//!
//! # Entry Points
//!
//! - [`ConformanceChecker::check`] - Check a document with a given configuration
//! - [`check_conformance`] - Same, as a free function

mod checker;
mod config;
pub mod dictionary;
mod index;
pub mod profile;
mod result;
#[cfg(test)]
mod test_utils;

// Re-export configuration
pub use config::CheckerConfig;

// Re-export result types
pub use result::{Finding, ValidationError, ValidationResult};

// Re-export index primitives
pub use index::{check_index, check_indices, check_non_negative, check_zero_value};

// Re-export entry points
pub use checker::{check_conformance, ConformanceChecker};
