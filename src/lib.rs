//! profcheck library - conformance checking for OTLP profiles documents.
//!
//! A profiles document stores its shared data once, in the dictionary
//! tables, and refers to it everywhere else by integer index. This library
//! decodes such documents and checks that those references and tables are
//! well formed.
//!
//! # Modules
//!
//! - [`profiles`] - Document model (prost messages) and file loading
//! - [`validation`] - The conformance checker
//!
//! # Example
//!
//! ```no_run
//! use profcheck::{read_profiles_file, CheckerConfig, ConformanceChecker};
//! use std::path::Path;
//!
//! let data = read_profiles_file(Path::new("./profile.pb")).expect("Failed to decode profile");
//! let result = ConformanceChecker::new(CheckerConfig::default()).check(&data);
//! for finding in &result.findings {
//!     eprintln!("Error: {}", finding);
//! }
//! ```

pub mod profiles;
pub mod validation;

// Re-export for convenience
pub use profiles::{read_profiles_file, ProfilesData};
pub use validation::{
    check_conformance, CheckerConfig, ConformanceChecker, Finding, ValidationError,
    ValidationResult,
};
