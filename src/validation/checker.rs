//! Conformance checker entry point.
//!
//! Walks resource profiles → scope profiles → profiles, checking each
//! profile against the shared dictionary, then checks the dictionary tables
//! themselves. All findings are collected; the only early return is for a
//! document with no resource profiles at all.

use tracing::debug;

use crate::profiles::{ProfilesData, ProfilesDictionary};

use super::config::CheckerConfig;
use super::dictionary::check_dictionary;
use super::profile::check_profile;
use super::result::{ValidationError, ValidationResult};

/// Checks decoded profiles documents against the dictionary conventions.
///
/// The checker holds only its configuration, so one instance can be shared
/// across threads and reused for any number of documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConformanceChecker {
    config: CheckerConfig,
}

impl ConformanceChecker {
    pub fn new(config: CheckerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Check a document and return every finding, in discovery order:
    /// profile findings first, then dictionary tables in declaration order.
    pub fn check(&self, data: &ProfilesData) -> ValidationResult {
        let mut result = ValidationResult::default();
        if data.resource_profiles.is_empty() {
            result.add_error(ValidationError::EmptyResourceProfiles);
            return result;
        }

        // A missing dictionary behaves like one with every table empty.
        let empty = ProfilesDictionary::default();
        let dict = data.dictionary.as_ref().unwrap_or(&empty);

        let mut profiles = 0usize;
        for (r, resource_profiles) in data.resource_profiles.iter().enumerate() {
            if resource_profiles.scope_profiles.is_empty() {
                result.add_error_at(
                    format!("resource_profiles[{r}]"),
                    ValidationError::MissingScopeProfiles,
                );
            }
            for (s, scope_profiles) in resource_profiles.scope_profiles.iter().enumerate() {
                if scope_profiles.profiles.is_empty() {
                    result.add_error_at(
                        format!("resource_profiles[{r}].scope_profiles[{s}]"),
                        ValidationError::MissingProfiles,
                    );
                }
                for (i, profile) in scope_profiles.profiles.iter().enumerate() {
                    result.merge_prefixed(
                        format!("profile {i}"),
                        check_profile(profile, dict, &self.config),
                    );
                    profiles += 1;
                }
            }
        }

        result.merge(check_dictionary(dict, &self.config));

        debug!(
            resource_profiles = data.resource_profiles.len(),
            profiles,
            strings = dict.string_table.len(),
            stacks = dict.stack_table.len(),
            locations = dict.location_table.len(),
            findings = result.findings.len(),
            "conformance check finished"
        );
        result
    }
}

/// Check `data` with `config`. Shorthand for `ConformanceChecker::new(*config).check(data)`.
pub fn check_conformance(data: &ProfilesData, config: &CheckerConfig) -> ValidationResult {
    ConformanceChecker::new(*config).check(data)
}
