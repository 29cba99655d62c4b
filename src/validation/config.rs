//! Checker configuration.

/// Configuration for conformance checks.
///
/// Passed explicitly to every check; there is no process-wide state, so
/// checks with different settings can run side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckerConfig {
    /// Report string table entries that repeat an earlier entry.
    /// Producers are allowed to skip deduplication, so this is opt-in.
    pub check_dictionary_duplicates: bool,

    /// Require every sample of a profile to carry the same combination of
    /// values and timestamps.
    pub check_sample_timestamp_shape: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            check_dictionary_duplicates: false,
            check_sample_timestamp_shape: true,
        }
    }
}
