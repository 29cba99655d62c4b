//! Validation result types.
//!
//! This module defines the core types for conformance results:
//! - `ValidationResult` - ordered collection of findings
//! - `Finding` - one error together with the path where it was found
//! - `ValidationError` - error types
//!
//! Checks never stop at the first problem. Each check returns its own
//! `ValidationResult` and the caller folds it into its own with a path
//! prefix via [`ValidationResult::merge_prefixed`].

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

use crate::profiles::SampleShape;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// The document has no resource profiles at all.
    EmptyResourceProfiles,
    /// A resource profiles entry has no scope profiles.
    MissingScopeProfiles,
    /// A scope profiles entry has no profiles.
    MissingProfiles,
    /// A dictionary table has no entries, not even the zero value.
    EmptyTable,
    /// The string table has no entries.
    EmptyStringTable,
    /// Index 0 of a dictionary table is not the zero value.
    ZeroValue { expected: String, got: String },
    /// Index 0 of the string table is not "".
    NonEmptyFirstString { got: String },
    /// A reference points outside `[0, len)` of its table.
    IndexOutOfRange { index: i32, len: usize },
    /// A line, column or start line is negative.
    Negative { value: i64 },
    /// The same attribute key appears twice in one attribute index list.
    DuplicateKey { key: String, prev_pos: usize },
    /// The same string appears twice in the string table.
    DuplicateString {
        index: usize,
        orig_index: usize,
        value: String,
    },
    /// A sample timestamp falls outside `[start, end)` of its profile.
    TimestampOutOfRange {
        pos: usize,
        timestamp: u64,
        start: u64,
        end: u64,
    },
    /// A sample has neither values nor timestamps.
    MissingValuesAndTimestamps,
    /// A sample has values and timestamps of different lengths.
    LengthMismatch { values: usize, timestamps: usize },
    /// A sample's shape differs from the first sample of its profile.
    ShapeMismatch {
        shape: SampleShape,
        expected: SampleShape,
        first_sample: usize,
    },
    /// A fixed-width identifier has the wrong length.
    IdLength {
        field: &'static str,
        got: usize,
        want: usize,
    },
    /// A mapping's memory range is half set or inverted.
    MemoryRange { start: u64, limit: u64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyResourceProfiles => write!(f, "resource profiles are empty"),
            ValidationError::MissingScopeProfiles => {
                write!(f, "resource profiles has no scope profiles")
            }
            ValidationError::MissingProfiles => write!(f, "scope profiles has no profiles"),
            ValidationError::EmptyTable => {
                write!(f, "empty table, must have at least zero value entry")
            }
            ValidationError::EmptyStringTable => {
                write!(f, "empty string table, must have at least empty string")
            }
            ValidationError::ZeroValue { expected, got } => {
                write!(f, "must have zero value {expected} at index 0, got {got}")
            }
            ValidationError::NonEmptyFirstString { got } => {
                write!(f, "must have empty string at index 0, got {got:?}")
            }
            ValidationError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} is out of range [0..{len})")
            }
            ValidationError::Negative { value } => {
                write!(f, "{value} < 0, must be non-negative")
            }
            ValidationError::DuplicateKey { key, prev_pos } => {
                write!(
                    f,
                    "duplicate key {key:?}, previously seen at [{prev_pos}].key_strindex"
                )
            }
            ValidationError::DuplicateString {
                index,
                orig_index,
                value,
            } => {
                write!(
                    f,
                    "duplicate string at index {index}, orig index {orig_index}: {value:?}"
                )
            }
            ValidationError::TimestampOutOfRange {
                pos,
                timestamp,
                start,
                end,
            } => {
                write!(
                    f,
                    "timestamps_unix_nano[{pos}]={timestamp} is outside profile time range [{start}, {end})"
                )
            }
            ValidationError::MissingValuesAndTimestamps => {
                write!(
                    f,
                    "sample must have at least one values or timestamps_unix_nano entry"
                )
            }
            ValidationError::LengthMismatch { values, timestamps } => {
                write!(
                    f,
                    "values (len={values}) and timestamps_unix_nano (len={timestamps}) \
                     must contain the same number of elements"
                )
            }
            ValidationError::ShapeMismatch {
                shape,
                expected,
                first_sample,
            } => {
                write!(
                    f,
                    "sample shape ({shape}) does not match expected sample shape \
                     ({expected}) set by sample[{first_sample}]"
                )
            }
            ValidationError::IdLength { field, got, want } => {
                write!(f, "len({field}) == {got}, want {want}")
            }
            ValidationError::MemoryRange { start, limit } => {
                write!(
                    f,
                    "memory_start={start:016x}, memory_limit={limit:016x}: \
                     must be both zero or start < limit"
                )
            }
        }
    }
}

/// One error and the path (outermost segment first) where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub path: Vec<String>,
    pub error: ValidationError,
}

impl Finding {
    /// The path segments joined the way they are rendered, e.g. `profile 0: sample[1]`.
    pub fn path_string(&self) -> String {
        self.path.join(": ")
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.path {
            write!(f, "{segment}: ")?;
        }
        write!(f, "{}", self.error)
    }
}

impl Serialize for Finding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Finding", 3)?;
        s.serialize_field("path", &self.path_string())?;
        s.serialize_field("message", &self.error.to_string())?;
        s.serialize_field("error", &self.error)?;
        s.end()
    }
}

/// Result of checking a document: every finding, in the order discovered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub findings: Vec<Finding>,
}

impl ValidationResult {
    /// Returns true if there are any findings.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.findings.is_empty()
    }

    /// Returns true if the document is conformant (no findings).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.findings.is_empty()
    }

    /// Add an error found at the current level.
    pub fn add_error(&mut self, error: ValidationError) {
        self.findings.push(Finding {
            path: Vec::new(),
            error,
        });
    }

    /// Add an error found under a single path segment.
    pub fn add_error_at(&mut self, segment: impl Into<String>, error: ValidationError) {
        self.findings.push(Finding {
            path: vec![segment.into()],
            error,
        });
    }

    /// Append all findings of `other`, prefixing each with `segment`.
    pub fn merge_prefixed(&mut self, segment: impl Into<String>, other: ValidationResult) {
        let segment = segment.into();
        self.findings
            .extend(other.findings.into_iter().map(|mut finding| {
                finding.path.insert(0, segment.clone());
                finding
            }));
    }

    /// Append all findings of `other` unchanged.
    pub fn merge(&mut self, other: ValidationResult) {
        self.findings.extend(other.findings);
    }

    /// `Ok(())` when valid, otherwise the findings as one error value.
    pub fn into_result(self) -> Result<(), ValidationResult> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, finding) in self.findings.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{finding}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationResult {}
