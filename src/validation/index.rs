//! Index and value primitives shared by every table and profile check.

use std::fmt::Debug;

use super::result::{ValidationError, ValidationResult};

/// Check that `idx` addresses an element of a table with `len` entries.
pub fn check_index(len: usize, idx: i32) -> Result<(), ValidationError> {
    match usize::try_from(idx) {
        Ok(i) if i < len => Ok(()),
        _ => Err(ValidationError::IndexOutOfRange { index: idx, len }),
    }
}

/// Check every index of a list, reporting each bad one under `[pos]`.
pub fn check_indices(len: usize, indices: &[i32]) -> ValidationResult {
    let mut result = ValidationResult::default();
    for (pos, &idx) in indices.iter().enumerate() {
        if let Err(e) = check_index(len, idx) {
            result.add_error_at(format!("[{pos}]"), e);
        }
    }
    result
}

pub fn check_non_negative(value: i64) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError::Negative { value });
    }
    Ok(())
}

/// Check dictionary conventions for a non-string table: it is not empty and
/// holds the zero value at index 0.
pub fn check_zero_value<T: Default + PartialEq + Debug>(
    table: &[T],
) -> Result<(), ValidationError> {
    let Some(first) = table.first() else {
        return Err(ValidationError::EmptyTable);
    };
    let zero = T::default();
    if *first != zero {
        return Err(ValidationError::ZeroValue {
            expected: format!("{zero:?}"),
            got: format!("{first:?}"),
        });
    }
    Ok(())
}
