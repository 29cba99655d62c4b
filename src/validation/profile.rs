//! Profile and sample checks.
//!
//! A profile is checked against the shared dictionary: its own attribute
//! list, its value types, each sample, and its comments. Samples must fall
//! inside the profile's half-open time window.

use crate::profiles::{Profile, ProfilesDictionary, Sample, SampleShape, ValueType};

use super::config::CheckerConfig;
use super::dictionary::check_attribute_indices;
use super::index::check_index;
use super::result::{ValidationError, ValidationResult};

pub fn check_profile(
    profile: &Profile,
    dict: &ProfilesDictionary,
    config: &CheckerConfig,
) -> ValidationResult {
    let mut result = ValidationResult::default();
    result.merge_prefixed(
        "attribute_indices",
        check_attribute_indices(&profile.attribute_indices, dict),
    );
    result.merge_prefixed("sample_type", check_value_type(profile.sample_type, dict));
    result.merge_prefixed("period_type", check_value_type(profile.period_type, dict));

    let (start, end) = profile.time_range();
    for (i, sample) in profile.samples.iter().enumerate() {
        result.merge_prefixed(format!("sample[{i}]"), check_sample(sample, start, end, dict));
        // TODO: report duplicate samples keyed on {stack_index, sorted attribute_indices, link_index}.
    }

    for (i, &str_idx) in profile.comment_strindices.iter().enumerate() {
        if let Err(e) = check_index(dict.string_table.len(), str_idx) {
            result.add_error_at(format!("comment_strindices[{i}]"), e);
        }
    }

    if config.check_sample_timestamp_shape {
        result.merge(check_sample_shapes(&profile.samples));
    }
    result
}

/// An unset value type is the zero value, which points at the empty string.
fn check_value_type(value_type: Option<ValueType>, dict: &ProfilesDictionary) -> ValidationResult {
    let value_type = value_type.unwrap_or_default();
    let mut result = ValidationResult::default();
    if let Err(e) = check_index(dict.string_table.len(), value_type.unit_strindex) {
        result.add_error_at("unit_strindex", e);
    }
    if let Err(e) = check_index(dict.string_table.len(), value_type.type_strindex) {
        result.add_error_at("type_strindex", e);
    }
    result
}

/// Check one sample against the profile window `[start, end)`.
pub fn check_sample(
    sample: &Sample,
    start: u64,
    end: u64,
    dict: &ProfilesDictionary,
) -> ValidationResult {
    let mut result = ValidationResult::default();
    if let Err(e) = check_index(dict.stack_table.len(), sample.stack_index) {
        result.add_error_at("stack_index", e);
    }
    result.merge_prefixed(
        "attribute_indices",
        check_attribute_indices(&sample.attribute_indices, dict),
    );
    if let Err(e) = check_index(dict.link_table.len(), sample.link_index) {
        result.add_error_at("link_index", e);
    }

    for (pos, &timestamp) in sample.timestamps_unix_nano.iter().enumerate() {
        if timestamp < start || timestamp >= end {
            result.add_error(ValidationError::TimestampOutOfRange {
                pos,
                timestamp,
                start,
                end,
            });
        }
    }

    let values = sample.values.len();
    let timestamps = sample.timestamps_unix_nano.len();
    if values == 0 && timestamps == 0 {
        result.add_error(ValidationError::MissingValuesAndTimestamps);
    } else if values > 0 && timestamps > 0 && values != timestamps {
        result.add_error(ValidationError::LengthMismatch { values, timestamps });
    }
    result
}

/// The first sample that has a shape sets the expected shape for the rest.
/// Samples without values or timestamps are already reported by
/// [`check_sample`] and are skipped here.
fn check_sample_shapes(samples: &[Sample]) -> ValidationResult {
    let mut result = ValidationResult::default();
    let mut expected: Option<(usize, SampleShape)> = None;
    for (i, sample) in samples.iter().enumerate() {
        let Some(shape) = sample.shape() else {
            continue;
        };
        match expected {
            None => expected = Some((i, shape)),
            Some((first_sample, expected)) if expected != shape => {
                result.add_error_at(
                    format!("sample[{i}]"),
                    ValidationError::ShapeMismatch {
                        shape,
                        expected,
                        first_sample,
                    },
                );
            }
            Some(_) => {}
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::{AnyValue, KeyValueAndUnit, Stack};
    use crate::validation::test_utils::{strings, zero_dictionary};

    fn windowed_profile(samples: Vec<Sample>) -> Profile {
        Profile {
            time_unix_nano: 100,
            duration_nano: 10,
            samples,
            ..Default::default()
        }
    }

    fn timestamps(ts: &[u64]) -> Sample {
        Sample {
            timestamps_unix_nano: ts.to_vec(),
            ..Default::default()
        }
    }

    fn values(v: &[i64]) -> Sample {
        Sample {
            values: v.to_vec(),
            ..Default::default()
        }
    }

    fn check(profile: &Profile, shapes: bool) -> ValidationResult {
        let config = CheckerConfig {
            check_sample_timestamp_shape: shapes,
            ..CheckerConfig::default()
        };
        check_profile(profile, &zero_dictionary(), &config)
    }

    #[test]
    fn test_empty_profile_is_valid() {
        assert!(check(&Profile::default(), true).is_valid());
    }

    #[test]
    fn test_timestamp_window_is_half_open() {
        let dict = zero_dictionary();
        assert!(check_sample(&timestamps(&[100]), 100, 110, &dict).is_valid());
        assert!(check_sample(&timestamps(&[109]), 100, 110, &dict).is_valid());

        for ts in [99, 110, 111] {
            let result = check_sample(&timestamps(&[ts]), 100, 110, &dict);
            assert_eq!(
                result.to_string(),
                format!("timestamps_unix_nano[0]={ts} is outside profile time range [100, 110)")
            );
        }
    }

    #[test]
    fn test_timestamp_findings_carry_sample_path() {
        let profile = windowed_profile(vec![timestamps(&[100]), timestamps(&[105, 99])]);
        let result = check(&profile, true);
        assert_eq!(
            result.to_string(),
            "sample[1]: timestamps_unix_nano[1]=99 is outside profile time range [100, 110)"
        );
    }

    #[test]
    fn test_sample_needs_values_or_timestamps() {
        let profile = Profile {
            samples: vec![Sample::default()],
            ..Default::default()
        };
        let result = check(&profile, true);
        assert_eq!(
            result.to_string(),
            "sample[0]: sample must have at least one values or timestamps_unix_nano entry"
        );
    }

    #[test]
    fn test_values_and_timestamps_length_mismatch() {
        let sample = Sample {
            values: vec![1],
            timestamps_unix_nano: vec![100, 101],
            ..Default::default()
        };
        let result = check(&windowed_profile(vec![sample]), true);
        assert_eq!(result.findings.len(), 1);
        assert_eq!(
            result.findings[0].error,
            ValidationError::LengthMismatch {
                values: 1,
                timestamps: 2
            }
        );
        assert!(result.to_string().contains(
            "values (len=1) and timestamps_unix_nano (len=2) must contain the same number of elements"
        ));
    }

    #[test]
    fn test_consistent_shapes_are_valid() {
        let both = |ts| Sample {
            values: vec![1],
            timestamps_unix_nano: vec![ts],
            ..Default::default()
        };
        assert!(check(&windowed_profile(vec![values(&[1]), values(&[2])]), true).is_valid());
        assert!(check(
            &windowed_profile(vec![timestamps(&[100]), timestamps(&[101])]),
            true
        )
        .is_valid());
        assert!(check(&windowed_profile(vec![both(100), both(101)]), true).is_valid());
    }

    #[test]
    fn test_mixed_shapes() {
        let profile = windowed_profile(vec![values(&[1]), timestamps(&[100]), values(&[3])]);

        let result = check(&profile, true);
        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].path_string(), "sample[1]");
        assert!(result
            .to_string()
            .contains("does not match expected sample shape"));

        assert!(check(&profile, false).is_valid());
    }

    #[test]
    fn test_shapeless_samples_do_not_set_expected_shape() {
        let profile = windowed_profile(vec![Sample::default(), values(&[1]), values(&[2])]);
        let result = check(&profile, true);
        assert_eq!(result.findings.len(), 1);
        assert_eq!(
            result.findings[0].error,
            ValidationError::MissingValuesAndTimestamps
        );
    }

    #[test]
    fn test_sample_references() {
        let sample = Sample {
            stack_index: 5,
            link_index: 1,
            attribute_indices: vec![2],
            values: vec![1],
            ..Default::default()
        };
        let mut dict = zero_dictionary();
        dict.stack_table.extend([Stack::default(), Stack::default()]);
        let result = check_sample(&sample, 0, 0, &dict);
        assert_eq!(
            result.to_string(),
            "stack_index: index 5 is out of range [0..3)\n\
             attribute_indices: [0]: index 2 is out of range [0..1)\n\
             link_index: index 1 is out of range [0..1)"
        );
    }

    #[test]
    fn test_profile_level_references() {
        let mut dict = zero_dictionary();
        dict.string_table = strings(&["", "k", "cpu", "nanoseconds"]);
        dict.attribute_table.extend([
            KeyValueAndUnit {
                key_strindex: 1,
                value: Some(AnyValue::string("a")),
                unit_strindex: 0,
            },
            KeyValueAndUnit {
                key_strindex: 1,
                value: Some(AnyValue::string("b")),
                unit_strindex: 0,
            },
        ]);
        let profile = Profile {
            attribute_indices: vec![1, 2],
            sample_type: Some(ValueType {
                type_strindex: 2,
                unit_strindex: 3,
            }),
            period_type: Some(ValueType {
                type_strindex: 4,
                unit_strindex: 3,
            }),
            comment_strindices: vec![1, 8],
            ..Default::default()
        };
        let result = check_profile(&profile, &dict, &CheckerConfig::default());
        let paths: Vec<String> = result.findings.iter().map(|f| f.path_string()).collect();
        assert_eq!(
            paths,
            vec![
                "attribute_indices: [1].key_strindex",
                "period_type: type_strindex",
                "comment_strindices[1]",
            ]
        );
    }

    #[test]
    fn test_sample_duplicate_attribute_key() {
        let mut dict = zero_dictionary();
        dict.string_table = strings(&["", "thread.name"]);
        dict.attribute_table.extend([
            KeyValueAndUnit {
                key_strindex: 1,
                value: Some(AnyValue::string("main")),
                unit_strindex: 0,
            },
            KeyValueAndUnit {
                key_strindex: 1,
                value: Some(AnyValue::string("worker")),
                unit_strindex: 0,
            },
        ]);
        let profile = Profile {
            samples: vec![Sample {
                attribute_indices: vec![1, 2],
                values: vec![1],
                ..Default::default()
            }],
            ..Default::default()
        };
        let result = check_profile(&profile, &dict, &CheckerConfig::default());
        assert_eq!(result.findings.len(), 1);
        assert_eq!(
            result.findings[0].path_string(),
            "sample[0]: attribute_indices: [1].key_strindex"
        );
        assert_eq!(
            result.to_string(),
            "sample[0]: attribute_indices: [1].key_strindex: \
             duplicate key \"thread.name\", previously seen at [0].key_strindex"
        );
    }
}
