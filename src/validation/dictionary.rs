//! Dictionary table checks.
//!
//! Every table except the string table must hold the zero value at index 0,
//! which is what makes index 0 usable as "unset" everywhere else. On top of
//! that each table checks its own references into the other tables.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::profiles::{
    Function, KeyValueAndUnit, Line, Link, Location, Mapping, ProfilesDictionary, Stack,
    SPAN_ID_LEN, TRACE_ID_LEN,
};

use super::config::CheckerConfig;
use super::index::{check_index, check_indices, check_non_negative, check_zero_value};
use super::result::{ValidationError, ValidationResult};

/// Check all seven dictionary tables, in declaration order.
pub fn check_dictionary(dict: &ProfilesDictionary, config: &CheckerConfig) -> ValidationResult {
    let mut result = ValidationResult::default();
    result.merge_prefixed("mapping_table", check_mapping_table(dict));
    result.merge_prefixed("location_table", check_location_table(dict));
    result.merge_prefixed("function_table", check_function_table(dict));
    result.merge_prefixed("link_table", check_link_table(&dict.link_table));
    result.merge_prefixed(
        "string_table",
        check_string_table(&dict.string_table, config.check_dictionary_duplicates),
    );
    result.merge_prefixed(
        "attribute_table",
        check_attribute_table(&dict.attribute_table, dict.string_table.len()),
    );
    result.merge_prefixed(
        "stack_table",
        check_stack_table(&dict.stack_table, dict.location_table.len()),
    );
    result
}

/// Check an attribute index list attached to a profile, sample, location or
/// mapping: every index resolves, every key resolves, and no key repeats.
pub fn check_attribute_indices(
    attr_indices: &[i32],
    dict: &ProfilesDictionary,
) -> ValidationResult {
    let mut result = ValidationResult::default();
    let mut keys: HashMap<&str, usize> = HashMap::new();
    for (pos, &attr_idx) in attr_indices.iter().enumerate() {
        if let Err(e) = check_index(dict.attribute_table.len(), attr_idx) {
            result.add_error_at(format!("[{pos}]"), e);
            continue;
        }
        let attr = &dict.attribute_table[attr_idx as usize];
        if let Err(e) = check_index(dict.string_table.len(), attr.key_strindex) {
            result.add_error_at(format!("[{pos}].key_strindex"), e);
            continue;
        }
        let key = dict.string_table[attr.key_strindex as usize].as_str();
        match keys.entry(key) {
            Entry::Occupied(prev) => result.add_error_at(
                format!("[{pos}].key_strindex"),
                ValidationError::DuplicateKey {
                    key: key.to_string(),
                    prev_pos: *prev.get(),
                },
            ),
            Entry::Vacant(slot) => {
                slot.insert(pos);
            }
        }
    }
    result
}

fn check_mapping_table(dict: &ProfilesDictionary) -> ValidationResult {
    let mut result = ValidationResult::default();
    if let Err(e) = check_zero_value(&dict.mapping_table) {
        result.add_error(e);
        return result;
    }
    for (idx, mapping) in dict.mapping_table.iter().enumerate() {
        result.merge_prefixed(format!("[{idx}]"), check_mapping(mapping, dict));
    }
    result
}

fn check_mapping(mapping: &Mapping, dict: &ProfilesDictionary) -> ValidationResult {
    let mut result = ValidationResult::default();
    if let Err(e) = check_index(dict.string_table.len(), mapping.filename_strindex) {
        result.add_error_at("filename_strindex", e);
    }
    result.merge_prefixed(
        "attribute_indices",
        check_attribute_indices(&mapping.attribute_indices, dict),
    );
    let unset = mapping.memory_start == 0 && mapping.memory_limit == 0;
    if !unset && mapping.memory_start >= mapping.memory_limit {
        result.add_error(ValidationError::MemoryRange {
            start: mapping.memory_start,
            limit: mapping.memory_limit,
        });
    }
    result
}

fn check_location_table(dict: &ProfilesDictionary) -> ValidationResult {
    let mut result = ValidationResult::default();
    if let Err(e) = check_zero_value(&dict.location_table) {
        result.add_error(e);
        return result;
    }
    for (idx, location) in dict.location_table.iter().enumerate() {
        result.merge_prefixed(format!("[{idx}]"), check_location(location, dict));
    }
    result
}

fn check_location(location: &Location, dict: &ProfilesDictionary) -> ValidationResult {
    let mut result = ValidationResult::default();
    if let Err(e) = check_index(dict.mapping_table.len(), location.mapping_index) {
        result.add_error_at("mapping_index", e);
    }
    result.merge_prefixed(
        "attribute_indices",
        check_attribute_indices(&location.attribute_indices, dict),
    );
    for (line_idx, line) in location.lines.iter().enumerate() {
        result.merge_prefixed(format!("line[{line_idx}]"), check_line(line, dict));
    }
    result
}

fn check_line(line: &Line, dict: &ProfilesDictionary) -> ValidationResult {
    let mut result = ValidationResult::default();
    if let Err(e) = check_index(dict.function_table.len(), line.function_index) {
        result.add_error_at("function_index", e);
    }
    if let Err(e) = check_non_negative(line.line) {
        result.add_error_at("line", e);
    }
    if let Err(e) = check_non_negative(line.column) {
        result.add_error_at("column", e);
    }
    result
}

fn check_function_table(dict: &ProfilesDictionary) -> ValidationResult {
    let mut result = ValidationResult::default();
    if let Err(e) = check_zero_value(&dict.function_table) {
        result.add_error(e);
        return result;
    }
    let strings = dict.string_table.len();
    for (idx, function) in dict.function_table.iter().enumerate() {
        let Function {
            name_strindex,
            system_name_strindex,
            filename_strindex,
            start_line,
        } = *function;
        let mut entry = ValidationResult::default();
        if let Err(e) = check_index(strings, name_strindex) {
            entry.add_error_at("name_strindex", e);
        }
        if let Err(e) = check_index(strings, system_name_strindex) {
            entry.add_error_at("system_name_strindex", e);
        }
        if let Err(e) = check_index(strings, filename_strindex) {
            entry.add_error_at("filename_strindex", e);
        }
        if let Err(e) = check_non_negative(start_line) {
            entry.add_error_at("start_line", e);
        }
        result.merge_prefixed(format!("[{idx}]"), entry);
    }
    result
}

fn check_link_table(links: &[Link]) -> ValidationResult {
    let mut result = ValidationResult::default();
    if let Err(e) = check_zero_value(links) {
        result.add_error(e);
        return result;
    }
    // Index 0 is the zero value with empty ids.
    for (idx, link) in links.iter().enumerate().skip(1) {
        if link.trace_id.len() != TRACE_ID_LEN {
            result.add_error_at(
                format!("[{idx}]"),
                ValidationError::IdLength {
                    field: "trace_id",
                    got: link.trace_id.len(),
                    want: TRACE_ID_LEN,
                },
            );
        }
        if link.span_id.len() != SPAN_ID_LEN {
            result.add_error_at(
                format!("[{idx}]"),
                ValidationError::IdLength {
                    field: "span_id",
                    got: link.span_id.len(),
                    want: SPAN_ID_LEN,
                },
            );
        }
    }
    result
}

fn check_string_table(strings: &[String], check_duplicates: bool) -> ValidationResult {
    let mut result = ValidationResult::default();
    let Some(first) = strings.first() else {
        result.add_error(ValidationError::EmptyStringTable);
        return result;
    };
    if !first.is_empty() {
        result.add_error(ValidationError::NonEmptyFirstString { got: first.clone() });
        return result;
    }
    if !check_duplicates {
        return result;
    }
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(strings.len());
    for (idx, s) in strings.iter().enumerate() {
        match seen.entry(s.as_str()) {
            Entry::Occupied(orig) => result.add_error(ValidationError::DuplicateString {
                index: idx,
                orig_index: *orig.get(),
                value: s.clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(idx);
            }
        }
    }
    result
}

fn check_attribute_table(attrs: &[KeyValueAndUnit], strings: usize) -> ValidationResult {
    let mut result = ValidationResult::default();
    if let Err(e) = check_zero_value(attrs) {
        result.add_error(e);
        return result;
    }
    for (idx, attr) in attrs.iter().enumerate() {
        if let Err(e) = check_index(strings, attr.key_strindex) {
            result.add_error_at(format!("[{idx}].key_strindex"), e);
        }
        if let Err(e) = check_index(strings, attr.unit_strindex) {
            result.add_error_at(format!("[{idx}].unit_strindex"), e);
        }
    }
    result
}

fn check_stack_table(stacks: &[Stack], locations: usize) -> ValidationResult {
    let mut result = ValidationResult::default();
    if let Err(e) = check_zero_value(stacks) {
        result.add_error(e);
        return result;
    }
    for (idx, stack) in stacks.iter().enumerate() {
        result.merge_prefixed(
            format!("[{idx}].location_indices"),
            check_indices(locations, &stack.location_indices),
        );
    }
    result
}
