//! Shared test utilities for validation tests.
//!
//! This module provides common document builders used across validation test modules.

use crate::profiles::{
    Function, KeyValueAndUnit, Link, Location, Mapping, Profile, ProfilesData,
    ProfilesDictionary, ResourceProfiles, ScopeProfiles, Stack,
};

/// A dictionary where every table holds only its zero value.
pub fn zero_dictionary() -> ProfilesDictionary {
    ProfilesDictionary {
        mapping_table: vec![Mapping::default()],
        location_table: vec![Location::default()],
        function_table: vec![Function::default()],
        link_table: vec![Link::default()],
        string_table: strings(&[""]),
        attribute_table: vec![KeyValueAndUnit::default()],
        stack_table: vec![Stack::default()],
    }
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// A document with one resource, one scope and the given profiles.
pub fn document(dictionary: ProfilesDictionary, profiles: Vec<Profile>) -> ProfilesData {
    ProfilesData {
        resource_profiles: vec![ResourceProfiles {
            scope_profiles: vec![ScopeProfiles {
                profiles,
                ..Default::default()
            }],
            ..Default::default()
        }],
        dictionary: Some(dictionary),
    }
}
