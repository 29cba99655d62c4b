//! Common test utilities for profcheck integration tests.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use flate2::write::GzEncoder;
use flate2::Compression;
use prost::Message;
use profcheck::profiles::{
    Function, KeyValueAndUnit, Link, Location, Mapping, Profile, ProfilesData,
    ProfilesDictionary, ResourceProfiles, Sample, ScopeProfiles, Stack,
};

/// Run profcheck with the given arguments, returning the full Output.
pub fn run_profcheck(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_profcheck"))
        .args(args)
        .output()
        .expect("Failed to run profcheck")
}

/// A dictionary where every table holds only its zero value.
pub fn zero_dictionary() -> ProfilesDictionary {
    ProfilesDictionary {
        mapping_table: vec![Mapping::default()],
        location_table: vec![Location::default()],
        function_table: vec![Function::default()],
        link_table: vec![Link::default()],
        string_table: vec![String::new()],
        attribute_table: vec![KeyValueAndUnit::default()],
        stack_table: vec![Stack::default()],
    }
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

/// A single profile over `[100, 110)` whose one sample carries `timestamps`.
pub fn timestamp_document(timestamps: &[u64]) -> ProfilesData {
    document(
        zero_dictionary(),
        vec![Profile {
            time_unix_nano: 100,
            duration_nano: 10,
            samples: vec![Sample {
                timestamps_unix_nano: timestamps.to_vec(),
                ..Default::default()
            }],
            ..Default::default()
        }],
    )
}

/// Encode `data` into `dir/name`, gzip-compressing when the name ends in `.gz`.
pub fn write_profile(dir: &Path, name: &str, data: &ProfilesData) -> PathBuf {
    let path = dir.join(name);
    let bytes = data.encode_to_vec();
    let mut file = File::create(&path).expect("Failed to create profile file");
    if name.ends_with(".gz") {
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(&bytes).expect("Failed to compress profile");
        encoder.finish().expect("Failed to finish gzip stream");
    } else {
        file.write_all(&bytes).expect("Failed to write profile");
    }
    path
}
