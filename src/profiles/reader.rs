//! Loading profiles documents from disk.
//!
//! Decoding itself is `prost::Message::decode` on the derived message types
//! in [`models`](super::models); this module only deals with files.

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use prost::Message;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::models::ProfilesData;

const READ_BUFFER_SIZE: usize = 256 * 1024;

/// Open a serialized `ProfilesData` file for reading.
///
/// Profile files are either a bare protobuf message (`profile.pb`) or the
/// same message gzip-compressed (`profile.pb.gz`). Compression is chosen by
/// the `.gz` extension, not sniffed from the contents.
pub fn open_profile_reader(path: &Path) -> Result<Box<dyn Read + Send>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("gz") => Ok(Box::new(GzDecoder::new(reader))),
        _ => Ok(Box::new(reader)),
    }
}

/// Read and decode a whole profiles file.
pub fn read_profiles_file(path: &Path) -> Result<ProfilesData> {
    let mut reader = open_profile_reader(path)?;
    let mut contents = Vec::new();
    reader
        .read_to_end(&mut contents)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    ProfilesData::decode(contents.as_slice())
        .with_context(|| format!("Failed to read file {} as ProfilesData", path.display()))
}
