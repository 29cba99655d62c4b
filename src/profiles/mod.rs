//! Profiles document model and file loading.
//!
//! # Module Organization
//!
//! - [`models`]: Document and dictionary tables as prost messages
//! - [`reader`]: Loading `.pb` / `.pb.gz` files into a [`ProfilesData`]

pub mod models;
pub mod reader;

pub use models::*;
pub use reader::{open_profile_reader, read_profiles_file};
