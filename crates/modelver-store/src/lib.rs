#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod document;
mod json_store;

pub use document::{RegistryDocument, StoredEntry};
pub use json_store::JsonRegistryStore;
