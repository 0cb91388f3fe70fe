#![doc = include_str!("README.md")]

pub mod record_display;
pub mod tables;

// Re-export commonly used items
pub use record_display::{display_record, record_lines};
pub use tables::{format_optional, format_timestamp, print_separator, truncate_string};
