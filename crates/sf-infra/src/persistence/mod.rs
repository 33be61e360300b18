//! Session persistence adapters.

mod json_file;

pub use json_file::JsonSessionFile;
