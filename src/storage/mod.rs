//! Storage layer for pcc
//!
//! Provides JSON file storage with atomic writes and forced directory
//! removal.

pub mod file_io;

pub use file_io::{
    read_json_required, remove_dir_forced, to_json_pretty, write_json_atomic,
    write_json_atomic_via,
};
