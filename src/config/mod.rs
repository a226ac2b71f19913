//! Configuration module for pcc
//!
//! Resolves the working root and derives every store path from it. The
//! resolved `PccPaths` is passed explicitly to each operation.

pub mod paths;

pub use paths::PccPaths;
