//! Shared filesystem utilities
//!
//! - `atomic_file`: whole-file replacement through a temporary file and rename

pub mod atomic_file;
