//! Configuration sources layered over the merge defaults.

pub mod environment;
pub mod global_file;
