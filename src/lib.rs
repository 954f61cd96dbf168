//! Hub State: remote stack state viewer and manager
//!
//! Lists, inspects and removes the deployment state of stacks recorded by a
//! per-project State API. The CLI layer only parses, dispatches and renders; the
//! client, response interpretation and filter compilation are usable on their own.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod response;
pub mod types;
