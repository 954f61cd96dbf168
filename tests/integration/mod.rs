//! Integration tests for the hub-state CLI

mod commands;
mod reqwest_transport;

pub use test_utils::*;
