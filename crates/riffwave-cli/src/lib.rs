//! riffwave CLI library.
//!
//! This crate provides the command implementations behind the `riffwave` binary:
//! configuration loading, logging setup and the `inspect` command.

pub mod commands;
pub mod config;
pub mod logging;
