//! riffwave Integration Test Infrastructure
//!
//! Shared fixtures for the integration tests in `tests/`:
//!
//! - `parse_scenarios`: field-by-field validation scenarios against the public API
//! - `proptest_parse`: never-panic and corruption properties over arbitrary buffers
//! - `cli_inspect`: the `inspect` command over a directory of fixture files
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p riffwave-tests
//! ```

pub mod fixtures;
