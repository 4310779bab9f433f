//! Integration test suite for lbrmeta
//!
//! End-to-end tests over real files in temporary directories. No test talks
//! to the network: library-level tests use the stub resolver from
//! `lbrmeta::test_utils`, and binary-level tests only use links that the
//! distributor filter skips.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: the `lbrmeta` binary, its exit codes and output
//! - **rewrite**: the load, update and write cycle on library files

mod common;

mod cli;
mod rewrite;
