//! Common test utilities and helpers
//!
//! Shared by the integration tests: a command runner that records every
//! invocation instead of spawning it, config fixtures, and a local git
//! remote for end-to-end runs.

#![allow(dead_code)]

pub mod fixtures;
pub mod recording_runner;
