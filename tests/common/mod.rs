//! Shared fixtures for the integration suites.

// Each test binary compiles this module separately and exercises a
// different subset of it.
#![allow(dead_code)]

pub mod mocks;
