//! Crate-internal test suites: property tests and provider unit tests.

mod property;
mod unit;
