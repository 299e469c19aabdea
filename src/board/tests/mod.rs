//! Unit tests for the board bounded context.

mod domain_tests;
mod support;
