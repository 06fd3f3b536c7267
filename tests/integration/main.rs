//! Integration tests for burp-history.

mod cli_test;
mod fixture_test;
mod helpers;
