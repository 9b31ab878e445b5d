//! Integration tests for the repix crates.
//!
//! This crate contains end-to-end tests that verify the interaction between
//! the buffer types and the resampling engine.
