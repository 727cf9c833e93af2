//! Unit tests - public API behaviour without a database
//!
//! These tests feed driver-shaped rows straight into the library.

mod agtype_decoding_tests;
mod column_inference_tests;
mod graph_extraction_tests;
