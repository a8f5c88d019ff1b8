//! Test Suite
//!
//! Crate-level tests that need fixture datasets on disk. Pure unit tests live
//! next to the code they cover.

mod database;
