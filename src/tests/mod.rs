//! Internal test modules - whitebox tests with crate access
//!
//! This module contains tests that require internal access to crate types.
//! Tests here can use test-only constructors and engine test doubles for
//! validation of cross-module behavior.

mod scroll_properties;
