//! # Configuration Module
//!
//! This module centralizes the slot layout, null sentinel, growth and budget
//! constants. Interdependent values are co-located and checked with
//! compile-time assertions so that the inline-text length bits and the
//! alignment of out-of-line pointers can never drift apart.
//!
//! ## Module Organization
//!
//! - [`constants`]: All numeric configuration values with dependency documentation

pub mod constants;
pub use constants::*;
