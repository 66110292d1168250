//! # Repository Module
//!
//! SQLite-backed implementations of the `sales-core` storage ports.
//!
//! - [`sale`] - Sales and their ordered line items

pub mod sale;
