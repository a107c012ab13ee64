//! Clementine Core - Shared types library.
//!
//! This crate provides common types used across all Clementine Market
//! components:
//! - `storefront` - Public catalog and cart API
//! - `cli` - Command-line tools for seeding and management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, slugs, emails, and
//!   money rounding

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
