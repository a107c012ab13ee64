//! Core types for Clementine Market.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod money;
pub mod slug;

pub use email::{Email, EmailError};
pub use id::*;
pub use money::round_to_cents;
pub use slug::{Slug, SlugError};
