//! Core domain entities.
//!
//! - [`ShortEntry`] - A code bound to a target URL with an expiry and click history
//! - [`ClickRecord`] - One observed redirect
//!
//! Entries are created from a [`NewEntry`] draft once the shortening service
//! has settled on a code.

pub mod click;
pub mod entry;

pub use click::{ClickRecord, UNKNOWN_REFERRER};
pub use entry::{NewEntry, ShortEntry};
