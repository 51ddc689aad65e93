//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Field names follow the camelCase wire format.

pub mod health;
pub mod shorten;
pub mod stats;
