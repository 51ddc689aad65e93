//! Helpers shared by the service and HTTP layers.
//!
//! - [`code_generator`] - Short code generation and reserved codes
//! - [`client_origin`] - Origin and referrer extraction from HTTP requests

pub mod client_origin;
pub mod code_generator;
