//! Infrastructure layer for storage and external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`audit`] - Delivery of audit events to the remote log (HTTP and no-op sinks)
//! - [`persistence`] - Entry store implementations

pub mod audit;
pub mod persistence;
