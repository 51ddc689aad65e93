//! Entry store implementations.
//!
//! # Repositories
//!
//! - [`MemoryEntryRepository`] - Sharded in-memory store; contents do not survive restarts

pub mod memory_entry_repository;

pub use memory_entry_repository::MemoryEntryRepository;
