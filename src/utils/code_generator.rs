//! Short code generation.
//!
//! Codes are lowercase hexadecimal strings drawn from the operating system's
//! CSPRNG. Uniqueness is not guaranteed here; the shortening service resolves
//! collisions against the store.

use crate::error::AppError;
use serde_json::json;

/// Default number of hex characters in a generated code.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Codes that would be shadowed by service routes.
pub const RESERVED_CODES: &[&str] = &["shorturls", "health"];

/// Returns true if `code` collides with a route path.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Source of candidate short codes.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Produces one candidate code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the randomness source fails.
    fn generate(&self) -> Result<String, AppError>;
}

/// Generates fixed-length hexadecimal codes from `getrandom`.
#[derive(Debug, Clone)]
pub struct HexCodeGenerator {
    length: usize,
}

impl HexCodeGenerator {
    /// Creates a generator producing codes of `length` hex characters.
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for HexCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl CodeGenerator for HexCodeGenerator {
    fn generate(&self) -> Result<String, AppError> {
        let mut buffer = vec![0u8; self.length.div_ceil(2)];

        getrandom::fill(&mut buffer).map_err(|e| {
            AppError::internal(
                "Failed to generate random bytes",
                json!({ "reason": e.to_string() }),
            )
        })?;

        let mut code = hex::encode(buffer);
        code.truncate(self.length);
        Ok(code)
    }
}
