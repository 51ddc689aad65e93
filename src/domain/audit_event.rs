//! Structured events delivered to the remote audit log.

use serde::Serialize;

/// Which side of the system produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stack {
    Backend,
    Frontend,
}

/// Severity accepted by the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// Component that produced an event.
///
/// Some packages only exist on one stack; see [`Package::allowed_on`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Package {
    // backend
    Cache,
    Controller,
    CronJob,
    Db,
    Domain,
    Handler,
    Repository,
    Route,
    Service,
    // frontend
    Api,
    Component,
    Hook,
    Page,
    State,
    Style,
    // shared
    Auth,
    Config,
    Middleware,
    Utils,
}

impl Package {
    /// Returns true if the audit log accepts this package for `stack`.
    pub fn allowed_on(self, stack: Stack) -> bool {
        use Package::*;
        match self {
            Auth | Config | Middleware | Utils => true,
            Cache | Controller | CronJob | Db | Domain | Handler | Repository | Route
            | Service => stack == Stack::Backend,
            Api | Component | Hook | Page | State | Style => stack == Stack::Frontend,
        }
    }
}

/// Rejected event construction.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuditEventError {
    #[error("package {package:?} is not valid for stack {stack:?}")]
    PackageNotAllowed { stack: Stack, package: Package },
}

/// One audit log line, serialized as `{stack, level, package, message}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEvent {
    pub stack: Stack,
    pub level: Level,
    pub package: Package,
    pub message: String,
}

impl AuditEvent {
    /// Creates an event, checking the package against the stack.
    ///
    /// # Errors
    ///
    /// Returns [`AuditEventError::PackageNotAllowed`] for a frontend-only
    /// package on the backend stack and vice versa.
    pub fn new(
        stack: Stack,
        level: Level,
        package: Package,
        message: impl Into<String>,
    ) -> Result<Self, AuditEventError> {
        if !package.allowed_on(stack) {
            return Err(AuditEventError::PackageNotAllowed { stack, package });
        }

        Ok(Self {
            stack,
            level,
            package,
            message: message.into(),
        })
    }

    /// Creates a backend event. Frontend-only packages are remapped to
    /// [`Package::Utils`] so callers on the backend never fail.
    pub fn backend(level: Level, package: Package, message: impl Into<String>) -> Self {
        let package = if package.allowed_on(Stack::Backend) {
            package
        } else {
            Package::Utils
        };

        Self {
            stack: Stack::Backend,
            level,
            package,
            message: message.into(),
        }
    }
}
