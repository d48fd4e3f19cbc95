//! Error types for the Galaxy3D spatial index
//!
//! The index is purely in-memory and geometric, so the taxonomy is narrow:
//! rejected insertions and invalid configuration. Removal of an untracked
//! element is reported through a `bool`, not through this type.

use std::fmt;

/// Result type for Galaxy3D spatial operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D spatial errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Element AABB is not strictly inside the configured world extent
    OutsideWorldBounds(String),

    /// Element AABB is empty or has non-finite corners
    InvalidBounds(String),

    /// Element is already tracked by the index
    DuplicateElement(String),

    /// Octree configuration rejected by validation
    InvalidConfig(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutsideWorldBounds(msg) => write!(f, "Outside world bounds: {}", msg),
            Error::InvalidBounds(msg) => write!(f, "Invalid bounds: {}", msg),
            Error::DuplicateElement(msg) => write!(f, "Duplicate element: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Build an [`Error`] of the given variant and log it at ERROR severity.
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("galaxy3d::Octree", InvalidBounds, "AABB {:?} is empty", aabb);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $kind:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::galaxy3d::Error::$kind(message)
    }};
}

/// Log an error and return it from the enclosing function.
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $kind:ident, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $kind, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
