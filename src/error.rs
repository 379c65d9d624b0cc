use std::fmt;

/// Unified error type for the skip list engine.
///
/// Missing keys and empty containers are not errors; lookups report them
/// as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The allocator refused a node of the given height. No state was mutated.
    AllocationFailure { height: usize },
    /// Construction-time configuration was rejected.
    InvalidOptions(String),
    /// A consistency check found a broken structural invariant.
    Corruption(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AllocationFailure { height } => {
                write!(f, "Allocation failure: node of height {height}")
            }
            Error::InvalidOptions(msg) => write!(f, "Invalid options: {msg}"),
            Error::Corruption(msg) => write!(f, "Corruption: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// Result type alias used throughout the engine.
pub type Result<T> = std::result::Result<T, Error>;
