//! Error types for set construction and set-algebra operations.
//!
//! Every fallible operation in this crate reports failure synchronously
//! through [`SetError`]. The library never panics on caller input and never
//! terminates the process; recovering (or not) is the caller's decision.

/// Represents the failure categories of set operations.
///
/// The taxonomy is deliberately small: each variant names the one condition
/// a caller can actually act on. Multi-step operations (union, intersection,
/// difference, duplication) guarantee that on any error the partially built
/// output has already been torn down, so observing a `SetError` never means
/// a half-populated result is still alive somewhere.
///
/// # Examples
///
/// ```rust
/// use chainset::SetError;
///
/// let error = SetError::NotFound;
/// assert_eq!(format!("{}", error), "no matching element in the set");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetError {
    /// A required input was absent: the operand slice of an algebra
    /// operation was empty.
    InvalidArgument,
    /// An explicit removal referenced an element with no matching member.
    NotFound,
    /// The configured copier reported failure while producing an
    /// independently-owned copy of an element.
    AllocationFailure,
    /// An operation that must copy elements was invoked on a set whose
    /// behavior bundle has no copier configured.
    CopyUnavailable,
    /// An operation precondition did not hold: fewer operands than the
    /// operation's minimum, or traversal of an empty set.
    PreconditionViolated,
}

impl std::fmt::Display for SetError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Self::InvalidArgument => "a required argument was absent",
            Self::NotFound => "no matching element in the set",
            Self::AllocationFailure => "an element copy could not be produced",
            Self::CopyUnavailable => "no copier is configured for this set",
            Self::PreconditionViolated => "operation precondition violated",
        };
        write!(formatter, "{message}")
    }
}

impl std::error::Error for SetError {}
