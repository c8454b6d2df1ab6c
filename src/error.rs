use thiserror::Error;

/// Errors returned by [`Cursor`](crate::Cursor) and the positional
/// operations of [`List`](crate::List).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListError {
    /// The list was structurally modified by something other than this
    /// cursor since it last synchronized. The cursor stays unusable.
    #[error("the list was structurally modified outside of this cursor")]
    ConcurrentModification,

    /// There is no element in the requested direction.
    #[error("no element in the requested direction")]
    NoSuchElement,

    /// `remove` or `set` was called with no element to act on.
    #[error("no element to update: `next` or `previous` must be called first")]
    InvalidCursorState,

    #[error("index {index} is out of bounds for a list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}
