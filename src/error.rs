/// Failures reported by `ChainedHashSet` and its cursors.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SetError {
    /// An element or collection argument was absent.
    #[error("invalid argument: {0} must not be absent")]
    InvalidArgument(&'static str),
    /// `Cursor::next` was called with no elements left.
    #[error("no such element: the cursor is exhausted")]
    NoSuchElement,
    /// The set was structurally modified after the cursor was created.
    #[error("concurrent modification: the set changed since the cursor was created")]
    ConcurrentModification,
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}
