//! Offset/limit pagination window for list operations.

/// Window over a creation-ordered listing.
///
/// Every list operation accepts a `Page`; the defaults mirror the HTTP
/// query defaults (`skip=0`, `limit=100`). No upper bound is enforced on
/// `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Number of leading rows to skip.
    pub skip: i64,
    /// Maximum number of rows to return.
    pub limit: i64,
}

impl Page {
    /// Default page size used when the caller does not supply a limit.
    pub const DEFAULT_LIMIT: i64 = 100;

    /// Construct a window from raw offset and limit values.
    pub fn new(skip: i64, limit: i64) -> Self {
        Self { skip, limit }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}
