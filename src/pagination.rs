//! URL-based pagination cursor.
//!
//! Marker-based iteration alone can stall when the mail view re-renders
//! page 1 after every action. The engine therefore keeps an explicit page
//! cursor in parallel, derived from the folder address, and falls back to
//! it once a page is confirmed drained.

use crate::error::TraversalError;

/// A `(folder base address, page number)` pair.
///
/// The page number is monotonically non-decreasing within a run; the engine
/// only ever advances it by one, and only after a page yielded zero
/// unprocessed messages following at least one opened message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    base: String,
    page: u64,
}

impl PageCursor {
    /// Derive a cursor from the current folder address.
    ///
    /// The address is split at its final `/`; the trailing segment must be
    /// an integer page number. Anything else means the page-addressing
    /// assumption no longer holds, and continuing would risk skipping or
    /// repeating messages, so it is a fatal [`TraversalError::MalformedAddress`].
    pub fn parse(url: &str) -> Result<Self, TraversalError> {
        let malformed = || TraversalError::MalformedAddress {
            url: url.to_string(),
        };

        let (base, tail) = url.trim_end_matches('/').rsplit_once('/').ok_or_else(malformed)?;
        if base.is_empty() {
            return Err(malformed());
        }
        let page = tail.parse::<u64>().map_err(|_| malformed())?;

        Ok(Self {
            base: base.to_string(),
            page,
        })
    }

    /// The cursor one page further on. Pure; calling it twice on the same
    /// cursor yields the same result.
    pub fn advance(&self) -> Self {
        Self {
            base: self.base.clone(),
            page: self.page + 1,
        }
    }

    /// Navigable address of the page this cursor points at.
    pub fn address(&self) -> String {
        format!("{}/{}", self.base, self.page)
    }

    pub fn page(&self) -> u64 {
        self.page
    }
}
