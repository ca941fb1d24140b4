//! Forward-only delimiter cursor over a request head.

/// Splits a string into pieces by successive delimiter searches.
///
/// Each call to [`HeaderCursor::next_by`] returns the text between the current
/// position and the first occurrence of the delimiter at or after it, then moves
/// past the delimiter. The cursor never moves backwards.
#[derive(Debug)]
pub struct HeaderCursor<'a> {
    data: &'a str,
    offset: usize,
}

impl<'a> HeaderCursor<'a> {
    /// Create a cursor positioned at the start of `data`.
    pub fn new(data: &'a str) -> Self {
        Self { data, offset: 0 }
    }

    /// Consume up to and including the next `delim`.
    ///
    /// Returns `None` and leaves the cursor untouched if the delimiter does not
    /// occur in the remaining input.
    pub fn next_by(&mut self, delim: &str) -> Option<&'a str> {
        let rest = &self.data[self.offset..];
        let end = rest.find(delim)?;
        self.offset += end + delim.len();
        Some(&rest[..end])
    }

    /// Whether any unconsumed input remains.
    pub fn has_remaining(&self) -> bool {
        self.offset < self.data.len()
    }

    /// The unconsumed input.
    pub fn remaining(&self) -> &'a str {
        &self.data[self.offset..]
    }
}
