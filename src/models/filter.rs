//! Structured room filter.

/// A conjunction of optional room constraints.
///
/// Precedence when fields overlap: `block` wins over `block_type` and
/// `block_number`, `room` wins over `floor`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    /// Explicit block code (e.g. "B02"), used verbatim
    pub block: Option<String>,

    /// Room number (e.g. 218)
    pub room: Option<u32>,

    /// Floor, 1 through 9
    pub floor: Option<u32>,

    /// Block type letter (A-D)
    pub block_type: Option<String>,

    /// Block number within a type
    pub block_number: Option<u32>,
}

impl QueryFilter {
    /// Filter for a single explicit room.
    pub fn room_in(block: impl Into<String>, room: u32) -> Self {
        Self {
            block: Some(block.into()),
            room: Some(room),
            ..Self::default()
        }
    }
}
