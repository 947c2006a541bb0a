//! Person record returned by the directory.

use serde::{Deserialize, Serialize};

/// A dormitory resident as listed by the directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    /// Position in the directory's result listing
    pub number: u32,

    /// Full name as displayed (may carry diacritics)
    pub fullname: String,

    /// Block code (e.g. "B02")
    pub block: String,

    /// Room number (e.g. "218")
    pub room: String,

    /// Login name
    pub login: String,

    /// E-mail address
    pub email: String,
}

impl Person {
    /// The `block-room` composite, comparable with a compiled query.
    pub fn room_code(&self) -> String {
        format!("{}-{}", self.block, self.room)
    }
}
