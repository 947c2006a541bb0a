//! Fixed block taxonomy of the dormitory complexes.
//!
//! Every block is identified by a type letter and a number. Numbers are not
//! unique across types: `A02`, `B02`, `C02` and `D02` are four different
//! buildings.

/// A block type with its valid block numbers, in listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockType {
    /// Type letter (uppercase)
    pub letter: char,

    /// Dormitory complex the type belongs to
    pub name: &'static str,

    /// Valid block numbers, ascending
    pub numbers: &'static [u32],
}

impl BlockType {
    /// Whether `number` is a block of this type.
    pub fn contains(&self, number: u32) -> bool {
        self.numbers.contains(&number)
    }

    /// Block code such as `A02`.
    pub fn code(&self, number: u32) -> String {
        block_code(self.letter, number)
    }
}

/// All block types in taxonomy order.
pub const BLOCK_TYPES: &[BlockType] = &[
    BlockType {
        letter: 'A',
        name: "Koleje pod Palackého vrchem",
        numbers: &[2, 3, 4, 5],
    },
    BlockType {
        letter: 'B',
        name: "Purkyňovy koleje",
        numbers: &[2, 4, 5, 7],
    },
    BlockType {
        letter: 'C',
        name: "Listovy koleje",
        numbers: &[1, 2, 3],
    },
    BlockType {
        letter: 'D',
        name: "Mánesovy koleje",
        numbers: &[1, 2],
    },
];

/// Look up a block type by its letter, case-insensitively.
///
/// Anything other than a single letter is unknown.
pub fn find(block_type: &str) -> Option<&'static BlockType> {
    let mut chars = block_type.trim().chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() {
        return None;
    }
    BLOCK_TYPES.iter().find(|t| t.letter == letter)
}

/// Block types containing `number`, in taxonomy order.
pub fn types_with(number: u32) -> impl Iterator<Item = &'static BlockType> {
    BLOCK_TYPES.iter().filter(move |t| t.contains(number))
}

/// Human-readable listing of every block type with its dormitory name and
/// block numbers, one line per type.
pub fn listing() -> String {
    BLOCK_TYPES
        .iter()
        .map(|t| {
            let numbers: Vec<String> = t.numbers.iter().map(u32::to_string).collect();
            format!("    {} - {:<30}({})\n", t.letter, t.name, numbers.join(", "))
        })
        .collect()
}

/// Format a block code, zero-padding the number to two digits.
pub fn block_code(letter: char, number: u32) -> String {
    format!("{}{:02}", letter.to_ascii_uppercase(), number)
}
