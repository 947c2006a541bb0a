// src/services/compiler.rs

//! Filter compiler.
//!
//! Expands a [`QueryFilter`] into the ordered list of room codes
//! (`<TYPE><NN>-<RRR>`) the directory is searched with. Expansion happens in
//! two stages: block codes first, then a room suffix per block code.

use crate::error::FilterError;
use crate::models::QueryFilter;
use crate::models::taxonomy::{self, BLOCK_TYPES};

/// Rooms per floor.
const ROOMS_PER_FLOOR: u32 = 50;

/// Floors searched when neither room nor floor is constrained.
const DEFAULT_FLOORS: std::ops::RangeInclusive<u32> = 2..=9;

/// Valid floor numbers.
const VALID_FLOORS: std::ops::RangeInclusive<u32> = 1..=9;

/// Compile a filter into room-code queries.
///
/// Output order is deterministic: block codes follow taxonomy order, rooms are
/// floor-major. Overlapping codes are not deduplicated.
pub fn compile(filter: &QueryFilter) -> Result<Vec<String>, FilterError> {
    validate(filter)?;

    let blocks = block_codes(filter);
    let suffixes = room_suffixes(filter);

    Ok(blocks
        .iter()
        .flat_map(|block| suffixes.iter().map(move |room| format!("{block}-{room}")))
        .collect())
}

/// Check filter fields, in rule order.
fn validate(filter: &QueryFilter) -> Result<(), FilterError> {
    if filter.block.as_deref().is_some_and(|b| b.trim().is_empty()) {
        return Err(FilterError::InvalidFilter);
    }

    if let Some(raw_type) = &filter.block_type {
        let block_type = taxonomy::find(raw_type)
            .ok_or_else(|| FilterError::UnknownBlockType(raw_type.clone()))?;

        if let Some(number) = filter.block_number {
            if !block_type.contains(number) {
                return Err(FilterError::BlockMismatch {
                    block_type: block_type.letter,
                    block_number: number,
                });
            }
        }
    }

    if let Some(number) = filter.block_number {
        if taxonomy::types_with(number).next().is_none() {
            return Err(FilterError::BlockNumberNotFound(number));
        }
    }

    if let Some(floor) = filter.floor {
        if !VALID_FLOORS.contains(&floor) {
            return Err(FilterError::InvalidFloor(floor));
        }
    }

    Ok(())
}

/// Block-code stage. Assumes `validate` passed.
fn block_codes(filter: &QueryFilter) -> Vec<String> {
    if let Some(block) = &filter.block {
        return vec![block.to_uppercase()];
    }

    let block_type = filter.block_type.as_deref().and_then(taxonomy::find);

    match (block_type, filter.block_number) {
        (Some(t), Some(number)) => vec![t.code(number)],
        (Some(t), None) => t.numbers.iter().map(|&n| t.code(n)).collect(),
        (None, Some(number)) => taxonomy::types_with(number)
            .map(|t| t.code(number))
            .collect(),
        (None, None) => BLOCK_TYPES
            .iter()
            .flat_map(|t| t.numbers.iter().map(move |&n| t.code(n)))
            .collect(),
    }
}

/// Room stage: zero-padded room suffixes.
fn room_suffixes(filter: &QueryFilter) -> Vec<String> {
    if let Some(room) = filter.room {
        return vec![format!("{room:03}")];
    }

    let floors = match filter.floor {
        Some(floor) => floor..=floor,
        None => DEFAULT_FLOORS,
    };

    floors
        .flat_map(|floor| (1..=ROOMS_PER_FLOOR).map(move |n| format!("{:03}", floor * 100 + n)))
        .collect()
}
