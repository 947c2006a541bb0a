// src/services/cache.rs

//! Preloaded record set used instead of the network.

use std::fs;
use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::Person;

/// People loaded from a previous JSON dump.
#[derive(Debug, Clone, Default)]
pub struct PersonCache {
    people: Vec<Person>,
}

impl PersonCache {
    /// Wrap an already loaded record set.
    pub fn new(people: Vec<Person>) -> Self {
        Self { people }
    }

    /// Load a JSON array of people. Any read or parse failure is fatal.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| AppError::cache_load(path, e))?;
        let people: Vec<Person> =
            serde_json::from_str(&content).map_err(|e| AppError::cache_load(path, e))?;

        log::info!("Loaded {} people from {}", people.len(), path.display());
        Ok(Self::new(people))
    }

    /// All cached people living in the room a query names.
    ///
    /// A room nobody is cached for yields an empty list.
    pub fn lookup(&self, query: &str) -> Vec<Person> {
        self.people
            .iter()
            .filter(|p| p.room_code() == query)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}
