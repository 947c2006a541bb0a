// src/services/matcher.rs

//! Case- and diacritics-insensitive name matching.

use unicode_normalization::UnicodeNormalization;

use crate::models::Person;

/// Lowercase, decompose and drop combining marks (U+0300..=U+036F).
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect()
}

/// Matches people whose name or login contains a needle.
#[derive(Debug, Clone)]
pub struct NameMatcher {
    needle: String,
}

impl NameMatcher {
    pub fn new(name: &str) -> Self {
        Self {
            needle: normalize_name(name),
        }
    }

    /// The normalized needle.
    pub fn needle(&self) -> &str {
        &self.needle
    }

    pub fn matches(&self, person: &Person) -> bool {
        normalize_name(&person.fullname).contains(&self.needle)
            || normalize_name(&person.login).contains(&self.needle)
    }

    /// Matching people, in input order.
    pub fn select<'a>(&self, people: &'a [Person]) -> Vec<&'a Person> {
        people.iter().filter(|p| self.matches(p)).collect()
    }
}
