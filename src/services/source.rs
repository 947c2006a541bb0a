// src/services/source.rs

//! Record sources: where the fetch engine gets people from.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::{FetcherConfig, Person};
use crate::utils::http;

/// One entry of the directory's result page.
///
/// Captures, in document order: number, full name, login, block, e-mail, room.
static PERSON_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(\d+)\.</font>\s*(.*?)\s*</th[\s\S]*?",
        r"Login:[\s\S]*?<td>\s*(\w+?)\s*</td[\s\S]*?",
        r"Blok:[\s\S]*?td>\s*([A-D]\d+)\s*</[\s\S]*?",
        r"E-mail:[\s\S]*?<td>\s*([\w\-.@]+?)\s*</td[\s\S]*?",
        r"Pokoj:[\s\S]*?td>\s*(\d+)\s*</td",
    ))
    .expect("person entry pattern is valid")
});

/// Resolves one room-code query to the people living there.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch every person matching `query`.
    ///
    /// An empty list is a successful lookup. Errors are transient and carry
    /// the query (see [`AppError::Fetch`]).
    async fn fetch(&self, query: &str) -> Result<Vec<Person>>;
}

/// Record source backed by the directory's search form.
pub struct DirectorySource {
    client: reqwest::Client,
    endpoint: String,
}

impl DirectorySource {
    /// Create a directory source from fetcher settings.
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        Ok(Self {
            client: http::create_client(config)?,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl RecordSource for DirectorySource {
    async fn fetch(&self, query: &str) -> Result<Vec<Person>> {
        let html = http::post_form(&self.client, &self.endpoint, &[("str", query)])
            .await
            .map_err(|e| AppError::fetch(query, e))?;
        Ok(parse_people(&html))
    }
}

/// Extract people from a directory result page.
pub fn parse_people(html: &str) -> Vec<Person> {
    PERSON_ENTRY
        .captures_iter(html)
        .filter_map(|caps| {
            Some(Person {
                number: caps[1].parse().ok()?,
                fullname: caps[2].to_string(),
                block: caps[4].to_string(),
                room: caps[6].to_string(),
                login: caps[3].to_string(),
                email: caps[5].to_string(),
            })
        })
        .collect()
}
