use serde::{Deserialize, Serialize};

use super::terminology::{Entry, EntryId};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Left-anchored match on the normalized term.
    #[default]
    Prefix,
    Exact,
    Contains,
    Fuzzy,
    Wildcard,
}

/// What the search is for; the server applies feature-specific settings.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchFeature {
    #[default]
    Search,
    Lookup,
    CheckTerm,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchTermbaseSettings {
    pub termbase_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_id: Option<i32>,
}

impl SearchTermbaseSettings {
    pub fn new(termbase_id: i32) -> Self {
        SearchTermbaseSettings {
            termbase_id,
            filter_id: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub term: String,
    pub mode: SearchMode,
    /// Server-side filter expression applied to hits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(default)]
    pub use_stemming: bool,
    pub start_index: u32,
    pub max_count: u32,
    /// Languages the term is searched in.
    pub source_language_ids: Vec<i32>,
    /// Languages included in the returned entries.
    pub target_language_ids: Vec<i32>,
    pub termbase_settings: Vec<SearchTermbaseSettings>,
    pub feature: SearchFeature,
}

impl Default for SearchRequest {
    fn default() -> Self {
        SearchRequest {
            term: String::new(),
            mode: SearchMode::Prefix,
            filter: None,
            use_stemming: false,
            start_index: 0,
            max_count: 20,
            source_language_ids: Vec::new(),
            target_language_ids: Vec::new(),
            termbase_settings: Vec::new(),
            feature: SearchFeature::Search,
        }
    }
}

impl SearchRequest {
    /// Prefix search for `term` in every language of the given termbase.
    pub fn in_termbase(term: impl Into<String>, termbase_id: i32, language_ids: &[i32]) -> Self {
        SearchRequest {
            term: term.into(),
            source_language_ids: language_ids.to_vec(),
            target_language_ids: language_ids.to_vec(),
            termbase_settings: vec![SearchTermbaseSettings::new(termbase_id)],
            ..Default::default()
        }
    }

    pub fn page(mut self, start_index: u32, max_count: u32) -> Self {
        self.start_index = start_index;
        self.max_count = max_count;
        self
    }

    /// The same request for the following window of `max_count` hits.
    pub fn next_page(&self) -> Self {
        let mut next = self.clone();
        next.start_index = self.start_index.saturating_add(self.max_count);
        next
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Hit {
    pub entry_id: EntryId,
    pub language_id: i32,
    pub term: String,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Number of matches, independent of the page size.
    pub total: u64,
    #[serde(default)]
    pub hits: Vec<Hit>,
    /// Entries the hits belong to.
    #[serde(default)]
    pub entries: Vec<Entry>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawHit {
    pub entry_uuid: String,
    pub termbase_id: i32,
    pub language_id: i32,
    pub term: String,
}

/// Result of the raw search: hits only, no entry enrichment.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawSearchResult {
    pub total: u64,
    #[serde(default)]
    pub hits: Vec<RawHit>,
}
