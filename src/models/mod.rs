//! Typed request and response structures for the Kalcium REST API.
//!
//! Field names follow the server's camelCase JSON. Optional server fields use
//! `#[serde(default)]` so older servers that omit them still decode.

pub mod account;
pub mod analysis;
pub mod search;
pub mod tasks;
pub mod terminology;
pub mod upload;

pub use account::{AuthenticationData, Group, GroupTermbase};
pub use analysis::{
    AnalysisProfile, AnalysisTermbaseSettings, AnalyzeHit, AnalyzeResult, AnalyzeResultPair,
    AnalyzeSegmentResult, AnalyzeType, Segment,
};
pub use search::{
    Hit, RawHit, RawSearchResult, SearchFeature, SearchMode, SearchRequest, SearchResult,
    SearchTermbaseSettings,
};
pub use tasks::{
    CreateTermRequestModel, TaskComment, TaskHistoryItem, TaskId, TaskQueryFlags, TaskStatus,
    TermRequest,
};
pub use terminology::{
    EditableEntry, EditableLanguageGroup, EditableTermGroup, EntriesResult, Entry, EntryId,
    EntryQueryFlags, FieldDefinition, FieldGroup, FieldLevel, FieldType, FieldValue, Language,
    LanguageGroup, LanguageGroupDefinition, MediaFileRequest, SchemaDefinition, TermGroup,
    Termbase,
};
pub use upload::UploadFileModel;

/// Keep the first occurrence of each id.
pub(crate) fn distinct<I: IntoIterator<Item = i32>>(ids: I) -> Vec<i32> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}
