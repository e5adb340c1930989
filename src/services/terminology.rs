use bytes::Bytes;
use reqwest::Method;
use tracing::debug;

use crate::error::KalcResult;
use crate::http::KalcRequest;
use crate::models::terminology::EntriesQuery;
use crate::models::upload::{multipart_form, ENTRY_PART};
use crate::models::{
    EditableEntry, EntriesResult, Entry, EntryQueryFlags, Language, MediaFileRequest,
    SchemaDefinition, Termbase, UploadFileModel,
};
use crate::session::Session;
use crate::validation::check_entry;

const TERMBASES_PATH: &str = "api/terminology/termbases";
const DEFINITIONS_PATH: &str = "api/terminology/termbases/definitions";
const LANGUAGES_PATH: &str = "api/terminology/languages";

fn entries(method: Method, termbase_id: i32) -> KalcRequest {
    KalcRequest::new(method, TERMBASES_PATH)
        .segment(termbase_id)
        .segment("entries")
}

/// Termbases, their schema, entries and media files.
#[derive(Debug, Clone)]
pub struct TerminologyService {
    session: Session,
}

impl TerminologyService {
    pub fn new(session: Session) -> Self {
        TerminologyService { session }
    }

    /// Termbases with the given ids that the user may see.
    pub async fn get_termbases<I>(&self, ids: I) -> KalcResult<Vec<Termbase>>
    where
        I: IntoIterator<Item = i32>,
    {
        self.session
            .send_json(KalcRequest::get(TERMBASES_PATH).query_all("ids", ids))
            .await
    }

    pub async fn get_termbase_definitions<I>(&self, ids: I) -> KalcResult<Vec<SchemaDefinition>>
    where
        I: IntoIterator<Item = i32>,
    {
        self.session
            .send_json(KalcRequest::get(DEFINITIONS_PATH).query_all("ids", ids))
            .await
    }

    pub async fn get_languages<I>(&self, ids: I) -> KalcResult<Vec<Language>>
    where
        I: IntoIterator<Item = i32>,
    {
        self.session
            .send_json(KalcRequest::get(LANGUAGES_PATH).query_all("ids", ids))
            .await
    }

    /// Create an entry. Multimedia field values must name one of
    /// `media_files`; the files travel in the same multipart request.
    pub async fn create_entry(
        &self,
        entry: &EditableEntry,
        termbase_id: i32,
        media_files: &[UploadFileModel],
    ) -> KalcResult<Entry> {
        debug!(termbase_id, files = media_files.len(), "creating entry");
        let form = multipart_form(ENTRY_PART, entry, media_files)?;
        self.session
            .send_json(entries(Method::POST, termbase_id).multipart(form))
            .await
    }

    /// Validate `entry` against `schema` before creating it.
    pub async fn create_entry_checked(
        &self,
        entry: &EditableEntry,
        schema: &SchemaDefinition,
        media_files: &[UploadFileModel],
    ) -> KalcResult<Entry> {
        check_entry(entry, schema, media_files)?;
        self.create_entry(entry, schema.termbase_id, media_files).await
    }

    /// Fetch entries by UUID. Only `language_ids` are returned; UUIDs the
    /// server does not know are listed in `not_found`.
    pub async fn get_entries_by_uuid(
        &self,
        termbase_id: i32,
        uuids: &[String],
        language_ids: &[i32],
        flags: EntryQueryFlags,
    ) -> KalcResult<EntriesResult> {
        let query = EntriesQuery {
            uuids,
            language_ids,
            flags,
        };
        let request = entries(Method::POST, termbase_id)
            .segment("query")
            .json(&query)?;
        self.session.send_json(request).await
    }

    /// Delete an entry; `NotFound` if it does not exist.
    pub async fn delete_entry(&self, uuid: &str, termbase_id: i32) -> KalcResult<()> {
        self.session
            .send_unit(entries(Method::DELETE, termbase_id).segment(uuid))
            .await
    }

    /// Download a media file, resized when width and height are set.
    pub async fn get_media_file(&self, request: &MediaFileRequest) -> KalcResult<Bytes> {
        let mut http_request = KalcRequest::get(TERMBASES_PATH)
            .segment(request.termbase_id)
            .segment("media");
        for (key, value) in request.query_pairs() {
            http_request = http_request.query(key, value);
        }
        self.session.send_bytes(http_request).await
    }
}
