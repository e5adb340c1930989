use crate::error::{KalcError, KalcResult};
use crate::http::KalcRequest;
use crate::models::{RawSearchResult, SearchRequest, SearchResult};
use crate::session::Session;

const SEARCH_PATH: &str = "api/search";
const RAW_SEARCH_PATH: &str = "api/search/raw";

#[derive(Debug, Clone)]
pub struct SearchService {
    session: Session,
}

impl SearchService {
    pub fn new(session: Session) -> Self {
        SearchService { session }
    }

    /// Search and return hits with their related entries.
    pub async fn search(&self, request: &SearchRequest) -> KalcResult<SearchResult> {
        check_request(request)?;
        self.session
            .send_json(KalcRequest::post(SEARCH_PATH).json(request)?)
            .await
    }

    /// Same contract as [`search`](Self::search) without entry enrichment;
    /// cheaper when only the hits are needed.
    pub async fn search_raw(&self, request: &SearchRequest) -> KalcResult<RawSearchResult> {
        check_request(request)?;
        self.session
            .send_json(KalcRequest::post(RAW_SEARCH_PATH).json(request)?)
            .await
    }
}

fn check_request(request: &SearchRequest) -> KalcResult<()> {
    if request.max_count == 0 {
        return Err(KalcError::InvalidRequest("maxCount must be at least 1".into()));
    }
    if request.termbase_settings.is_empty() {
        return Err(KalcError::InvalidRequest("no termbase to search in".into()));
    }
    Ok(())
}
