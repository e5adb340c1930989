use crate::error::KalcResult;
use crate::http::KalcRequest;
use crate::models::AnalysisProfile;
use crate::session::Session;

const ANALYSIS_PROFILES_PATH: &str = "api/analysis-profiles";

#[derive(Debug, Clone)]
pub struct AnalysisProfilesService {
    session: Session,
}

impl AnalysisProfilesService {
    pub fn new(session: Session) -> Self {
        AnalysisProfilesService { session }
    }

    pub async fn get_analysis_profile(&self, id: i32) -> KalcResult<AnalysisProfile> {
        self.session
            .send_json(KalcRequest::get(ANALYSIS_PROFILES_PATH).segment(id))
            .await
    }
}
