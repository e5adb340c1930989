use crate::error::KalcResult;
use crate::http::KalcRequest;
use crate::models::analysis::AnalyzeSegmentRequest;
use crate::models::{AnalyzeSegmentResult, AnalyzeType, Segment};
use crate::session::Session;

const ANALYZE_SEGMENT_PATH: &str = "api/analysis/segment";

/// Segment analysis (CheckTerm).
#[derive(Debug, Clone)]
pub struct AnalysisService {
    session: Session,
}

impl AnalysisService {
    pub fn new(session: Session) -> Self {
        AnalysisService { session }
    }

    /// Run the profile's termbases against `segment`.
    ///
    /// Whether a hit is problematical is decided by the server from the
    /// profile settings. `target_language_ids` is ignored for
    /// `AnalyzeType::Source`.
    pub async fn analyze_segment(
        &self,
        segment: &Segment,
        profile_id: i32,
        source_language_ids: &[i32],
        target_language_ids: &[i32],
        analyze_type: AnalyzeType,
    ) -> KalcResult<AnalyzeSegmentResult> {
        let request = KalcRequest::post(ANALYZE_SEGMENT_PATH).json(&AnalyzeSegmentRequest {
            segment,
            profile_id,
            source_language_ids,
            target_language_ids,
            analyze_type,
        })?;
        self.session.send_json(request).await
    }
}
