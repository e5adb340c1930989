use serde::{Deserialize, Serialize};

/// Termbase used by an analysis profile and the thresholds applied to its hits.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisTermbaseSettings {
    pub termbase_id: i32,
    #[serde(default)]
    pub min_match_score: Option<f64>,
    #[serde(default)]
    pub severity_threshold: Option<i32>,
}

/// Analysis options: which termbases to use and with what settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisProfile {
    pub id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub termbase_settings: Vec<AnalysisTermbaseSettings>,
}

impl AnalysisProfile {
    pub fn termbase_ids(&self) -> Vec<i32> {
        super::distinct(self.termbase_settings.iter().map(|s| s.termbase_id))
    }
}

/// A unit of text submitted for analysis. `id` and `index` are echoed back
/// untouched and only matter to the caller.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub source_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
}

impl Segment {
    pub fn source(text: impl Into<String>) -> Self {
        Segment {
            source_value: text.into(),
            ..Default::default()
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalyzeType {
    #[default]
    Source,
    Target,
    SourceAndTarget,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnalyzeSegmentRequest<'a> {
    pub segment: &'a Segment,
    pub profile_id: i32,
    pub source_language_ids: &'a [i32],
    pub target_language_ids: &'a [i32],
    pub analyze_type: AnalyzeType,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeHit {
    #[serde(default)]
    pub entry_uuid: Option<String>,
    pub termbase_id: i32,
    pub term: String,
}

/// Outcome for one searched expression.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResult {
    pub searched: String,
    /// Set by the server according to the profile's rules.
    #[serde(default)]
    pub is_problematical: bool,
    #[serde(default)]
    pub start_index: Option<i32>,
    #[serde(default)]
    pub length: Option<i32>,
    #[serde(default)]
    pub hits: Vec<AnalyzeHit>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResultPair {
    pub source: AnalyzeResult,
    #[serde(default)]
    pub target: Option<AnalyzeResult>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeSegmentResult {
    #[serde(default)]
    pub analyze_result_pairs: Vec<AnalyzeResultPair>,
}

impl AnalyzeSegmentResult {
    /// Every flagged result, source side first.
    pub fn problematical(&self) -> impl Iterator<Item = &AnalyzeResult> {
        self.analyze_result_pairs
            .iter()
            .flat_map(|pair| std::iter::once(&pair.source).chain(pair.target.as_ref()))
            .filter(|result| result.is_problematical)
    }
}
