//! Typed façades over the session, one per resource family.

mod analysis;
mod analysis_profiles;
mod base_tasks;
mod search;
mod term_requests;
mod terminology;

pub use analysis::AnalysisService;
pub use analysis_profiles::AnalysisProfilesService;
pub use base_tasks::BaseTasksService;
pub use search::SearchService;
pub use term_requests::TermRequestsService;
pub use terminology::TerminologyService;
