use tracing::debug;

use crate::error::KalcResult;
use crate::http::KalcRequest;
use crate::models::tasks::{CreatedTask, TasksQuery};
use crate::models::upload::{multipart_form, TERM_REQUEST_PART};
use crate::models::{CreateTermRequestModel, TaskId, TaskQueryFlags, TermRequest, UploadFileModel};
use crate::session::Session;

const TERM_REQUESTS_PATH: &str = "api/tasks/term-requests";

/// Term requests: proposed entries queued for review.
#[derive(Debug, Clone)]
pub struct TermRequestsService {
    session: Session,
}

impl TermRequestsService {
    pub fn new(session: Session) -> Self {
        TermRequestsService { session }
    }

    /// Queue a term request. The id comes back right away; the request is
    /// reviewed later and does not become an entry by itself.
    pub async fn create_term_request(
        &self,
        model: &CreateTermRequestModel,
        media_files: &[UploadFileModel],
    ) -> KalcResult<TaskId> {
        let form = multipart_form(TERM_REQUEST_PART, model, media_files)?;
        let created: CreatedTask = self
            .session
            .send_json(KalcRequest::post(TERM_REQUESTS_PATH).multipart(form))
            .await?;
        debug!(id = created.id, "term request created");
        Ok(created.id)
    }

    pub async fn get_tasks_by_id(
        &self,
        ids: &[TaskId],
        flags: TaskQueryFlags,
    ) -> KalcResult<Vec<TermRequest>> {
        let request = KalcRequest::post(format!("{TERM_REQUESTS_PATH}/query"))
            .json(&TasksQuery { ids, flags })?;
        self.session.send_json(request).await
    }
}
