use crate::error::KalcResult;
use crate::http::KalcRequest;
use crate::models::tasks::TaskIds;
use crate::models::TaskId;
use crate::session::Session;

const DELETE_TASKS_PATH: &str = "api/tasks/delete";

/// Operations shared by every task type.
#[derive(Debug, Clone)]
pub struct BaseTasksService {
    session: Session,
}

impl BaseTasksService {
    pub fn new(session: Session) -> Self {
        BaseTasksService { session }
    }

    /// Delete pending tasks. `NotFound` if any of them was already resolved
    /// or deleted.
    pub async fn delete(&self, ids: &[TaskId]) -> KalcResult<()> {
        self.session
            .send_unit(KalcRequest::post(DELETE_TASKS_PATH).json(&TaskIds { ids })?)
            .await
    }
}
