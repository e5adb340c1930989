use serde::{Deserialize, Serialize};

use super::terminology::EditableEntry;

/// Identifier of a workflow task such as a term request.
pub type TaskId = i64;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskStatus {
    #[default]
    Open,
    InProgress,
    Approved,
    Rejected,
    #[serde(other)]
    Other,
}

/// Submission shape of a term request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateTermRequestModel {
    pub termbase_id: i32,
    pub content: EditableEntry,
    #[serde(default)]
    pub comment: Option<String>,
    pub source_expression: String,
    pub source_language_id: i32,
}

impl CreateTermRequestModel {
    /// Propose `content`, taking the source expression and language from its
    /// first term. Returns `None` when the draft has no term.
    pub fn from_entry(content: EditableEntry, comment: Option<String>) -> Option<Self> {
        let (source_language_id, source_expression) = content
            .first_term()
            .map(|(language, term)| (language, term.to_string()))?;
        Some(CreateTermRequestModel {
            termbase_id: content.termbase_id,
            content,
            comment,
            source_expression,
            source_language_id,
        })
    }
}

#[derive(Deserialize, Debug, Clone, Copy)]
pub(crate) struct CreatedTask {
    pub id: TaskId,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskHistoryItem {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    pub action: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskComment {
    #[serde(default)]
    pub user_name: Option<String>,
    pub text: String,
}

/// A proposed entry waiting for review.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TermRequest {
    pub id: TaskId,
    pub termbase_id: i32,
    pub content: EditableEntry,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub source_expression: String,
    #[serde(default)]
    pub source_language_id: i32,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub history: Option<Vec<TaskHistoryItem>>,
    #[serde(default)]
    pub comments: Option<Vec<TaskComment>>,
}

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskQueryFlags {
    pub include_history: bool,
    pub include_comments: bool,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TasksQuery<'a> {
    pub ids: &'a [TaskId],
    #[serde(flatten)]
    pub flags: TaskQueryFlags,
}

#[derive(Serialize, Debug)]
pub(crate) struct TaskIds<'a> {
    pub ids: &'a [TaskId],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_takes_source_from_first_term() {
        let content = EditableEntry::new(5).with_term(3, "kettle");
        let model =
            CreateTermRequestModel::from_entry(content, Some("please add".into())).unwrap();
        assert_eq!(model.termbase_id, 5);
        assert_eq!(model.source_language_id, 3);
        assert_eq!(model.source_expression, "kettle");
    }

    #[test]
    fn model_requires_a_term() {
        assert!(CreateTermRequestModel::from_entry(EditableEntry::new(5), None).is_none());
    }

    #[test]
    fn unknown_status_decodes_as_other() {
        let request: TermRequest = serde_json::from_value(serde_json::json!({
            "id": 12,
            "termbaseId": 5,
            "content": {"termbaseId": 5, "languages": []},
            "status": "Escalated"
        }))
        .unwrap();
        assert_eq!(request.status, TaskStatus::Other);
        assert!(request.history.is_none());
    }
}
