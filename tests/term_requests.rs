mod common;

use common::*;
use kalcium_client::models::{CreateTermRequestModel, EditableEntry, TaskQueryFlags, TaskStatus};
use serde_json::json;
use wiremock::{
    matchers::{body_json, body_partial_json, method, path},
    Mock, ResponseTemplate,
};

fn stored_request(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "termbaseId": TERMBASE_ID,
        "content": {
            "termbaseId": TERMBASE_ID,
            "languages": [{ "languageId": ENGLISH, "terms": [{ "term": "teapot" }] }],
        },
        "comment": "This is a sample term request",
        "sourceExpression": "teapot",
        "sourceLanguageId": ENGLISH,
        "status": "Open",
        "history": [{ "action": "Created", "userName": "user" }],
    })
}

#[tokio::test]
async fn term_request_lifecycle() {
    let mock = MockKalcServer::start().await;
    let client = mock.logged_in_client().await;

    Mock::given(method("POST"))
        .and(path("/api/tasks/term-requests"))
        .respond_with(ok_json(json!({ "id": 42 })))
        .expect(1)
        .mount(&mock.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/tasks/term-requests/query"))
        .and(body_partial_json(json!({ "ids": [42], "includeHistory": true })))
        .respond_with(ok_json(json!([stored_request(42)])))
        .up_to_n_times(1)
        .mount(&mock.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/tasks/delete"))
        .and(body_json(json!({ "ids": [42] })))
        .respond_with(versioned(ResponseTemplate::new(204)))
        .expect(1)
        .mount(&mock.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/tasks/term-requests/query"))
        .respond_with(ok_json(json!([])))
        .mount(&mock.server)
        .await;

    let content = EditableEntry::new(TERMBASE_ID).with_term(ENGLISH, "teapot");
    let model =
        CreateTermRequestModel::from_entry(content, Some("This is a sample term request".into()))
            .unwrap();
    let id = client
        .term_requests()
        .create_term_request(&model, &[])
        .await
        .unwrap();
    assert_eq!(id, 42);

    let flags = TaskQueryFlags {
        include_history: true,
        include_comments: false,
    };
    let found = client.term_requests().get_tasks_by_id(&[id], flags).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].source_expression, model.source_expression);
    assert_eq!(found[0].status, TaskStatus::Open);
    assert_eq!(found[0].history.as_ref().map(Vec::len), Some(1));

    client.base_tasks().delete(&[id]).await.unwrap();
    let after = client.term_requests().get_tasks_by_id(&[id], flags).await.unwrap();
    assert!(after.is_empty());
}

#[tokio::test]
async fn deleting_unknown_task_is_not_found() {
    let mock = MockKalcServer::start().await;
    let client = mock.logged_in_client().await;
    Mock::given(method("POST"))
        .and(path("/api/tasks/delete"))
        .respond_with(error_json(404, "Task 99 does not exist"))
        .mount(&mock.server)
        .await;

    let err = client.base_tasks().delete(&[99]).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.api_error().unwrap().message(), "Task 99 does not exist");
}

#[tokio::test]
async fn unknown_status_decodes_as_other() {
    let mock = MockKalcServer::start().await;
    let client = mock.logged_in_client().await;
    let mut stored = stored_request(5);
    stored["status"] = json!("Escalated");
    Mock::given(method("POST"))
        .and(path("/api/tasks/term-requests/query"))
        .respond_with(ok_json(json!([stored])))
        .mount(&mock.server)
        .await;

    let found = client
        .term_requests()
        .get_tasks_by_id(&[5], TaskQueryFlags::default())
        .await
        .unwrap();
    assert_eq!(found[0].status, TaskStatus::Other);
}
