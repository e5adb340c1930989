//! Shared wiremock setup for the integration tests.
//!
//! `MockKalcServer` answers like a Kalcium 6.3 backend: every response
//! carries `X-Kalc-Version`, and `logged_in_client` goes through a real
//! login exchange.

#![allow(dead_code)]

use std::time::Duration;

use kalcium_client::KalcClient;
use serde_json::{json, Value};
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const TOKEN: &str = "token-123";
pub const SERVER_VERSION: &str = "6.3.4.2";
pub const TERMBASE_ID: i32 = 1;
pub const TERMBASE_NAME: &str = "Kalcium";
pub const ENGLISH: i32 = 10;
pub const GERMAN: i32 = 11;
pub const PROFILE_ID: i32 = 7;

pub struct MockKalcServer {
    pub server: MockServer,
}

impl MockKalcServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn client(&self) -> KalcClient {
        KalcClient::builder(self.uri())
            .timeout(Some(Duration::from_secs(5)))
            .build()
            .expect("client")
    }

    /// Login accepting `user`/`secret` and returning `authentication_data`.
    pub async fn mock_login(&self, authentication_data: Value) {
        Mock::given(method("POST"))
            .and(path("/api/account/login"))
            .and(body_partial_json(json!({ "userName": "user", "password": "secret" })))
            .respond_with(ok_json(json!({
                "token": TOKEN,
                "authenticationData": authentication_data,
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_logout(&self) {
        Mock::given(method("POST"))
            .and(path("/api/account/logout"))
            .and(header("X-Kalc-Token", TOKEN))
            .respond_with(versioned(ResponseTemplate::new(204)))
            .mount(&self.server)
            .await;
    }

    pub async fn logged_in_client(&self) -> KalcClient {
        self.mock_login(authentication_data()).await;
        let client = self.client();
        client.login("user", "secret").await.expect("login");
        client
    }

    /// Number of requests received on `request_path`.
    pub async fn requests_to(&self, request_path: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == request_path)
            .count()
    }
}

pub fn versioned(template: ResponseTemplate) -> ResponseTemplate {
    template.insert_header("X-Kalc-Version", SERVER_VERSION)
}

pub fn ok_json(body: Value) -> ResponseTemplate {
    versioned(ResponseTemplate::new(200).set_body_json(body))
}

pub fn error_json(status: u16, message: &str) -> ResponseTemplate {
    versioned(ResponseTemplate::new(status).set_body_json(json!({
        "statusCode": status,
        "message": message,
    })))
}

/// One group: termbase 1 enabled, termbase 2 disabled, CheckTerm on.
pub fn authentication_data() -> Value {
    json!({
        "userName": "user",
        "groups": [{
            "id": 1,
            "name": "Terminologists",
            "isCheckTermModuleEnabled": true,
            "analysisProfileIds": [PROFILE_ID],
            "termbases": [
                { "termbaseId": TERMBASE_ID, "isEnabled": true },
                { "termbaseId": 2, "isEnabled": false },
            ],
        }],
    })
}

pub fn termbases() -> Value {
    json!([{ "id": TERMBASE_ID, "name": TERMBASE_NAME, "languageIds": [ENGLISH, GERMAN] }])
}

pub fn languages() -> Value {
    json!([
        { "id": ENGLISH, "code": "en-US", "name": "English" },
        { "id": GERMAN, "code": "de-DE", "name": "German" },
    ])
}

pub fn schema_definitions() -> Value {
    json!([{
        "termbaseId": TERMBASE_ID,
        "termbaseName": TERMBASE_NAME,
        "languageGroupDefinitions": [
            { "languageId": ENGLISH, "languageName": "English" },
            { "languageId": GERMAN, "languageName": "German" },
        ],
        "fieldDefinitions": [
            { "name": "Definition", "fieldType": "Text", "level": "Entry" },
            { "name": "Image", "fieldType": "Multimedia", "level": "Entry" },
        ],
    }])
}

/// A stored entry with an English term and optional entry-level fields.
pub fn entry(uuid: &str, term: &str, definition: Option<&str>, image: Option<&str>) -> Value {
    let mut fields = Vec::new();
    if let Some(text) = definition {
        fields.push(json!({ "name": "Definition", "value": text }));
    }
    if let Some(file) = image {
        fields.push(json!({ "name": "Image", "value": file }));
    }
    json!({
        "id": { "uuid": uuid, "termbaseId": TERMBASE_ID },
        "termbaseId": TERMBASE_ID,
        "languages": [{
            "languageId": ENGLISH,
            "terms": [{ "id": "t-1", "term": term, "fields": [] }],
            "fields": [],
        }],
        "fields": fields,
    })
}
