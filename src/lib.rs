// Library root
// -----------
// Typed async client for the Kalcium terminology REST API. The binary
// (`main.rs`) drives these modules as an end-to-end test client.
//
// Module responsibilities:
// - `http`: request building, version header check, error mapping.
// - `session`: login/logout and the token every call carries.
// - `services`: one façade per resource family (terminology, search,
//   term requests, tasks, analysis profiles, analysis).
// - `models`: the JSON shapes exchanged with the server.
// - `validation`: checks an entry against its termbase schema before upload.
// - `client`: ties a backend URL, a session and the services together.
// - `scenario`, `config`, `ui`: the test client's steps, settings and
//   console output.
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod scenario;
pub mod services;
pub mod session;
pub mod ui;
pub mod validation;

pub use client::{KalcClient, KalcClientBuilder};
pub use error::{ApiError, ErrorBody, KalcError, KalcResult};
pub use session::{Session, SessionStatus};
