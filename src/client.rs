// Entry point of the library: one `KalcClient` = one backend + one session,
// with a service handle per resource family. Everything is a cheap clone.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::KalcResult;
use crate::http::KalcHttp;
use crate::models::AuthenticationData;
use crate::services::{
    AnalysisProfilesService, AnalysisService, BaseTasksService, SearchService,
    TermRequestsService, TerminologyService,
};
use crate::session::{Session, SessionStatus};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_USER_AGENT: &str = concat!("kalcium-client/", env!("CARGO_PKG_VERSION"));

/// Configures a [`KalcClient`].
#[derive(Debug, Clone)]
pub struct KalcClientBuilder {
    backend_url: String,
    timeout: Option<Duration>,
    user_agent: String,
    ignore_kalc_version: bool,
}

impl KalcClientBuilder {
    pub fn new(backend_url: impl Into<String>) -> Self {
        KalcClientBuilder {
            backend_url: backend_url.into(),
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            ignore_kalc_version: false,
        }
    }

    /// Per-request timeout; `None` waits forever.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Skip the server version check. Test setups only: a client should
    /// match the server release it connects to.
    pub fn ignore_kalc_version(mut self, ignore: bool) -> Self {
        self.ignore_kalc_version = ignore;
        self
    }

    pub fn build(self) -> KalcResult<KalcClient> {
        let http = KalcHttp::new(
            &self.backend_url,
            self.timeout,
            &self.user_agent,
            self.ignore_kalc_version,
        )?;
        Ok(KalcClient::from_session(Session::new(http)))
    }
}

/// Client for one Kalcium backend.
#[derive(Debug, Clone)]
pub struct KalcClient {
    session: Session,
    terminology: TerminologyService,
    search: SearchService,
    term_requests: TermRequestsService,
    base_tasks: BaseTasksService,
    analysis_profiles: AnalysisProfilesService,
    analysis: AnalysisService,
}

impl KalcClient {
    /// Client with default settings.
    pub fn new(backend_url: &str) -> KalcResult<Self> {
        KalcClientBuilder::new(backend_url).build()
    }

    pub fn builder(backend_url: impl Into<String>) -> KalcClientBuilder {
        KalcClientBuilder::new(backend_url)
    }

    fn from_session(session: Session) -> Self {
        KalcClient {
            terminology: TerminologyService::new(session.clone()),
            search: SearchService::new(session.clone()),
            term_requests: TermRequestsService::new(session.clone()),
            base_tasks: BaseTasksService::new(session.clone()),
            analysis_profiles: AnalysisProfilesService::new(session.clone()),
            analysis: AnalysisService::new(session.clone()),
            session,
        }
    }

    /// A handle on the same session whose calls abort once `token` is
    /// cancelled.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self::from_session(self.session.with_cancellation(token))
    }

    pub fn backend_url(&self) -> &Url {
        self.session.http().backend_url()
    }

    pub async fn login(&self, user_name: &str, password: &str) -> KalcResult<AuthenticationData> {
        self.session.login(user_name, password).await
    }

    pub async fn logout(&self) -> KalcResult<()> {
        self.session.logout().await
    }

    pub async fn authentication_data(&self) -> Option<AuthenticationData> {
        self.session.authentication_data().await
    }

    pub async fn session_status(&self) -> SessionStatus {
        self.session.status().await
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn terminology(&self) -> &TerminologyService {
        &self.terminology
    }

    pub fn search(&self) -> &SearchService {
        &self.search
    }

    pub fn term_requests(&self) -> &TermRequestsService {
        &self.term_requests
    }

    pub fn base_tasks(&self) -> &BaseTasksService {
        &self.base_tasks
    }

    pub fn analysis_profiles(&self) -> &AnalysisProfilesService {
        &self.analysis_profiles
    }

    pub fn analysis(&self) -> &AnalysisService {
        &self.analysis
    }
}
