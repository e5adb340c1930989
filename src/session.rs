// Session manager: owns the login/logout lifecycle and the token every
// resource service sends. One `Session` belongs to one client; clones share
// the same state.

use std::sync::Arc;

use bytes::Bytes;
use reqwest::Response;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{KalcError, KalcResult};
use crate::http::{KalcHttp, KalcRequest};
use crate::models::account::{LoginRequest, LoginResponse};
use crate::models::AuthenticationData;

const LOGIN_PATH: &str = "api/account/login";
const LOGOUT_PATH: &str = "api/account/logout";

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Unauthenticated,
    Authenticated,
    /// The server rejected the token (401/403); login again.
    Expired,
}

#[derive(Debug)]
enum SessionState {
    Unauthenticated,
    Authenticated {
        token: String,
        authentication_data: AuthenticationData,
    },
    Expired,
}

#[derive(Debug)]
struct SessionShared {
    http: KalcHttp,
    state: RwLock<SessionState>,
}

/// Authenticated access to the API.
///
/// Calls read the token concurrently; login, logout and expiry take the
/// write lock, so they wait for in-progress reads and block new ones.
#[derive(Debug, Clone)]
pub struct Session {
    shared: Arc<SessionShared>,
    cancel: Option<CancellationToken>,
}

impl Session {
    pub(crate) fn new(http: KalcHttp) -> Self {
        Session {
            shared: Arc::new(SessionShared {
                http,
                state: RwLock::new(SessionState::Unauthenticated),
            }),
            cancel: None,
        }
    }

    pub fn http(&self) -> &KalcHttp {
        &self.shared.http
    }

    /// The same session, with every call aborted once `token` is cancelled.
    pub fn with_cancellation(&self, token: CancellationToken) -> Session {
        Session {
            shared: Arc::clone(&self.shared),
            cancel: Some(token),
        }
    }

    pub async fn status(&self) -> SessionStatus {
        match &*self.shared.state.read().await {
            SessionState::Unauthenticated => SessionStatus::Unauthenticated,
            SessionState::Authenticated { .. } => SessionStatus::Authenticated,
            SessionState::Expired => SessionStatus::Expired,
        }
    }

    /// Groups and permissions of the logged-in user.
    pub async fn authentication_data(&self) -> Option<AuthenticationData> {
        match &*self.shared.state.read().await {
            SessionState::Authenticated {
                authentication_data,
                ..
            } => Some(authentication_data.clone()),
            _ => None,
        }
    }

    /// Log in and keep the returned token for subsequent calls.
    ///
    /// Bad credentials fail with `Unauthorized` and leave the current state
    /// untouched.
    pub async fn login(&self, user_name: &str, password: &str) -> KalcResult<AuthenticationData> {
        let mut state = self.shared.state.write().await;
        let request = KalcRequest::post(LOGIN_PATH).json(&LoginRequest {
            user_name,
            password,
        })?;
        let response = self
            .shared
            .http
            .send(request, None, self.cancel.as_ref())
            .await?;
        let login: LoginResponse = KalcHttp::read_json(response, self.cancel.as_ref()).await?;

        info!(
            user = user_name,
            groups = login.authentication_data.groups.len(),
            "logged in to Kalcium"
        );
        *state = SessionState::Authenticated {
            token: login.token,
            authentication_data: login.authentication_data.clone(),
        };
        Ok(login.authentication_data)
    }

    /// End the session on the server and forget the token.
    ///
    /// The local state is cleared even when the server call fails; that
    /// failure is still returned. Without an active session this is a no-op.
    pub async fn logout(&self) -> KalcResult<()> {
        let mut state = self.shared.state.write().await;
        let token = match std::mem::replace(&mut *state, SessionState::Unauthenticated) {
            SessionState::Authenticated { token, .. } => token,
            _ => {
                debug!("logout without an active session");
                return Ok(());
            }
        };
        self.shared
            .http
            .send(KalcRequest::post(LOGOUT_PATH), Some(&token), self.cancel.as_ref())
            .await?;
        info!("logged out of Kalcium");
        Ok(())
    }

    /// Send an authenticated request.
    pub(crate) async fn send(&self, request: KalcRequest) -> KalcResult<Response> {
        let token = match &*self.shared.state.read().await {
            SessionState::Authenticated { token, .. } => token.clone(),
            SessionState::Unauthenticated => return Err(KalcError::NotAuthenticated),
            SessionState::Expired => return Err(KalcError::SessionExpired),
        };
        match self
            .shared
            .http
            .send(request, Some(&token), self.cancel.as_ref())
            .await
        {
            Err(KalcError::Unauthorized(error)) => {
                self.expire(&token).await;
                Err(KalcError::Unauthorized(error))
            }
            other => other,
        }
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(&self, request: KalcRequest) -> KalcResult<T> {
        let response = self.send(request).await?;
        KalcHttp::read_json(response, self.cancel.as_ref()).await
    }

    pub(crate) async fn send_bytes(&self, request: KalcRequest) -> KalcResult<Bytes> {
        let response = self.send(request).await?;
        KalcHttp::read_bytes(response, self.cancel.as_ref()).await
    }

    pub(crate) async fn send_unit(&self, request: KalcRequest) -> KalcResult<()> {
        self.send(request).await.map(drop)
    }

    /// Mark the session expired, unless a new login replaced `token` meanwhile.
    async fn expire(&self, token: &str) {
        let mut state = self.shared.state.write().await;
        if matches!(&*state, SessionState::Authenticated { token: current, .. } if current == token)
        {
            warn!("Kalcium rejected the session token, session expired");
            *state = SessionState::Expired;
        }
    }
}
