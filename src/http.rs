// Transport layer: a small async HTTP client that talks to the Kalcium REST
// API. It knows nothing about sessions; the caller passes the token to attach.
// Every response goes through the version check and non-success statuses are
// turned into typed errors here, so services only ever see decoded bodies.

use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{multipart, Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use crate::error::{ApiError, KalcError, KalcResult};

/// Header carrying the session token on authenticated calls.
pub const TOKEN_HEADER: &str = "X-Kalc-Token";
/// Header on which the server reports its own version.
pub const VERSION_HEADER: &str = "X-Kalc-Version";
/// Header on which the client announces the version it was built for.
pub const CLIENT_VERSION_HEADER: &str = "X-Kalc-Client-Version";
/// Server major.minor this client speaks.
pub const SUPPORTED_KALC_VERSION: &str = "6.3";

/// Body of an outgoing request.
#[derive(Debug)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(multipart::Form),
}

/// One request to the API: method, path relative to the backend URL, extra
/// path segments, query pairs and body.
#[derive(Debug)]
pub struct KalcRequest {
    method: Method,
    path: String,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    body: RequestBody,
}

impl KalcRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        KalcRequest {
            method,
            path: path.into(),
            segments: Vec::new(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append one path segment after `path`. The value is percent-encoded on
    /// send, so `/`, `?` and `#` stay inside the segment.
    pub fn segment(mut self, value: impl ToString) -> Self {
        self.segments.push(value.to_string());
        self
    }

    /// Append a single query parameter.
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Append `key=value` once per item, the repeated-key form the server
    /// uses for id lists.
    pub fn query_all<I, T>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        self.query
            .extend(values.into_iter().map(|v| (key.to_string(), v.to_string())));
        self
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> KalcResult<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn multipart(mut self, form: multipart::Form) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }
}

/// Async HTTP client bound to one Kalcium backend.
#[derive(Clone, Debug)]
pub struct KalcHttp {
    client: Client,
    backend_url: Url,
    ignore_kalc_version: bool,
}

impl KalcHttp {
    pub(crate) fn new(
        backend_url: &str,
        timeout: Option<Duration>,
        user_agent: &str,
        ignore_kalc_version: bool,
    ) -> KalcResult<Self> {
        let mut builder = Client::builder().user_agent(user_agent.to_string());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(KalcHttp {
            client,
            backend_url: normalize_base(backend_url)?,
            ignore_kalc_version,
        })
    }

    pub fn backend_url(&self) -> &Url {
        &self.backend_url
    }

    /// Whether the server version check is bypassed. Only meant for tests
    /// against a server built from a different release line.
    pub fn ignore_kalc_version(&self) -> bool {
        self.ignore_kalc_version
    }

    /// Send a request and return the successful response.
    ///
    /// Attaches `token` when given. Fails with `Connectivity` when the
    /// exchange itself fails, `IncompatibleVersion` when the server is from
    /// another release line, `Cancelled` when `cancel` fires first, and
    /// `Api`/`NotFound`/`Unauthorized` on non-success statuses.
    pub async fn send(
        &self,
        request: KalcRequest,
        token: Option<&str>,
        cancel: Option<&CancellationToken>,
    ) -> KalcResult<Response> {
        let url = self.request_url(&request)?;
        let method = request.method.clone();

        let mut builder = self
            .client
            .request(request.method, url)
            .header(CLIENT_VERSION_HEADER, SUPPORTED_KALC_VERSION);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = token {
            builder = builder.header(TOKEN_HEADER, token);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        debug!(%method, path = %request.path, "sending Kalcium request");
        let response = cancellable(cancel, builder.send()).await?;
        let status = response.status();
        debug!(%method, path = %request.path, status = status.as_u16(), "Kalcium response");

        self.check_version(response.headers())?;
        if status.is_success() {
            return Ok(response);
        }

        let reason = status.canonical_reason().unwrap_or_default();
        let body = match cancellable(cancel, response.bytes()).await {
            Ok(body) => body,
            Err(KalcError::Cancelled) => return Err(KalcError::Cancelled),
            Err(_) => Bytes::new(),
        };
        Err(KalcError::from_api(ApiError::from_body(
            status.as_u16(),
            reason,
            &body,
        )))
    }

    /// Absolute URL of `request`: its path joined below the backend URL,
    /// then each segment pushed percent-encoded.
    pub fn request_url(&self, request: &KalcRequest) -> KalcResult<Url> {
        let mut url = self.backend_url.join(request.path.trim_start_matches('/'))?;
        if request.segments.is_empty() {
            return Ok(url);
        }
        if let Some(bad) = request
            .segments
            .iter()
            .find(|s| matches!(s.as_str(), "" | "." | ".."))
        {
            return Err(KalcError::InvalidRequest(format!(
                "'{bad}' is not a valid path segment"
            )));
        }
        url.path_segments_mut()
            .map_err(|_| KalcError::InvalidRequest("backend URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(&request.segments);
        Ok(url)
    }

    /// Read and decode a JSON body.
    pub async fn read_json<T: DeserializeOwned>(
        response: Response,
        cancel: Option<&CancellationToken>,
    ) -> KalcResult<T> {
        let body = cancellable(cancel, response.bytes()).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn read_bytes(
        response: Response,
        cancel: Option<&CancellationToken>,
    ) -> KalcResult<Bytes> {
        cancellable(cancel, response.bytes()).await
    }

    fn check_version(&self, headers: &HeaderMap) -> KalcResult<()> {
        if self.ignore_kalc_version {
            return Ok(());
        }
        let Some(server) = headers.get(VERSION_HEADER).and_then(|v| v.to_str().ok()) else {
            return Ok(());
        };
        if is_compatible(server, SUPPORTED_KALC_VERSION) {
            Ok(())
        } else {
            warn!(server, supported = SUPPORTED_KALC_VERSION, "Kalcium version mismatch");
            Err(KalcError::IncompatibleVersion {
                server: server.to_string(),
                supported: SUPPORTED_KALC_VERSION.to_string(),
            })
        }
    }
}

/// Race `fut` against the optional cancellation token.
async fn cancellable<F, T>(cancel: Option<&CancellationToken>, fut: F) -> KalcResult<T>
where
    F: Future<Output = Result<T, reqwest::Error>>,
{
    match cancel {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => Err(KalcError::Cancelled),
            result = fut => result.map_err(KalcError::Connectivity),
        },
        None => fut.await.map_err(KalcError::Connectivity),
    }
}

/// Parse the backend URL, making sure its path ends with `/` so relative
/// API paths are joined below it instead of replacing its last segment.
fn normalize_base(backend_url: &str) -> KalcResult<Url> {
    let mut url = Url::parse(backend_url.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Two versions are compatible when their major and minor numbers match.
/// An unparseable server version is never compatible.
pub fn is_compatible(server: &str, supported: &str) -> bool {
    match (major_minor(server), major_minor(supported)) {
        (Some(server), Some(supported)) => server == supported,
        _ => false,
    }
}

fn major_minor(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.trim().trim_start_matches('v').split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next().unwrap_or("0").parse().ok()?;
    Some((major, minor))
}
