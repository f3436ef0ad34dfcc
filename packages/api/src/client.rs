//! # HostedClient: HTTP access to the hosted auth + row-storage service
//!
//! Implements [`store::Backend`] against a Supabase-style service:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | `sign_up` | `POST /auth/v1/signup` |
//! | `sign_in` | `POST /auth/v1/token?grant_type=password` |
//! | `sign_out` | `POST /auth/v1/logout` |
//! | `reset_password_for_email` | `POST /auth/v1/recover?redirect_to=...` |
//! | `current_user` | `GET /auth/v1/user` |
//! | `select` | `GET /rest/v1/<table>?select=<cols>&<col>=eq.<value>` |
//! | `insert` | `POST /rest/v1/<table>` |
//! | `update` | `PATCH /rest/v1/<table>?<col>=eq.<value>` |
//!
//! Every request carries the `apikey` header. The bearer token is the session's
//! access token once signed in and the anon key otherwise.
//!
//! The session lives only in this object. It is not persisted and its token is
//! never refreshed; there are no timeouts or retries.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Deserialize;
use tokio::sync::RwLock;

use store::{AuthUser, Backend, BackendConfig, BackendError, Filter, Row, Session};

use crate::error::AppError;

/// Client handle for one hosted project. Build once at startup and share.
pub struct HostedClient {
    http: Client,
    base_url: Url,
    anon_key: String,
    session: RwLock<Option<Session>>,
}

/// Error bodies from the auth service and the row service use different keys.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
    error_code: Option<String>,
    code: Option<serde_json::Value>,
}

/// Sign-up answers with a session when no email confirmation is required,
/// and with the bare user otherwise.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(Session),
    User(AuthUser),
}

/// Decode a sign-up body. An unrecognised body yields `None`.
fn parse_sign_up(body: &str) -> Option<SignUpResponse> {
    match serde_json::from_str(body) {
        Ok(response) => Some(response),
        Err(e) => {
            tracing::warn!(error = %e, "could not decode sign-up response");
            None
        }
    }
}

/// Turn a non-success response into a [`BackendError`].
pub(crate) fn parse_error(status: u16, body: &str) -> BackendError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

    let message = parsed
        .msg
        .or(parsed.message)
        .or(parsed.error_description)
        .or(parsed.error.clone())
        .unwrap_or_else(|| format!("HTTP {status}"));

    let code = parsed.error_code.or_else(|| match parsed.code {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => parsed.error,
    });

    let err = BackendError::new(message).with_status(status);
    match code {
        Some(code) => err.with_code(code),
        None => err,
    }
}

fn transport_error(e: reqwest::Error) -> BackendError {
    BackendError::new(format!("Network request failed: {e}"))
}

fn decode_error(e: serde_json::Error) -> BackendError {
    BackendError::new(format!("Unexpected response from server: {e}"))
}

/// Build a row-service URL for `table`, optionally with a projection and filter.
pub(crate) fn rest_url(
    base: &Url,
    table: &str,
    columns: Option<&str>,
    filter: Option<&Filter>,
) -> Result<Url, BackendError> {
    let mut url = base
        .join(&format!("rest/v1/{table}"))
        .map_err(|e| BackendError::new(e.to_string()))?;
    if columns.is_some() || filter.is_some() {
        let mut query = url.query_pairs_mut();
        if let Some(columns) = columns {
            query.append_pair("select", &columns.replace(' ', ""));
        }
        if let Some(filter) = filter {
            query.append_pair(&filter.column, &format!("eq.{}", filter.value));
        }
    }
    Ok(url)
}

/// Build an auth-service URL with extra query parameters.
pub(crate) fn auth_url(base: &Url, path: &str, params: &[(&str, &str)]) -> Result<Url, BackendError> {
    let mut url = base
        .join(&format!("auth/v1/{path}"))
        .map_err(|e| BackendError::new(e.to_string()))?;
    if !params.is_empty() {
        let mut query = url.query_pairs_mut();
        for (k, v) in params {
            query.append_pair(k, v);
        }
    }
    Ok(url)
}

impl HostedClient {
    /// Create a client for the project at `url` using its public `anon_key`.
    pub fn new(url: &str, anon_key: &str) -> Result<Self, AppError> {
        let trimmed = url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(AppError::Config("backend url is empty".to_string()));
        }
        let base_url = Url::parse(&format!("{trimmed}/"))
            .map_err(|e| AppError::Config(format!("invalid backend url '{url}': {e}")))?;

        Ok(Self {
            http: Client::new(),
            base_url,
            anon_key: anon_key.to_string(),
            session: RwLock::new(None),
        })
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, AppError> {
        if config.anon_key.is_empty() {
            tracing::warn!("backend anon key is empty; requests will likely be rejected");
        }
        Self::new(&config.url, &config.anon_key)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    async fn bearer(&self) -> String {
        match self.session.read().await.as_ref() {
            Some(session) => session.access_token.clone(),
            None => self.anon_key.clone(),
        }
    }

    async fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!(%method, %url, "backend request");
        let token = self.bearer().await;
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
    }

    /// Send and return the body of a successful response.
    async fn send(&self, request: RequestBuilder) -> Result<String, BackendError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(parse_error(status.as_u16(), &body));
        }
        Ok(body)
    }

    async fn store_session(&self, session: Session) {
        *self.session.write().await = Some(session);
    }
}

#[async_trait]
impl Backend for HostedClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<AuthUser>, BackendError> {
        let url = auth_url(&self.base_url, "signup", &[])?;
        let request = self
            .request(Method::POST, url)
            .await
            .json(&serde_json::json!({ "email": email, "password": password }));
        let body = self.send(request).await?;

        match parse_sign_up(&body) {
            Some(SignUpResponse::Session(session)) => {
                let user = session.user.clone();
                self.store_session(session).await;
                Ok(Some(user))
            }
            Some(SignUpResponse::User(user)) => Ok(Some(user)),
            None => Ok(None),
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Option<AuthUser>, BackendError> {
        let url = auth_url(&self.base_url, "token", &[("grant_type", "password")])?;
        let request = self
            .request(Method::POST, url)
            .await
            .json(&serde_json::json!({ "email": email, "password": password }));
        let body = self.send(request).await?;

        let session: Session = serde_json::from_str(&body).map_err(decode_error)?;
        let user = session.user.clone();
        self.store_session(session).await;
        Ok(Some(user))
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        // The local session goes away whatever the server says.
        let Some(session) = self.session.write().await.take() else {
            return Ok(());
        };

        let url = auth_url(&self.base_url, "logout", &[])?;
        let request = self
            .http
            .post(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token);

        match self.send(request).await {
            Ok(_) => Ok(()),
            // Token already revoked or expired: nothing left to sign out of.
            Err(e) if matches!(e.status, Some(401) | Some(403) | Some(404)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<(), BackendError> {
        let url = auth_url(&self.base_url, "recover", &[("redirect_to", redirect_to)])?;
        let request = self
            .request(Method::POST, url)
            .await
            .json(&serde_json::json!({ "email": email }));
        self.send(request).await.map(|_| ())
    }

    async fn current_user(&self) -> Result<Option<AuthUser>, BackendError> {
        if self.session.read().await.is_none() {
            return Ok(None);
        }
        let url = auth_url(&self.base_url, "user", &[])?;
        let request = self.request(Method::GET, url).await;
        let body = self.send(request).await?;
        let user: AuthUser = serde_json::from_str(&body).map_err(decode_error)?;
        Ok(Some(user))
    }

    async fn select(
        &self,
        table: &str,
        columns: &str,
        filter: &Filter,
    ) -> Result<Vec<Row>, BackendError> {
        let url = rest_url(&self.base_url, table, Some(columns), Some(filter))?;
        let request = self.request(Method::GET, url).await;
        let body = self.send(request).await?;
        serde_json::from_str(&body).map_err(decode_error)
    }

    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<(), BackendError> {
        let url = rest_url(&self.base_url, table, None, None)?;
        let request = self
            .request(Method::POST, url)
            .await
            .header("Prefer", "return=minimal")
            .json(&rows);
        self.send(request).await.map(|_| ())
    }

    async fn update(&self, table: &str, fields: Row, filter: &Filter) -> Result<(), BackendError> {
        let url = rest_url(&self.base_url, table, None, Some(filter))?;
        let request = self
            .request(Method::PATCH, url)
            .await
            .header("Prefer", "return=minimal")
            .json(&fields);
        self.send(request).await.map(|_| ())
    }
}
