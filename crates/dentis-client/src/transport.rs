//! Shared HTTP transport for all service clients.

use std::sync::Arc;
use std::time::Duration;

use dentis_core::SessionContext;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};

/// Tracing target for transport operations.
pub const TRACING_TARGET: &str = "dentis_client::transport";

/// The backend a request is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Auth service: login, staff accounts, notifications, chat.
    Auth,
    /// Patient service: patient records, reviews, appointments, billing.
    Patients,
    /// Lab-order service.
    LabOrders,
    /// Clinic-inventory service.
    Inventory,
}

/// Base URLs resolved once at transport construction.
#[derive(Debug, Clone)]
struct Endpoints {
    auth: Url,
    patients: Url,
    lab: Url,
    inventory: Url,
}

impl Endpoints {
    fn resolve(config: &ClientConfig) -> ApiResult<Self> {
        Ok(Self {
            auth: ClientConfig::parse_base_url(&config.auth_base_url)?,
            patients: ClientConfig::parse_base_url(&config.patient_base_url)?,
            lab: ClientConfig::parse_base_url(&config.lab_base_url)?,
            inventory: ClientConfig::parse_base_url(&config.inventory_base_url)?,
        })
    }

    fn base(&self, service: Service) -> &Url {
        match service {
            Service::Auth => &self.auth,
            Service::Patients => &self.patients,
            Service::LabOrders => &self.lab,
            Service::Inventory => &self.inventory,
        }
    }
}

/// Inner transport that holds the HTTP client and configuration.
struct TransportInner {
    http: Client,
    config: ClientConfig,
    endpoints: Endpoints,
    session: SessionContext,
}

impl std::fmt::Debug for TransportInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportInner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Shared HTTP transport for the Dentis backends.
///
/// Owns one [`reqwest::Client`], the resolved service endpoints, and the
/// [`SessionContext`] whose bearer token authenticates requests. Cheap to
/// clone; every service client holds a clone of the same transport.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    inner: Arc<TransportInner>,
}

/// Error-shaped response body used by the backends.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl HttpTransport {
    /// Creates a new transport from configuration and a session context.
    ///
    /// # Errors
    ///
    /// Returns an error if a base URL is invalid or the HTTP client cannot
    /// be created.
    pub fn new(config: ClientConfig, session: SessionContext) -> ApiResult<Self> {
        tracing::debug!(
            target: TRACING_TARGET,
            timeout_secs = config.request_timeout_secs,
            "Creating HTTP transport"
        );

        let endpoints = Endpoints::resolve(&config)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.effective_user_agent())
            .build()?;

        let inner = TransportInner {
            http,
            config,
            endpoints,
            session,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the transport configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Gets the session context this transport authenticates with.
    pub fn session(&self) -> &SessionContext {
        &self.inner.session
    }

    /// Issues an authenticated GET request.
    pub(crate) async fn get<T, Q>(
        &self,
        service: Service,
        path: &str,
        query: Option<&Q>,
    ) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let token = self.require_token()?;
        let url = self.endpoint(service, path)?;

        let mut request = self.inner.http.get(url).bearer_auth(token);
        if let Some(query) = query {
            request = request.query(query);
        }

        self.execute(Method::GET, service, path, request).await
    }

    /// Issues an authenticated POST request with a JSON body.
    pub(crate) async fn post<T, B>(&self, service: Service, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let token = self.require_token()?;
        let url = self.endpoint(service, path)?;
        let request = self.inner.http.post(url).bearer_auth(token).json(body);

        self.execute(Method::POST, service, path, request).await
    }

    /// Issues an authenticated PUT request with a JSON body.
    pub(crate) async fn put<T, B>(&self, service: Service, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let token = self.require_token()?;
        let url = self.endpoint(service, path)?;
        let request = self.inner.http.put(url).bearer_auth(token).json(body);

        self.execute(Method::PUT, service, path, request).await
    }

    /// Issues an unauthenticated POST request with a JSON body.
    ///
    /// Only the login endpoint is reachable without a session.
    pub(crate) async fn post_public<T, B>(
        &self,
        service: Service,
        path: &str,
        body: &B,
    ) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(service, path)?;
        let request = self.inner.http.post(url).json(body);

        self.execute(Method::POST, service, path, request).await
    }

    fn require_token(&self) -> ApiResult<String> {
        self.inner.session.bearer_token().ok_or(ApiError::Session)
    }

    fn endpoint(&self, service: Service, path: &str) -> ApiResult<Url> {
        self.inner
            .endpoints
            .base(service)
            .join(path)
            .map_err(|error| ApiError::Config(format!("invalid endpoint path `{path}`: {error}")))
    }

    async fn execute<T>(
        &self,
        method: Method,
        service: Service,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        tracing::debug!(
            target: TRACING_TARGET,
            method = %method,
            service = ?service,
            path,
            "Issuing backend request"
        );

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(Self::status_error(status, &bytes, service, path));
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    fn status_error(status: StatusCode, body: &[u8], service: Service, path: &str) -> ApiError {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .map(|body| body.message)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });

        tracing::warn!(
            target: TRACING_TARGET,
            service = ?service,
            path,
            status = status.as_u16(),
            message = %message,
            "Backend request failed"
        );

        ApiError::Status {
            code: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::testing;

    use super::*;

    #[derive(Debug, serde::Deserialize)]
    struct Pong {
        ok: bool,
    }

    #[tokio::test]
    async fn attaches_bearer_token_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/lab/ping"))
            .and(header("authorization", "Bearer test-token"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        let transport = testing::transport(&server.uri());
        let pong: Pong = transport
            .get(Service::LabOrders, "ping", Some(&[("limit", "10")]))
            .await
            .expect("request succeeds");

        assert!(pong.ok);
    }

    #[tokio::test]
    async fn authenticated_call_without_session_fails_locally() {
        let server = MockServer::start().await;
        let transport = testing::transport_without_session(&server.uri());

        let result: ApiResult<Pong> = transport.get(Service::LabOrders, "ping", None::<&()>).await;
        assert!(matches!(result, Err(ApiError::Session)));
        // Nothing reached the server.
        assert!(server.received_requests().await.expect("recorded").is_empty());
    }

    #[tokio::test]
    async fn error_status_maps_to_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/lab/ping"))
            .respond_with(
                ResponseTemplate::new(503).set_body_json(json!({ "message": "maintenance" })),
            )
            .mount(&server)
            .await;

        let transport = testing::transport(&server.uri());
        let result: ApiResult<Pong> = transport.get(Service::LabOrders, "ping", None::<&()>).await;

        match result {
            Err(ApiError::Status { code, message }) => {
                assert_eq!(code, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn error_status_without_body_uses_canonical_reason() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/lab/ping"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let transport = testing::transport(&server.uri());
        let result: ApiResult<Pong> = transport.get(Service::LabOrders, "ping", None::<&()>).await;

        match result {
            Err(error) => {
                assert!(error.is_not_found());
                assert!(!error.is_transient());
            }
            Ok(_) => panic!("expected error"),
        }
    }

    #[tokio::test]
    async fn undecodable_body_maps_to_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/lab/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let transport = testing::transport(&server.uri());
        let result: ApiResult<Pong> = transport.get(Service::LabOrders, "ping", None::<&()>).await;
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }
}
