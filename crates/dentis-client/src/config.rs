//! Configuration for the Dentis service clients.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ApiError, ApiResult};

/// Default values for configuration options.
mod defaults {
    /// Default auth service base URL for development.
    pub const AUTH_BASE_URL: &str = "http://localhost:7001/api/auth/";

    /// Default patient service base URL for development.
    pub const PATIENT_BASE_URL: &str = "http://localhost:7002/api/patients/";

    /// Default lab-order service base URL for development.
    pub const LAB_BASE_URL: &str = "http://localhost:7003/api/lab/";

    /// Default clinic-inventory service base URL for development.
    pub const INVENTORY_BASE_URL: &str = "http://localhost:7004/api/inventory/";

    /// Default request timeout in seconds.
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Default user agent string.
    pub fn user_agent() -> String {
        format!("dentis/{}", env!("CARGO_PKG_VERSION"))
    }
}

/// Configuration for the shared HTTP transport and service clients.
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[must_use = "config does nothing unless you use it"]
#[builder(
    pattern = "owned",
    setter(into, prefix = "with"),
    build_fn(validate = "Self::validate")
)]
pub struct ClientConfig {
    /// Auth service base URL.
    #[builder(default = "defaults::AUTH_BASE_URL.to_string()")]
    pub auth_base_url: String,

    /// Patient service base URL.
    #[builder(default = "defaults::PATIENT_BASE_URL.to_string()")]
    pub patient_base_url: String,

    /// Lab-order service base URL.
    #[builder(default = "defaults::LAB_BASE_URL.to_string()")]
    pub lab_base_url: String,

    /// Clinic-inventory service base URL.
    #[builder(default = "defaults::INVENTORY_BASE_URL.to_string()")]
    pub inventory_base_url: String,

    /// Timeout for backend requests in seconds.
    #[builder(default = "defaults::REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: u64,

    /// User-Agent header to send with requests.
    #[builder(default = "defaults::user_agent()")]
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            auth_base_url: defaults::AUTH_BASE_URL.to_string(),
            patient_base_url: defaults::PATIENT_BASE_URL.to_string(),
            lab_base_url: defaults::LAB_BASE_URL.to_string(),
            inventory_base_url: defaults::INVENTORY_BASE_URL.to_string(),
            request_timeout_secs: defaults::REQUEST_TIMEOUT_SECS,
            user_agent: defaults::user_agent(),
        }
    }
}

impl ClientConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Returns the effective user agent, using the default if empty.
    pub fn effective_user_agent(&self) -> String {
        if self.user_agent.is_empty() {
            defaults::user_agent()
        } else {
            self.user_agent.clone()
        }
    }

    /// Parses and normalizes a base URL.
    ///
    /// Requires an http(s) URL; a missing trailing slash is added so that
    /// joining relative endpoint paths cannot drop the final path segment.
    pub(crate) fn parse_base_url(raw: &str) -> ApiResult<Url> {
        let mut url = Url::parse(raw)
            .map_err(|error| ApiError::Config(format!("invalid base URL `{raw}`: {error}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "unsupported URL scheme `{}` in `{raw}`",
                url.scheme()
            )));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(url)
    }
}

impl ClientConfigBuilder {
    /// Validates the configuration before it is built.
    fn validate(&self) -> Result<(), String> {
        if self.request_timeout_secs == Some(0) {
            return Err("request timeout must be greater than zero".to_string());
        }

        for raw in [
            self.auth_base_url.as_deref(),
            self.patient_base_url.as_deref(),
            self.lab_base_url.as_deref(),
            self.inventory_base_url.as_deref(),
        ]
        .into_iter()
        .flatten()
        {
            ClientConfig::parse_base_url(raw).map_err(|error| error.to_string())?;
        }

        Ok(())
    }
}
