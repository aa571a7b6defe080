// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP access to the Shelly REST API.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{ParseError, ProtocolError};
use crate::profile::DeviceSettings;
use crate::protocol::SensorStatusSource;
use crate::status::{DeviceStatus, SensorStatus};

const STATUS_PATH: &str = "/status";
const SETTINGS_PATH: &str = "/settings";

/// Connection parameters of a device.
///
/// # Examples
///
/// ```
/// use shellor_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("192.168.1.50")
///     .with_port(8080)
///     .with_credentials("admin", "secret")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.base_url(), "http://192.168.1.50:8080");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    use_https: bool,
    credentials: Option<(String, String)>,
    timeout: Duration,
}

impl HttpConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default HTTPS port.
    pub const DEFAULT_HTTPS_PORT: u16 = 443;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the device at `host`.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            use_https: false,
            credentials: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enables HTTPS, switching to port 443 unless a port was set.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.use_https = true;
        if self.port == Self::DEFAULT_PORT {
            self.port = Self::DEFAULT_HTTPS_PORT;
        }
        self
    }

    /// Sets basic auth credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL, omitting default ports.
    #[must_use]
    pub fn base_url(&self) -> String {
        let scheme = if self.use_https { "https" } else { "http" };
        let default_port = if self.use_https {
            Self::DEFAULT_HTTPS_PORT
        } else {
            Self::DEFAULT_PORT
        };
        if self.port == default_port {
            format!("{scheme}://{}", self.host)
        } else {
            format!("{scheme}://{}:{}", self.host, self.port)
        }
    }

    /// Creates an [`HttpClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidAddress`] for an empty host and
    /// [`ProtocolError::Http`] if the HTTP client cannot be created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        if self.host.trim().is_empty() {
            return Err(ProtocolError::InvalidAddress("host is required".to_string()));
        }

        let base_url = self.base_url();
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient {
            base_url,
            client,
            credentials: self.credentials,
            timeout: self.timeout,
        })
    }
}

/// HTTP client of a single device.
///
/// Each call is an independent `GET`; the client keeps no session.
///
/// # Examples
///
/// ```no_run
/// use shellor_lib::protocol::HttpConfig;
///
/// # async fn example() -> shellor_lib::Result<()> {
/// let client = HttpConfig::new("192.168.1.50").into_client()?;
/// let status = client.fetch_status().await?;
/// println!("uptime: {:?}", status.uptime);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
    credentials: Option<(String, String)>,
    timeout: Duration,
}

impl HttpClient {
    /// Returns the base URL of the device.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches and parses `/status`.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` on transport failures, non-success HTTP
    /// status codes and undecodable payloads.
    pub async fn fetch_status(&self) -> Result<DeviceStatus, ProtocolError> {
        self.get_json(STATUS_PATH).await
    }

    /// Fetches and parses `/settings`.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` on transport failures, non-success HTTP
    /// status codes and undecodable payloads.
    pub async fn fetch_settings(&self) -> Result<DeviceSettings, ProtocolError> {
        self.get_json(SETTINGS_PATH).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ProtocolError> {
        let body = self.get(path).await?;
        serde_json::from_str(&body).map_err(|e| ProtocolError::InvalidPayload(ParseError::Json(e)))
    }

    async fn get(&self, path: &str) -> Result<String, ProtocolError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(url = %url, "Sending HTTP request");

        let mut request = self.client.get(&url);
        if let Some((username, password)) = &self.credentials {
            request = request.basic_auth(username, Some(password));
        }

        let response = request.send().await.map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ProtocolError::AuthenticationFailed);
        }
        if !status.is_success() {
            return Err(ProtocolError::ConnectionFailed(format!(
                "HTTP {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response.text().await.map_err(|e| self.map_transport_error(e))?;
        tracing::trace!(body = %body, "Received HTTP response");
        Ok(body)
    }

    fn map_transport_error(&self, error: reqwest::Error) -> ProtocolError {
        if error.is_timeout() {
            let millis = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
            tracing::warn!(url = %self.base_url, timeout_ms = millis, "HTTP request timed out");
            ProtocolError::Timeout(millis)
        } else {
            tracing::warn!(url = %self.base_url, error = %error, "HTTP request failed");
            ProtocolError::Http(error)
        }
    }
}

impl SensorStatusSource for HttpClient {
    async fn fetch_sensor_status(&self) -> Result<SensorStatus, ProtocolError> {
        self.get_json(STATUS_PATH).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = HttpConfig::new("192.168.1.50");
        assert_eq!(config.host(), "192.168.1.50");
        assert_eq!(config.port(), 80);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.base_url(), "http://192.168.1.50");
    }

    #[test]
    fn https_switches_default_port() {
        let config = HttpConfig::new("shelly.local").with_https();
        assert_eq!(config.port(), 443);
        assert_eq!(config.base_url(), "https://shelly.local");

        let custom = HttpConfig::new("shelly.local").with_port(8443).with_https();
        assert_eq!(custom.base_url(), "https://shelly.local:8443");
    }

    #[test]
    fn into_client_keeps_credentials() {
        let client = HttpConfig::new("192.168.1.50")
            .with_credentials("admin", "secret")
            .into_client()
            .unwrap();
        assert_eq!(client.base_url(), "http://192.168.1.50");
        assert_eq!(
            client.credentials,
            Some(("admin".to_string(), "secret".to_string()))
        );
    }

    #[test]
    fn into_client_rejects_empty_host() {
        assert!(matches!(
            HttpConfig::new("  ").into_client(),
            Err(ProtocolError::InvalidAddress(_))
        ));
    }
}
