//! HTTP transport

use crate::error::ApiError;
use crate::request::Params;
use std::sync::Arc;

/// Production endpoint
pub const PRODUCTION_URL: &str = "https://api.namecheap.com/xml.response";
/// Sandbox endpoint
pub const SANDBOX_URL: &str = "https://api.sandbox.namecheap.com/xml.response";

/// Sends one request and returns the raw response body
///
/// Implementations perform exactly one round trip and never retry.
pub trait Transport {
    /// POST the parameters for `command` and return the body
    fn post(&self, command: &str, params: &Params) -> Result<String, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post(&self, command: &str, params: &Params) -> Result<String, ApiError> {
        (**self).post(command, params)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn post(&self, command: &str, params: &Params) -> Result<String, ApiError> {
        (**self).post(command, params)
    }
}

/// Blocking form-POST transport backed by reqwest
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    endpoint: reqwest::Url,
}

impl HttpTransport {
    /// Wrap a configured client and endpoint
    pub fn new(client: reqwest::blocking::Client, endpoint: reqwest::Url) -> Self {
        Self { client, endpoint }
    }

    /// The endpoint requests are sent to
    pub fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    fn post(&self, command: &str, params: &Params) -> Result<String, ApiError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .form(params.as_map())
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Network {
                message: format!("{} returned HTTP {}", command, status),
                status: Some(status),
                source: None,
            });
        }

        response.text().map_err(ApiError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use mockito::Matcher;
    use std::time::Duration;

    fn transport(server: &mockito::Server) -> HttpTransport {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        let endpoint = reqwest::Url::parse(&format!("{}/xml.response", server.url())).unwrap();
        HttpTransport::new(client, endpoint)
    }

    #[test]
    fn test_post_sends_form_encoded_params() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/xml.response")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("Command".into(), "namecheap.domains.check".into()),
                Matcher::UrlEncoded("DomainList".into(), "a.com,b.net".into()),
            ]))
            .with_status(200)
            .with_body("<ApiResponse Status=\"OK\"/>")
            .expect(1)
            .create();

        let params = Params::new()
            .with("Command", "namecheap.domains.check")
            .with("DomainList", "a.com,b.net");
        let body = transport(&server).post("namecheap.domains.check", &params).unwrap();

        assert_eq!(body, "<ApiResponse Status=\"OK\"/>");
        mock.assert();
    }

    #[test]
    fn test_non_success_status_is_network_error() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/xml.response")
            .with_status(503)
            .with_body("unavailable")
            .expect(1)
            .create();

        let err = transport(&server)
            .post("namecheap.users.getBalances", &Params::new())
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.code(), Some(503));
        assert!(err.message().contains("namecheap.users.getBalances"));
        mock.assert();
    }

    #[test]
    fn test_connection_failure_is_network_error() {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        // Port 9 (discard) on localhost is expected to refuse connections
        let endpoint = reqwest::Url::parse("http://127.0.0.1:9/xml.response").unwrap();
        let err = HttpTransport::new(client, endpoint)
            .post("namecheap.users.getBalances", &Params::new())
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(err.code().is_none());
    }

    #[test]
    fn test_timeout_is_network_error() {
        // Connections complete in the backlog but no response is ever written
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(300))
            .build()
            .unwrap();
        let endpoint = reqwest::Url::parse(&format!("http://{}/xml.response", addr)).unwrap();

        let started = std::time::Instant::now();
        let err = HttpTransport::new(client, endpoint)
            .post("namecheap.users.getBalances", &Params::new())
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.message(), "request timed out");
        assert!(err.code().is_none());
        assert!(started.elapsed() < Duration::from_secs(5));
        drop(listener);
    }
}
