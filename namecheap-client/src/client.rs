//! Namecheap client and builder

use crate::error::ApiError;
use crate::normalize::{ResponseFormat, normalize};
use crate::outcome::{CallOutcome, extract_outcome};
use crate::request::{Credentials, Params, build_params};
use crate::transport::{HttpTransport, PRODUCTION_URL, SANDBOX_URL, Transport};
use std::net::IpAddr;
use std::time::{Duration, Instant};
use tracing::debug;
use zeroize::Zeroizing;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The main Namecheap API client
///
/// Every operation is one blocking round trip: build the parameters, POST
/// them, normalize the body and either return the [`CallOutcome`] or a
/// classified [`ApiError`]. The client holds only immutable configuration,
/// so it can be cloned freely and shared across threads.
///
/// # Example
///
/// ```no_run
/// use namecheap_client::NamecheapClient;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = NamecheapClient::builder()
///     .api_user("apiuser")
///     .api_key("0123456789abcdef")
///     .client_ip("192.0.2.10")
///     .sandbox(true)
///     .build()?;
///
/// for check in client.domains().check(&["example.com", "example.net"])? {
///     println!("{}: available={}", check.domain, check.available);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct NamecheapClient<T = HttpTransport> {
    transport: T,
    credentials: Credentials,
    format: ResponseFormat,
}

impl NamecheapClient<HttpTransport> {
    /// Create a builder for configuring the client
    pub fn builder() -> NamecheapClientBuilder {
        NamecheapClientBuilder::new()
    }
}

impl<T: Transport> NamecheapClient<T> {
    /// Assemble a client from already validated parts
    pub fn from_parts(transport: T, credentials: Credentials, format: ResponseFormat) -> Self {
        Self {
            transport,
            credentials,
            format,
        }
    }

    /// Credentials sent with every request
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Format responses are parsed as
    pub fn response_format(&self) -> ResponseFormat {
        self.format
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run any command and return its outcome
    ///
    /// This is the escape hatch for commands without a typed helper.
    ///
    /// # Errors
    ///
    /// * `ApiError::Network` - transport failure or non-success HTTP status
    /// * `ApiError::Parse` - malformed body
    /// * `ApiError::Authentication`, `ApiError::Validation`, `ApiError::Api` -
    ///   the registrar reported a failure
    pub fn call(&self, command: &str, params: Params) -> Result<CallOutcome, ApiError> {
        let params = build_params(&self.credentials, command, params);

        let started = Instant::now();
        debug!(command, params = params.len(), "Sending Namecheap request");
        let raw = self.transport.post(command, &params)?;
        debug!(
            command,
            bytes = raw.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Received Namecheap response"
        );

        let payload = normalize(&raw, self.format)?;
        extract_outcome(payload, command)
    }
}

/// Builder for configuring a Namecheap client
///
/// Validation happens in [`build`](Self::build): missing credentials, an
/// unparsable client IP or a zero timeout fail there, before any request.
///
/// # Example
///
/// ```no_run
/// use namecheap_client::NamecheapClient;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // From NAMECHEAP_* environment variables, with a tighter timeout
/// let client = NamecheapClient::builder()
///     .with_env()
///     .timeout(Duration::from_secs(10))
///     .build()?;
///
/// // Against a local mock server
/// let client = NamecheapClient::builder()
///     .api_user("apiuser")
///     .api_key("key")
///     .client_ip("127.0.0.1")
///     .base_url("http://localhost:1234/xml.response")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct NamecheapClientBuilder {
    api_user: Option<String>,
    api_key: Option<Zeroizing<String>>,
    username: Option<String>,
    client_ip: Option<String>,
    sandbox: bool,
    base_url: Option<reqwest::Url>,
    timeout: Option<Duration>,
    format: ResponseFormat,
    client_builder: Option<reqwest::blocking::ClientBuilder>,
}

impl std::fmt::Debug for NamecheapClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamecheapClientBuilder")
            .field("api_user", &self.api_user)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("username", &self.username)
            .field("client_ip", &self.client_ip)
            .field("sandbox", &self.sandbox)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl NamecheapClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill unset fields from `NAMECHEAP_API_USER`, `NAMECHEAP_API_KEY`,
    /// `NAMECHEAP_USERNAME`, `NAMECHEAP_CLIENT_IP` and `NAMECHEAP_SANDBOX`
    pub fn with_env(self) -> Self {
        self.with_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn with_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if self.api_user.is_none() {
            self.api_user = lookup("NAMECHEAP_API_USER");
        }
        if self.api_key.is_none() {
            self.api_key = lookup("NAMECHEAP_API_KEY").map(Zeroizing::new);
        }
        if self.username.is_none() {
            self.username = lookup("NAMECHEAP_USERNAME");
        }
        if self.client_ip.is_none() {
            self.client_ip = lookup("NAMECHEAP_CLIENT_IP");
        }
        if let Some(flag) = lookup("NAMECHEAP_SANDBOX") {
            self.sandbox = matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        self
    }

    /// API user name
    pub fn api_user(mut self, api_user: impl Into<String>) -> Self {
        self.api_user = Some(api_user.into());
        self
    }

    /// API key; zeroized on drop
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Zeroizing::new(api_key.into()));
        self
    }

    /// User to act on behalf of; defaults to the API user
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Whitelisted IPv4 or IPv6 address of the caller
    pub fn client_ip(mut self, client_ip: impl Into<String>) -> Self {
        self.client_ip = Some(client_ip.into());
        self
    }

    /// Use the sandbox endpoint
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Override the endpoint, e.g. for a mock server
    ///
    /// Takes precedence over [`sandbox`](Self::sandbox).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the URL cannot be parsed.
    pub fn base_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, ApiError> {
        let url = url
            .into_url()
            .map_err(|e| ApiError::Config(format!("invalid base URL: {}", e)))?;
        self.base_url = Some(url);
        Ok(self)
    }

    /// Per-request timeout, default 30 seconds
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Format to parse responses as, default XML
    pub fn response_format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }

    /// Custom HTTP client builder (proxies, TLS roots, ...)
    ///
    /// The configured timeout is always applied on top of it.
    pub fn client_builder(mut self, builder: reqwest::blocking::ClientBuilder) -> Self {
        self.client_builder = Some(builder);
        self
    }

    /// Endpoint the built client will use
    pub fn endpoint(&self) -> Result<reqwest::Url, ApiError> {
        if let Some(url) = &self.base_url {
            return Ok(url.clone());
        }
        let url = if self.sandbox { SANDBOX_URL } else { PRODUCTION_URL };
        reqwest::Url::parse(url).map_err(|e| ApiError::Config(format!("invalid base URL: {}", e)))
    }

    /// Build the client with an HTTP transport
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if a required setting is missing or invalid,
    /// or if the HTTP client cannot be initialized.
    pub fn build(mut self) -> Result<NamecheapClient<HttpTransport>, ApiError> {
        let credentials = self.credentials()?;
        let timeout = self.checked_timeout()?;
        let endpoint = self.endpoint()?;

        let builder = self
            .client_builder
            .take()
            .unwrap_or_else(|| reqwest::blocking::Client::builder().use_rustls_tls());
        let client = builder
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Config(format!("HTTP client initialization failed: {}", e)))?;

        debug!(endpoint = %endpoint, api_user = credentials.api_user(), "Built Namecheap client");
        Ok(NamecheapClient::from_parts(
            HttpTransport::new(client, endpoint),
            credentials,
            self.format,
        ))
    }

    /// Build the client around a custom transport
    ///
    /// Credentials are validated exactly as in [`build`](Self::build); the
    /// endpoint, timeout and HTTP client settings are ignored.
    pub fn build_with_transport<T: Transport>(self, transport: T) -> Result<NamecheapClient<T>, ApiError> {
        let credentials = self.credentials()?;
        Ok(NamecheapClient::from_parts(transport, credentials, self.format))
    }

    fn credentials(&self) -> Result<Credentials, ApiError> {
        let api_user = required(self.api_user.as_deref(), "api_user")?;
        let api_key = required(self.api_key.as_deref().map(String::as_str), "api_key")?;
        let client_ip = required(self.client_ip.as_deref(), "client_ip")?;
        let client_ip: IpAddr = client_ip
            .parse()
            .map_err(|_| ApiError::Config(format!("client_ip {:?} is not an IP address", client_ip)))?;
        let username = match self.username.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => api_user,
        };

        Ok(Credentials::new(api_user, api_key, username, client_ip))
    }

    fn checked_timeout(&self) -> Result<Duration, ApiError> {
        match self.timeout {
            Some(t) if t.is_zero() => Err(ApiError::Config("timeout must be greater than zero".to_string())),
            Some(t) => Ok(t),
            None => Ok(DEFAULT_TIMEOUT),
        }
    }
}

fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, ApiError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::Config(format!("{} is required", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use mockito::Matcher;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn configured() -> NamecheapClientBuilder {
        NamecheapClient::builder()
            .api_user("apiuser")
            .api_key("secret")
            .client_ip("192.0.2.10")
    }

    #[test]
    fn test_missing_fields_fail_fast() {
        for (builder, field) in [
            (NamecheapClient::builder().api_key("k").client_ip("192.0.2.1"), "api_user"),
            (NamecheapClient::builder().api_user("u").client_ip("192.0.2.1"), "api_key"),
            (NamecheapClient::builder().api_user("u").api_key("k"), "client_ip"),
            (NamecheapClient::builder().api_user("  ").api_key("k").client_ip("192.0.2.1"), "api_user"),
        ] {
            let err = builder.build().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Config);
            assert!(err.message().contains(field), "{}", err);
        }
    }

    #[test]
    fn test_debug_redacts_key() {
        let shown = format!("{:?}", configured());
        assert!(!shown.contains("secret"));
    }

    #[test]
    fn test_invalid_client_ip() {
        let err = configured().client_ip("not-an-ip").build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = configured().timeout(Duration::ZERO).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_invalid_base_url() {
        let result = NamecheapClient::builder().base_url("not a valid url");
        assert!(matches!(result, Err(ApiError::Config(_))));
    }

    #[test]
    fn test_username_defaults_to_api_user() {
        let client = configured().build().unwrap();
        assert_eq!(client.credentials().username(), "apiuser");

        let client = configured().username("reseller").build().unwrap();
        assert_eq!(client.credentials().username(), "reseller");
    }

    #[test]
    fn test_endpoint_selection() {
        assert_eq!(configured().endpoint().unwrap().as_str(), PRODUCTION_URL);
        assert_eq!(configured().sandbox(true).endpoint().unwrap().as_str(), SANDBOX_URL);

        let custom = configured()
            .sandbox(true)
            .base_url("http://localhost:8080/xml.response")
            .unwrap();
        assert_eq!(custom.endpoint().unwrap().as_str(), "http://localhost:8080/xml.response");
    }

    #[test]
    fn test_with_lookup_fills_unset_fields() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("NAMECHEAP_API_USER", "envuser"),
            ("NAMECHEAP_API_KEY", "envkey"),
            ("NAMECHEAP_CLIENT_IP", "2001:db8::1"),
            ("NAMECHEAP_SANDBOX", "TRUE"),
            ("NAMECHEAP_USERNAME", ""),
        ]);
        let builder = NamecheapClient::builder()
            .api_user("explicit")
            .with_lookup(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(builder.endpoint().unwrap().as_str(), SANDBOX_URL);
        let client = builder.build().unwrap();
        assert_eq!(client.credentials().api_user(), "explicit");
        assert_eq!(client.credentials().username(), "explicit");
        assert_eq!(client.credentials().client_ip().to_string(), "2001:db8::1");
    }

    #[test]
    fn test_call_end_to_end() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/xml.response")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("ApiUser".into(), "apiuser".into()),
                Matcher::UrlEncoded("ApiKey".into(), "secret".into()),
                Matcher::UrlEncoded("UserName".into(), "apiuser".into()),
                Matcher::UrlEncoded("ClientIp".into(), "192.0.2.10".into()),
                Matcher::UrlEncoded("Command".into(), "namecheap.domains.check".into()),
                Matcher::UrlEncoded("DomainList".into(), "example.com".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"<ApiResponse Status="OK"><CommandResponse><DomainCheckResult Domain="example.com" Available="true"/></CommandResponse></ApiResponse>"#,
            )
            .expect(1)
            .create();

        let client = configured()
            .base_url(format!("{}/xml.response", server.url()))
            .unwrap()
            .build()
            .unwrap();
        let outcome = client
            .call("namecheap.domains.check", Params::new().with("DomainList", "example.com"))
            .unwrap();

        assert!(outcome.success);
        assert_eq!(
            outcome.data.child("DomainCheckResult").unwrap().attr("Available"),
            Some("true")
        );
        mock.assert();
    }

    #[test]
    fn test_call_surfaces_parse_error_with_raw_body() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/xml.response")
            .with_status(200)
            .with_body("not xml at all")
            .expect(1)
            .create();

        let client = configured()
            .base_url(format!("{}/xml.response", server.url()))
            .unwrap()
            .build()
            .unwrap();
        let err = client.call("namecheap.users.getBalances", Params::new()).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.raw_response(), Some("not xml at all"));
        mock.assert();
    }

    // Any well-formed IP is accepted and sent verbatim
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10))]

        #[test]
        fn prop_client_ip_accepted(a in 1u8..=254, b in 0u8..=255, c in 0u8..=255, d in 1u8..=254) {
            let ip = format!("{}.{}.{}.{}", a, b, c, d);
            let client = configured().client_ip(ip.clone()).build();
            prop_assert!(client.is_ok());
            prop_assert_eq!(client.unwrap().credentials().client_ip().to_string(), ip);
        }
    }
}
