//! Request parameters and authentication fields

use std::collections::BTreeMap;
use std::fmt;
use std::net::IpAddr;
use tracing::debug;
use zeroize::Zeroizing;

const API_USER: &str = "ApiUser";
const API_KEY: &str = "ApiKey";
const USER_NAME: &str = "UserName";
const CLIENT_IP: &str = "ClientIp";
const COMMAND: &str = "Command";

/// Fields sent with every request; callers cannot override these
pub const RESERVED_PARAMS: [&str; 5] = [API_USER, API_KEY, USER_NAME, CLIENT_IP, COMMAND];

/// Account credentials sent with every request
///
/// The API key is zeroized on drop and never shown by `Debug`.
#[derive(Clone)]
pub struct Credentials {
    api_user: String,
    api_key: Zeroizing<String>,
    username: String,
    client_ip: IpAddr,
}

impl Credentials {
    /// Create credentials; `username` is usually the same as `api_user`
    pub fn new(
        api_user: impl Into<String>,
        api_key: impl Into<String>,
        username: impl Into<String>,
        client_ip: IpAddr,
    ) -> Self {
        Self {
            api_user: api_user.into(),
            api_key: Zeroizing::new(api_key.into()),
            username: username.into(),
            client_ip,
        }
    }

    /// API user name
    pub fn api_user(&self) -> &str {
        &self.api_user
    }

    /// User the commands act on behalf of
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Whitelisted client IP
    pub fn client_ip(&self) -> IpAddr {
        self.client_ip
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_user", &self.api_user)
            .field("api_key", &"<redacted>")
            .field("username", &self.username)
            .field("client_ip", &self.client_ip)
            .finish()
    }
}

/// Flat string-keyed request parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Add a parameter only when a value is present
    pub fn with_opt(mut self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    /// Insert or replace a parameter
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) -> Option<String> {
        self.0.insert(key.into(), value.to_string())
    }

    /// Look up a parameter
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate parameters in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Merge caller parameters with the authentication fields and command
///
/// Authentication fields replace any caller parameter of the same name.
pub fn build_params(credentials: &Credentials, command: &str, mut params: Params) -> Params {
    for reserved in RESERVED_PARAMS {
        if params.0.contains_key(reserved) {
            debug!(command, param = reserved, "Ignoring caller value for reserved parameter");
        }
    }

    params.insert(API_USER, &credentials.api_user);
    params.insert(API_KEY, credentials.api_key.as_str());
    params.insert(USER_NAME, &credentials.username);
    params.insert(CLIENT_IP, credentials.client_ip);
    params.insert(COMMAND, command);
    params
}
