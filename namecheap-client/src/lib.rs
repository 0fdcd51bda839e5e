//! Namecheap API Client Library
//!
//! This library wraps the Namecheap XML API: domain registration, DNS record
//! management, SSL certificate lifecycle and account operations.
//!
//! Every call runs the same pipeline: the command parameters are merged with
//! the authentication fields, posted as a form, the response is normalized into
//! a [`Payload`] and the status, errors and warnings are extracted into a
//! [`CallOutcome`]. Registrar errors come back as a classified [`ApiError`].
//!
//! # Features
//!
//! - Typed helpers for the `domains`, `domains.dns`, `ssl` and `users` namespaces
//! - Raw [`NamecheapClient::call`] for any other command
//! - XML and JSON response normalization
//! - Errors classified into authentication, validation and generic API failures
//! - Secure TLS using rustls (no OpenSSL dependencies)
//! - Blocking synchronous API
//!
//! # Example
//!
//! ```no_run
//! use namecheap_client::NamecheapClient;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = NamecheapClient::builder()
//!     .api_user("apiuser")
//!     .api_key("your_api_key_here")
//!     .client_ip("192.0.2.10")
//!     .sandbox(true)
//!     .build()?;
//!
//! for check in client.domains().check(&["example.com", "example.net"])? {
//!     println!("{}: available={}", check.domain, check.available);
//! }
//!
//! let balances = client.users().get_balances()?;
//! println!("{} {}", balances.available_balance, balances.currency);
//!
//! // Any command, without a typed helper
//! let outcome = client.call("namecheap.domains.getTldList", Default::default())?;
//! println!("served by {:?}", outcome.server);
//! # Ok(())
//! # }
//! ```

pub mod api;
mod classify;
mod client;
mod error;
mod flatten;
mod normalize;
mod outcome;
mod payload;
mod request;
mod transport;

pub use api::Paging;
pub use api::dns::{DnsHost, DnsHostRecord, NameserverSettings, RecordType};
pub use api::domains::{
    Contact, DomainCheck, DomainContacts, DomainCreateResult, DomainInfo, DomainListQuery,
    DomainPage, DomainRegistration, DomainRenewResult, Domain, ListType, SortBy, Tld,
};
pub use api::ssl::{
    SslActivation, SslCertificate, SslCertificateInfo, SslListQuery, SslOrderResult, SslPage,
};
pub use api::users::{Balances, PricingEntry, PricingQuery, ProductType};
pub use classify::{API_CODE, AUTHENTICATION_CODE, VALIDATION_CODE, classify};
pub use client::{DEFAULT_TIMEOUT, NamecheapClient, NamecheapClientBuilder};
pub use error::{ApiError, ErrorContext, ErrorKind};
pub use flatten::flatten_element;
pub use normalize::{ResponseFormat, normalize};
pub use outcome::{CallOutcome, SUCCESS_STATUS, extract_outcome};
pub use payload::{ATTR_PREFIX, Payload, TEXT_KEY, Value};
pub use request::{Credentials, Params, RESERVED_PARAMS, build_params};
pub use transport::{HttpTransport, PRODUCTION_URL, SANDBOX_URL, Transport};
