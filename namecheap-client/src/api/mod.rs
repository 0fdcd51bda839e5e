//! Typed helpers for each API namespace
//!
//! Every helper is a thin wrapper over [`NamecheapClient::call`]: it fills in
//! the command parameters, runs the call and maps the `CommandResponse`
//! section onto typed records.

pub mod dns;
pub mod domains;
pub mod ssl;
pub mod users;

use crate::client::NamecheapClient;
use crate::error::ApiError;
use crate::outcome::CallOutcome;
use crate::payload::Payload;
use crate::transport::Transport;
use chrono::NaiveDate;
use std::str::FromStr;

pub use dns::Dns;
pub use domains::Domains;
pub use ssl::Ssl;
pub use users::Users;

impl<T: Transport> NamecheapClient<T> {
    /// `namecheap.domains.*` commands
    pub fn domains(&self) -> Domains<'_, T> {
        Domains::new(self)
    }

    /// `namecheap.domains.dns.*` commands
    pub fn dns(&self) -> Dns<'_, T> {
        Dns::new(self)
    }

    /// `namecheap.ssl.*` commands
    pub fn ssl(&self) -> Ssl<'_, T> {
        Ssl::new(self)
    }

    /// `namecheap.users.*` commands
    pub fn users(&self) -> Users<'_, T> {
        Users::new(self)
    }
}

/// Paging block returned by list commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Paging {
    pub total_items: u32,
    pub current_page: u32,
    pub page_size: u32,
}

impl Paging {
    pub(crate) fn from_payload(node: &Payload) -> Self {
        let field = |name: &str| -> u32 {
            node.child_text(name)
                .and_then(|t| t.trim().parse().ok())
                .unwrap_or(0)
        };
        Self {
            total_items: field("TotalItems"),
            current_page: field("CurrentPage"),
            page_size: field("PageSize"),
        }
    }
}

/// Date format used throughout the API
const DATE_FORMAT: &str = "%m/%d/%Y";

/// The named result element of a command response
pub(crate) fn result<'a>(outcome: &'a CallOutcome, element: &str) -> Result<&'a Payload, ApiError> {
    outcome
        .data
        .child(element)
        .ok_or_else(|| ApiError::missing(element, &outcome.command))
}

pub(crate) fn attr(node: &Payload, name: &str) -> String {
    node.attr(name).unwrap_or_default().to_string()
}

pub(crate) fn opt_attr(node: &Payload, name: &str) -> Option<String> {
    node.attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

pub(crate) fn flag(node: &Payload, name: &str) -> bool {
    parse_flag(node.attr(name))
}

pub(crate) fn parse_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

pub(crate) fn number<N: FromStr>(node: &Payload, name: &str) -> Option<N> {
    node.attr(name).and_then(|v| v.trim().parse().ok())
}

pub(crate) fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value?.trim(), DATE_FORMAT).ok()
}

pub(crate) fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Split `example.co.uk` into `("example", "co.uk")`
pub(crate) fn split_domain<'a>(command: &str, domain: &'a str) -> Result<(&'a str, &'a str), ApiError> {
    match domain.trim().split_once('.') {
        Some((sld, tld)) if !sld.is_empty() && !tld.is_empty() => Ok((sld, tld)),
        _ => Err(ApiError::invalid_argument(
            command,
            format!("Invalid parameter: {:?} is not a domain name", domain),
        )),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Canned-response transport for helper tests

    use crate::client::NamecheapClient;
    use crate::error::ApiError;
    use crate::request::Params;
    use crate::transport::Transport;
    use std::cell::RefCell;

    /// Returns a fixed body and records every request
    pub struct CannedTransport {
        body: String,
        pub requests: RefCell<Vec<(String, Params)>>,
    }

    impl CannedTransport {
        pub fn new(body: &str) -> Self {
            Self {
                body: body.to_string(),
                requests: RefCell::new(Vec::new()),
            }
        }

        /// Parameters of the only request made
        pub fn last_params(&self) -> Params {
            self.requests.borrow().last().expect("no request was made").1.clone()
        }

        pub fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    impl Transport for CannedTransport {
        fn post(&self, command: &str, params: &Params) -> Result<String, ApiError> {
            self.requests
                .borrow_mut()
                .push((command.to_string(), params.clone()));
            Ok(self.body.clone())
        }
    }

    /// Wrap a command response in an `OK` envelope
    pub fn ok_response(command_response: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<ApiResponse Status="OK" xmlns="http://api.namecheap.com/xml.response">
  <Errors />
  <Warnings />
  <CommandResponse>{}</CommandResponse>
  <Server>TEST01</Server>
  <GMTTimeDifference>--5:00</GMTTimeDifference>
  <ExecutionTime>0.01</ExecutionTime>
</ApiResponse>"#,
            command_response
        )
    }

    pub fn client(transport: &CannedTransport) -> NamecheapClient<&CannedTransport> {
        NamecheapClient::builder()
            .api_user("apiuser")
            .api_key("secret")
            .client_ip("192.0.2.10")
            .build_with_transport(transport)
            .unwrap()
    }
}
