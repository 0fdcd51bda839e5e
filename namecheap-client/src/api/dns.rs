//! `namecheap.domains.dns.*` commands

use super::{attr, flag, number, parse_flag, result, split_domain};
use crate::client::NamecheapClient;
use crate::error::ApiError;
use crate::payload::Payload;
use crate::request::Params;
use crate::transport::Transport;
use std::fmt;
use std::str::FromStr;

const GET_LIST: &str = "namecheap.domains.dns.getList";
const SET_DEFAULT: &str = "namecheap.domains.dns.setDefault";
const SET_CUSTOM: &str = "namecheap.domains.dns.setCustom";
const GET_HOSTS: &str = "namecheap.domains.dns.getHosts";
const SET_HOSTS: &str = "namecheap.domains.dns.setHosts";

/// DNS record types accepted by `setHosts`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    Aaaa,
    Alias,
    Caa,
    Cname,
    Mx,
    Mxe,
    Ns,
    Txt,
    Url,
    Url301,
    Frame,
    /// Anything the registrar adds later
    Other(String),
}

impl RecordType {
    /// Wire name of the record type
    pub fn as_str(&self) -> &str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Alias => "ALIAS",
            RecordType::Caa => "CAA",
            RecordType::Cname => "CNAME",
            RecordType::Mx => "MX",
            RecordType::Mxe => "MXE",
            RecordType::Ns => "NS",
            RecordType::Txt => "TXT",
            RecordType::Url => "URL",
            RecordType::Url301 => "URL301",
            RecordType::Frame => "FRAME",
            RecordType::Other(other) => other,
        }
    }
}

impl FromStr for RecordType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_uppercase().as_str() {
            "A" => RecordType::A,
            "AAAA" => RecordType::Aaaa,
            "ALIAS" => RecordType::Alias,
            "CAA" => RecordType::Caa,
            "CNAME" => RecordType::Cname,
            "MX" => RecordType::Mx,
            "MXE" => RecordType::Mxe,
            "NS" => RecordType::Ns,
            "TXT" => RecordType::Txt,
            "URL" => RecordType::Url,
            "URL301" => RecordType::Url301,
            "FRAME" => RecordType::Frame,
            other => RecordType::Other(other.to_string()),
        })
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nameserver setup of a domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameserverSettings {
    pub domain: String,
    pub is_using_our_dns: bool,
    pub nameservers: Vec<String>,
}

/// Host record as stored by the registrar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsHost {
    pub host_id: Option<u64>,
    pub name: String,
    pub record_type: RecordType,
    pub address: String,
    pub mx_pref: Option<u32>,
    pub ttl: Option<u32>,
    pub is_active: bool,
}

impl DnsHost {
    fn from_payload(node: &Payload) -> Self {
        Self {
            host_id: number(node, "HostId"),
            name: attr(node, "Name"),
            record_type: node
                .attr("Type")
                .unwrap_or_default()
                .parse()
                .unwrap_or(RecordType::Other(String::new())),
            address: attr(node, "Address"),
            mx_pref: number(node, "MXPref"),
            ttl: number(node, "TTL"),
            is_active: node.attr("IsActive").is_none_or(|v| parse_flag(Some(v))),
        }
    }
}

impl From<&DnsHost> for DnsHostRecord {
    fn from(host: &DnsHost) -> Self {
        Self {
            name: host.name.clone(),
            record_type: host.record_type.clone(),
            address: host.address.clone(),
            mx_pref: host.mx_pref,
            ttl: host.ttl,
        }
    }
}

/// Host record to write with `set_hosts`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsHostRecord {
    /// `@` for the apex
    pub name: String,
    pub record_type: RecordType,
    pub address: String,
    pub mx_pref: Option<u32>,
    /// 60 to 60000 seconds; registrar default when unset
    pub ttl: Option<u32>,
}

impl DnsHostRecord {
    /// Record without MX preference or TTL
    pub fn new(name: impl Into<String>, record_type: RecordType, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            record_type,
            address: address.into(),
            mx_pref: None,
            ttl: None,
        }
    }
}

/// `namecheap.domains.dns.*` commands
pub struct Dns<'a, T> {
    client: &'a NamecheapClient<T>,
}

impl<'a, T: Transport> Dns<'a, T> {
    pub(crate) fn new(client: &'a NamecheapClient<T>) -> Self {
        Self { client }
    }

    /// Whether the domain uses registrar DNS, and its nameservers
    pub fn get_list(&self, domain: &str) -> Result<NameserverSettings, ApiError> {
        let outcome = self.client.call(GET_LIST, sld_tld(GET_LIST, domain)?)?;
        let node = result(&outcome, "DomainDNSGetListResult")?;
        Ok(NameserverSettings {
            domain: attr(node, "Domain"),
            is_using_our_dns: flag(node, "IsUsingOurDNS"),
            nameservers: node.child_texts("Nameserver").map(String::from).collect(),
        })
    }

    /// Switch the domain back to registrar DNS
    pub fn set_default(&self, domain: &str) -> Result<bool, ApiError> {
        let outcome = self.client.call(SET_DEFAULT, sld_tld(SET_DEFAULT, domain)?)?;
        Ok(flag(result(&outcome, "DomainDNSSetDefaultResult")?, "Updated"))
    }

    /// Point the domain at custom nameservers
    pub fn set_custom<S: AsRef<str>>(&self, domain: &str, nameservers: &[S]) -> Result<bool, ApiError> {
        let list: Vec<&str> = nameservers
            .iter()
            .map(|ns| ns.as_ref().trim())
            .filter(|ns| !ns.is_empty())
            .collect();
        if list.is_empty() {
            return Err(ApiError::invalid_argument(SET_CUSTOM, "Required parameter Nameservers is missing"));
        }

        let params = sld_tld(SET_CUSTOM, domain)?.with("Nameservers", list.join(","));
        let outcome = self.client.call(SET_CUSTOM, params)?;
        let node = result(&outcome, "DomainDNSSetCustomResult")?;
        // The registrar documents this attribute as both `Update` and `Updated`
        Ok(flag(node, "Updated") || flag(node, "Update"))
    }

    /// Host records of a domain on registrar DNS
    pub fn get_hosts(&self, domain: &str) -> Result<Vec<DnsHost>, ApiError> {
        let outcome = self.client.call(GET_HOSTS, sld_tld(GET_HOSTS, domain)?)?;
        let node = result(&outcome, "DomainDNSGetHostsResult")?;
        Ok(node
            .children("host")
            .chain(node.children("Host"))
            .map(DnsHost::from_payload)
            .collect())
    }

    /// Replace every host record of a domain
    ///
    /// The registrar overwrites the whole set, so pass the records to keep
    /// along with the new ones. `EmailType=MX` is sent when any MX record
    /// is present.
    pub fn set_hosts(&self, domain: &str, hosts: &[DnsHostRecord]) -> Result<bool, ApiError> {
        let mut params = sld_tld(SET_HOSTS, domain)?;
        for (index, host) in hosts.iter().enumerate() {
            let n = index + 1;
            params.insert(format!("HostName{}", n), &host.name);
            params.insert(format!("RecordType{}", n), host.record_type.as_str());
            params.insert(format!("Address{}", n), &host.address);
            if let Some(pref) = host.mx_pref {
                params.insert(format!("MXPref{}", n), pref);
            }
            if let Some(ttl) = host.ttl {
                params.insert(format!("TTL{}", n), ttl);
            }
        }
        if hosts.iter().any(|h| h.record_type == RecordType::Mx) {
            params.insert("EmailType", "MX");
        }

        let outcome = self.client.call(SET_HOSTS, params)?;
        Ok(flag(result(&outcome, "DomainDNSSetHostsResult")?, "IsSuccess"))
    }
}

fn sld_tld(command: &str, domain: &str) -> Result<Params, ApiError> {
    let (sld, tld) = split_domain(command, domain)?;
    Ok(Params::new().with("SLD", sld).with("TLD", tld))
}
