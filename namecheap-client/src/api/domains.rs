//! `namecheap.domains.*` commands

use super::{Paging, attr, flag, number, opt_attr, parse_date, parse_flag, result, yes_no};
use crate::client::NamecheapClient;
use crate::error::ApiError;
use crate::payload::Payload;
use crate::request::Params;
use crate::transport::Transport;
use chrono::NaiveDate;

const CHECK: &str = "namecheap.domains.check";
const GET_LIST: &str = "namecheap.domains.getList";
const GET_INFO: &str = "namecheap.domains.getInfo";
const GET_CONTACTS: &str = "namecheap.domains.getContacts";
const CREATE: &str = "namecheap.domains.create";
const RENEW: &str = "namecheap.domains.renew";
const GET_REGISTRAR_LOCK: &str = "namecheap.domains.getRegistrarLock";
const SET_REGISTRAR_LOCK: &str = "namecheap.domains.setRegistrarLock";
const GET_TLD_LIST: &str = "namecheap.domains.getTldList";

/// Availability of one domain
#[derive(Debug, Clone, PartialEq)]
pub struct DomainCheck {
    pub domain: String,
    pub available: bool,
    pub is_premium_name: bool,
    pub premium_registration_price: Option<f64>,
    pub premium_renewal_price: Option<f64>,
    pub icann_fee: Option<f64>,
    /// Registrar error number for this domain, `0` when none
    pub error_no: Option<u32>,
    pub description: Option<String>,
}

impl DomainCheck {
    fn from_payload(node: &Payload) -> Self {
        Self {
            domain: attr(node, "Domain"),
            available: flag(node, "Available"),
            is_premium_name: flag(node, "IsPremiumName"),
            premium_registration_price: number(node, "PremiumRegistrationPrice"),
            premium_renewal_price: number(node, "PremiumRenewalPrice"),
            icann_fee: number(node, "IcannFee"),
            error_no: number(node, "ErrorNo"),
            description: opt_attr(node, "Description"),
        }
    }
}

/// Which domains `get_list` returns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListType {
    #[default]
    All,
    Expiring,
    Expired,
}

impl ListType {
    fn as_str(self) -> &'static str {
        match self {
            ListType::All => "ALL",
            ListType::Expiring => "EXPIRING",
            ListType::Expired => "EXPIRED",
        }
    }
}

/// Sort order for `get_list`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Name,
    NameDesc,
    ExpireDate,
    ExpireDateDesc,
    CreateDate,
    CreateDateDesc,
}

impl SortBy {
    fn as_str(self) -> &'static str {
        match self {
            SortBy::Name => "NAME",
            SortBy::NameDesc => "NAME_DESC",
            SortBy::ExpireDate => "EXPIREDATE",
            SortBy::ExpireDateDesc => "EXPIREDATE_DESC",
            SortBy::CreateDate => "CREATEDATE",
            SortBy::CreateDateDesc => "CREATEDATE_DESC",
        }
    }
}

/// Filters for `get_list`; unset fields use the registrar defaults
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainListQuery {
    pub list_type: Option<ListType>,
    pub search_term: Option<String>,
    pub page: Option<u32>,
    /// 10 to 100
    pub page_size: Option<u32>,
    pub sort_by: Option<SortBy>,
}

impl DomainListQuery {
    fn to_params(&self) -> Params {
        Params::new()
            .with_opt("ListType", self.list_type.map(ListType::as_str))
            .with_opt("SearchTerm", self.search_term.as_deref())
            .with_opt("Page", self.page)
            .with_opt("PageSize", self.page_size)
            .with_opt("SortBy", self.sort_by.map(SortBy::as_str))
    }
}

/// Entry of the account's domain list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    pub id: u64,
    pub name: String,
    pub user: String,
    pub created: Option<NaiveDate>,
    pub expires: Option<NaiveDate>,
    pub is_expired: bool,
    pub is_locked: bool,
    pub auto_renew: bool,
    /// `ENABLED`, `NOTPRESENT`, ...
    pub whois_guard: String,
    pub is_premium: bool,
    pub is_our_dns: bool,
}

impl Domain {
    fn from_payload(node: &Payload) -> Self {
        Self {
            id: number(node, "ID").unwrap_or_default(),
            name: attr(node, "Name"),
            user: attr(node, "User"),
            created: parse_date(node.attr("Created")),
            expires: parse_date(node.attr("Expires")),
            is_expired: flag(node, "IsExpired"),
            is_locked: flag(node, "IsLocked"),
            auto_renew: flag(node, "AutoRenew"),
            whois_guard: attr(node, "WhoisGuard"),
            is_premium: flag(node, "IsPremium"),
            is_our_dns: flag(node, "IsOurDNS"),
        }
    }
}

/// One page of the domain list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainPage {
    pub domains: Vec<Domain>,
    pub paging: Paging,
}

/// Details of a single domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainInfo {
    pub id: u64,
    pub domain_name: String,
    pub owner_name: String,
    pub is_owner: bool,
    pub is_premium: bool,
    pub status: String,
    pub created: Option<NaiveDate>,
    pub expires: Option<NaiveDate>,
    pub whoisguard_enabled: bool,
    pub dns_provider: Option<String>,
    pub is_using_our_dns: bool,
    pub nameservers: Vec<String>,
}

impl DomainInfo {
    fn from_payload(node: &Payload) -> Self {
        let details = node.child("DomainDetails");
        let dns = node.child("DnsDetails");
        Self {
            id: number(node, "ID").unwrap_or_default(),
            domain_name: attr(node, "DomainName"),
            owner_name: attr(node, "OwnerName"),
            is_owner: flag(node, "IsOwner"),
            is_premium: flag(node, "IsPremium"),
            status: attr(node, "Status"),
            created: parse_date(details.and_then(|d| d.child_text("CreatedDate"))),
            expires: parse_date(details.and_then(|d| d.child_text("ExpiredDate"))),
            whoisguard_enabled: parse_flag(node.child("Whoisguard").and_then(|w| w.attr("Enabled"))),
            dns_provider: dns.and_then(|d| opt_attr(d, "ProviderType")),
            is_using_our_dns: dns.is_some_and(|d| flag(d, "IsUsingOurDNS")),
            nameservers: dns
                .map(|d| d.child_texts("Nameserver").map(String::from).collect())
                .unwrap_or_default(),
        }
    }
}

/// Contact record for one domain role
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    pub first_name: String,
    pub last_name: String,
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    pub state_province: String,
    pub postal_code: String,
    /// Two-letter country code
    pub country: String,
    /// `+NNN.NNNNNNNNNN`
    pub phone: String,
    pub email_address: String,
    pub organization_name: Option<String>,
    pub job_title: Option<String>,
    pub fax: Option<String>,
}

impl Contact {
    fn from_payload(node: &Payload) -> Self {
        let text = |name: &str| node.child_text(name).unwrap_or_default().to_string();
        let opt = |name: &str| node.child_text(name).filter(|t| !t.is_empty()).map(String::from);
        Self {
            first_name: text("FirstName"),
            last_name: text("LastName"),
            address1: text("Address1"),
            address2: opt("Address2"),
            city: text("City"),
            state_province: text("StateProvince"),
            postal_code: text("PostalCode"),
            country: text("Country"),
            phone: text("Phone"),
            email_address: text("EmailAddress"),
            organization_name: opt("OrganizationName"),
            job_title: opt("JobTitle"),
            fax: opt("Fax"),
        }
    }

    /// Add this contact's fields under a role prefix such as `Registrant`
    ///
    /// Fails on the first empty required field.
    fn add_params(&self, prefix: &str, params: &mut Params) -> Result<(), ApiError> {
        let required = [
            ("FirstName", &self.first_name),
            ("LastName", &self.last_name),
            ("Address1", &self.address1),
            ("City", &self.city),
            ("StateProvince", &self.state_province),
            ("PostalCode", &self.postal_code),
            ("Country", &self.country),
            ("Phone", &self.phone),
            ("EmailAddress", &self.email_address),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ApiError::invalid_argument(
                    CREATE,
                    format!("Required parameter {}{} is missing", prefix, field),
                ));
            }
            params.insert(format!("{}{}", prefix, field), value);
        }

        let optional = [
            ("Address2", &self.address2),
            ("OrganizationName", &self.organization_name),
            ("JobTitle", &self.job_title),
            ("Fax", &self.fax),
        ];
        for (field, value) in optional {
            if let Some(value) = value {
                params.insert(format!("{}{}", prefix, field), value);
            }
        }
        Ok(())
    }
}

/// Contacts of a domain, one per role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainContacts {
    pub domain: String,
    pub registrant: Option<Contact>,
    pub tech: Option<Contact>,
    pub admin: Option<Contact>,
    pub aux_billing: Option<Contact>,
}

/// Parameters for registering a domain
///
/// Roles without their own contact reuse the registrant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRegistration {
    pub domain: String,
    pub years: u8,
    pub registrant: Contact,
    pub tech: Option<Contact>,
    pub admin: Option<Contact>,
    pub aux_billing: Option<Contact>,
    /// Custom nameservers; registrar DNS when empty
    pub nameservers: Vec<String>,
    pub whois_guard: bool,
}

impl DomainRegistration {
    /// Register `domain` for `years` with one contact for every role
    pub fn new(domain: impl Into<String>, years: u8, registrant: Contact) -> Self {
        Self {
            domain: domain.into(),
            years,
            registrant,
            tech: None,
            admin: None,
            aux_billing: None,
            nameservers: Vec::new(),
            whois_guard: false,
        }
    }

    fn to_params(&self) -> Result<Params, ApiError> {
        if self.domain.trim().is_empty() {
            return Err(ApiError::invalid_argument(CREATE, "Required parameter DomainName is missing"));
        }
        if !(1..=10).contains(&self.years) {
            return Err(ApiError::invalid_argument(
                CREATE,
                format!("Invalid parameter Years: {} is outside 1..=10", self.years),
            ));
        }

        let mut params = Params::new()
            .with("DomainName", self.domain.trim())
            .with("Years", self.years);

        let roles = [
            ("Registrant", Some(&self.registrant)),
            ("Tech", self.tech.as_ref()),
            ("Admin", self.admin.as_ref()),
            ("AuxBilling", self.aux_billing.as_ref()),
        ];
        for (prefix, contact) in roles {
            contact
                .unwrap_or(&self.registrant)
                .add_params(prefix, &mut params)?;
        }

        if !self.nameservers.is_empty() {
            params.insert("Nameservers", self.nameservers.join(","));
        }
        params.insert("AddFreeWhoisguard", yes_no(self.whois_guard));
        params.insert("WGEnabled", yes_no(self.whois_guard));
        Ok(params)
    }
}

/// Result of a registration
#[derive(Debug, Clone, PartialEq)]
pub struct DomainCreateResult {
    pub domain: String,
    pub registered: bool,
    pub charged_amount: Option<f64>,
    pub domain_id: Option<u64>,
    pub order_id: Option<u64>,
    pub transaction_id: Option<u64>,
    pub whoisguard_enabled: bool,
    pub non_real_time: bool,
}

/// Result of a renewal
#[derive(Debug, Clone, PartialEq)]
pub struct DomainRenewResult {
    pub domain: String,
    pub domain_id: Option<u64>,
    pub renewed: bool,
    pub order_id: Option<u64>,
    pub transaction_id: Option<u64>,
    pub charged_amount: Option<f64>,
    pub expires: Option<NaiveDate>,
}

/// TLD supported by the registrar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tld {
    pub name: String,
    pub description: Option<String>,
    pub min_register_years: Option<u8>,
    pub max_register_years: Option<u8>,
    pub is_api_registerable: bool,
    pub is_api_renewable: bool,
    pub is_api_transferable: bool,
    /// `GTLD`, `CCTLD`, ...
    pub tld_type: String,
}

impl Tld {
    fn from_payload(node: &Payload) -> Self {
        Self {
            name: attr(node, "Name"),
            description: node.text().map(String::from),
            min_register_years: number(node, "MinRegisterYears"),
            max_register_years: number(node, "MaxRegisterYears"),
            is_api_registerable: flag(node, "IsApiRegisterable"),
            is_api_renewable: flag(node, "IsApiRenewable"),
            is_api_transferable: flag(node, "IsApiTransferable"),
            tld_type: attr(node, "Type"),
        }
    }
}

/// `namecheap.domains.*` commands
pub struct Domains<'a, T> {
    client: &'a NamecheapClient<T>,
}

impl<'a, T: Transport> Domains<'a, T> {
    pub(crate) fn new(client: &'a NamecheapClient<T>) -> Self {
        Self { client }
    }

    /// Check availability of one or more domains
    ///
    /// # Errors
    ///
    /// `ApiError::Validation` without a request if `domains` is empty.
    pub fn check<S: AsRef<str>>(&self, domains: &[S]) -> Result<Vec<DomainCheck>, ApiError> {
        let list: Vec<&str> = domains
            .iter()
            .map(|d| d.as_ref().trim())
            .filter(|d| !d.is_empty())
            .collect();
        if list.is_empty() {
            return Err(ApiError::invalid_argument(CHECK, "Required parameter DomainList is missing"));
        }

        let outcome = self
            .client
            .call(CHECK, Params::new().with("DomainList", list.join(",")))?;
        Ok(outcome
            .data
            .children("DomainCheckResult")
            .map(DomainCheck::from_payload)
            .collect())
    }

    /// One page of the account's domains
    pub fn get_list(&self, query: &DomainListQuery) -> Result<DomainPage, ApiError> {
        let outcome = self.client.call(GET_LIST, query.to_params())?;
        let domains = outcome
            .data
            .children("DomainGetListResult")
            .flat_map(|r| r.children("Domain"))
            .map(Domain::from_payload)
            .collect();
        let paging = outcome
            .data
            .child("Paging")
            .map(Paging::from_payload)
            .unwrap_or_default();
        Ok(DomainPage { domains, paging })
    }

    /// Details of one domain in the account
    pub fn get_info(&self, domain: &str) -> Result<DomainInfo, ApiError> {
        let outcome = self
            .client
            .call(GET_INFO, Params::new().with("DomainName", domain.trim()))?;
        Ok(DomainInfo::from_payload(result(&outcome, "DomainGetInfoResult")?))
    }

    /// Registrant, tech, admin and billing contacts
    pub fn get_contacts(&self, domain: &str) -> Result<DomainContacts, ApiError> {
        let outcome = self
            .client
            .call(GET_CONTACTS, Params::new().with("DomainName", domain.trim()))?;
        let node = result(&outcome, "DomainContactsResult")?;
        let role = |name: &str| node.child(name).map(Contact::from_payload);
        Ok(DomainContacts {
            domain: attr(node, "Domain"),
            registrant: role("Registrant"),
            tech: role("Tech"),
            admin: role("Admin"),
            aux_billing: role("AuxBilling"),
        })
    }

    /// Register a new domain
    ///
    /// # Errors
    ///
    /// `ApiError::Validation` without a request if a required contact field
    /// is empty or `years` is outside 1..=10.
    pub fn create(&self, registration: &DomainRegistration) -> Result<DomainCreateResult, ApiError> {
        let outcome = self.client.call(CREATE, registration.to_params()?)?;
        let node = result(&outcome, "DomainCreateResult")?;
        Ok(DomainCreateResult {
            domain: attr(node, "Domain"),
            registered: flag(node, "Registered"),
            charged_amount: number(node, "ChargedAmount"),
            domain_id: number(node, "DomainID"),
            order_id: number(node, "OrderID"),
            transaction_id: number(node, "TransactionID"),
            whoisguard_enabled: flag(node, "WhoisguardEnable"),
            non_real_time: flag(node, "NonRealTimeDomain"),
        })
    }

    /// Renew a domain for `years`
    pub fn renew(&self, domain: &str, years: u8) -> Result<DomainRenewResult, ApiError> {
        if years == 0 {
            return Err(ApiError::invalid_argument(RENEW, "Invalid parameter Years: must be at least 1"));
        }
        let params = Params::new()
            .with("DomainName", domain.trim())
            .with("Years", years);
        let outcome = self.client.call(RENEW, params)?;
        let node = result(&outcome, "DomainRenewResult")?;
        Ok(DomainRenewResult {
            domain: attr(node, "DomainName"),
            domain_id: number(node, "DomainID"),
            renewed: flag(node, "Renew"),
            order_id: number(node, "OrderID"),
            transaction_id: number(node, "TransactionID"),
            charged_amount: number(node, "ChargedAmount"),
            expires: parse_date(node.child("DomainDetails").and_then(|d| d.child_text("ExpiredDate"))),
        })
    }

    /// Whether the registrar lock is on
    pub fn get_registrar_lock(&self, domain: &str) -> Result<bool, ApiError> {
        let outcome = self
            .client
            .call(GET_REGISTRAR_LOCK, Params::new().with("DomainName", domain.trim()))?;
        Ok(flag(result(&outcome, "DomainGetRegistrarLockResult")?, "RegistrarLockStatus"))
    }

    /// Turn the registrar lock on or off; returns the registrar's success flag
    pub fn set_registrar_lock(&self, domain: &str, locked: bool) -> Result<bool, ApiError> {
        let params = Params::new()
            .with("DomainName", domain.trim())
            .with("LockAction", if locked { "LOCK" } else { "UNLOCK" });
        let outcome = self.client.call(SET_REGISTRAR_LOCK, params)?;
        Ok(flag(result(&outcome, "DomainSetRegistrarLockResult")?, "IsSuccess"))
    }

    /// Every TLD the registrar supports
    pub fn get_tld_list(&self) -> Result<Vec<Tld>, ApiError> {
        let outcome = self.client.call(GET_TLD_LIST, Params::new())?;
        Ok(outcome
            .data
            .children("Tlds")
            .flat_map(|t| t.children("Tld"))
            .map(Tld::from_payload)
            .collect())
    }
}
