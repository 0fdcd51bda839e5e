//! `namecheap.ssl.*` commands

use super::{Paging, attr, flag, number, opt_attr, parse_date, result};
use crate::client::NamecheapClient;
use crate::error::ApiError;
use crate::payload::Payload;
use crate::request::Params;
use crate::transport::Transport;
use chrono::NaiveDate;

const GET_LIST: &str = "namecheap.ssl.getList";
const GET_INFO: &str = "namecheap.ssl.getInfo";
const CREATE: &str = "namecheap.ssl.create";
const RENEW: &str = "namecheap.ssl.renew";
const ACTIVATE: &str = "namecheap.ssl.activate";

/// Filters for `get_list`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SslListQuery {
    /// `ALL`, `Processing`, `EmailSent`, `Active`, `NewPurchase`, ...
    pub list_type: Option<String>,
    pub search_term: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// `PURCHASEDATE`, `SSLTYPE`, `EXPIREDATETIME`, `Host_Name`, with `_DESC` variants
    pub sort_by: Option<String>,
}

/// Certificate entry of the account's list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SslCertificate {
    pub certificate_id: u64,
    pub host_name: Option<String>,
    pub ssl_type: String,
    pub purchase_date: Option<NaiveDate>,
    pub expire_date: Option<NaiveDate>,
    pub activation_expire_date: Option<NaiveDate>,
    pub is_expired: bool,
    pub status: String,
    pub years: Option<u8>,
}

impl SslCertificate {
    fn from_payload(node: &Payload) -> Self {
        Self {
            certificate_id: number(node, "CertificateID").unwrap_or_default(),
            host_name: opt_attr(node, "HostName"),
            ssl_type: attr(node, "SSLType"),
            purchase_date: parse_date(node.attr("PurchaseDate")),
            expire_date: parse_date(node.attr("ExpireDate")),
            activation_expire_date: parse_date(node.attr("ActivationExpireDate")),
            is_expired: flag(node, "IsExpiredYN"),
            status: attr(node, "Status"),
            years: number(node, "Years"),
        }
    }
}

/// One page of the certificate list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SslPage {
    pub certificates: Vec<SslCertificate>,
    pub paging: Paging,
}

/// Details of one certificate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SslCertificateInfo {
    pub status: String,
    pub status_description: Option<String>,
    pub cert_type: String,
    pub issued_on: Option<NaiveDate>,
    pub expires: Option<NaiveDate>,
    pub order_id: Option<u64>,
    pub common_name: Option<String>,
    pub approver_email: Option<String>,
    pub provider: Option<String>,
}

/// Result of purchasing or renewing a certificate
#[derive(Debug, Clone, PartialEq)]
pub struct SslOrderResult {
    pub is_success: bool,
    pub certificate_id: Option<u64>,
    pub ssl_type: String,
    pub years: Option<u8>,
    pub status: Option<String>,
    pub order_id: Option<u64>,
    pub transaction_id: Option<u64>,
    pub charged_amount: Option<f64>,
}

/// Parameters for activating a purchased certificate
///
/// Exactly one validation method is used: HTTP, DNS, or email to
/// `approver_email`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SslActivation {
    pub certificate_id: u64,
    /// PEM certificate signing request
    pub csr: String,
    pub admin_email: String,
    /// `apacheopenssl`, `nginx`, `iis`, ...
    pub web_server_type: String,
    pub approver_email: Option<String>,
    pub http_dc_validation: bool,
    pub dns_dc_validation: bool,
}

impl SslActivation {
    fn to_params(&self) -> Result<Params, ApiError> {
        if self.csr.trim().is_empty() {
            return Err(ApiError::invalid_argument(ACTIVATE, "Required parameter CSR is missing"));
        }
        if self.admin_email.trim().is_empty() {
            return Err(ApiError::invalid_argument(ACTIVATE, "Required parameter AdminEmailAddress is missing"));
        }
        let methods = [
            self.approver_email.is_some(),
            self.http_dc_validation,
            self.dns_dc_validation,
        ];
        if methods.iter().filter(|&&m| m).count() != 1 {
            return Err(ApiError::invalid_argument(
                ACTIVATE,
                "Invalid parameter: choose exactly one of ApproverEmail, HTTPDCValidation, DNSDCValidation",
            ));
        }

        let mut params = Params::new()
            .with("CertificateID", self.certificate_id)
            .with("CSR", self.csr.trim())
            .with("AdminEmailAddress", self.admin_email.trim())
            .with("WebServerType", &self.web_server_type)
            .with_opt("ApproverEmail", self.approver_email.as_deref());
        if self.http_dc_validation {
            params.insert("HTTPDCValidation", "TRUE");
        }
        if self.dns_dc_validation {
            params.insert("DNSDCValidation", "TRUE");
        }
        Ok(params)
    }
}

/// `namecheap.ssl.*` commands
pub struct Ssl<'a, T> {
    client: &'a NamecheapClient<T>,
}

impl<'a, T: Transport> Ssl<'a, T> {
    pub(crate) fn new(client: &'a NamecheapClient<T>) -> Self {
        Self { client }
    }

    /// One page of the account's certificates
    pub fn get_list(&self, query: &SslListQuery) -> Result<SslPage, ApiError> {
        let params = Params::new()
            .with_opt("ListType", query.list_type.as_deref())
            .with_opt("SearchTerm", query.search_term.as_deref())
            .with_opt("Page", query.page)
            .with_opt("PageSize", query.page_size)
            .with_opt("SortBy", query.sort_by.as_deref());
        let outcome = self.client.call(GET_LIST, params)?;

        let certificates = outcome
            .data
            .children("SSLListResult")
            .flat_map(|r| r.children("SSL"))
            .map(SslCertificate::from_payload)
            .collect();
        let paging = outcome
            .data
            .child("Paging")
            .map(Paging::from_payload)
            .unwrap_or_default();
        Ok(SslPage { certificates, paging })
    }

    /// Details of one certificate
    pub fn get_info(&self, certificate_id: u64) -> Result<SslCertificateInfo, ApiError> {
        let outcome = self
            .client
            .call(GET_INFO, Params::new().with("CertificateID", certificate_id))?;
        let node = result(&outcome, "SSLGetInfoResult")?;
        let details = node.child("CertificateDetails");
        let detail = |name: &str| details.and_then(|d| d.child_text(name)).map(String::from);

        Ok(SslCertificateInfo {
            status: attr(node, "Status"),
            status_description: opt_attr(node, "StatusDescription"),
            cert_type: attr(node, "Type"),
            issued_on: parse_date(node.attr("IssuedOn")),
            expires: parse_date(node.attr("Expires")),
            order_id: number(node, "OrderId"),
            common_name: detail("CommonName"),
            approver_email: detail("ApproverEmail"),
            provider: node
                .child("Provider")
                .and_then(|p| p.child_text("Name"))
                .map(String::from),
        })
    }

    /// Purchase a certificate of `ssl_type` (e.g. `PositiveSSL`) for `years`
    pub fn create(&self, ssl_type: &str, years: u8) -> Result<SslOrderResult, ApiError> {
        if ssl_type.trim().is_empty() {
            return Err(ApiError::invalid_argument(CREATE, "Required parameter Type is missing"));
        }
        check_years(CREATE, years)?;
        let params = Params::new().with("Type", ssl_type.trim()).with("Years", years);
        let outcome = self.client.call(CREATE, params)?;
        let node = result(&outcome, "SSLCreateResult")?;
        let certificate = node.child("SSLCertificate");

        Ok(SslOrderResult {
            is_success: flag(node, "IsSuccess"),
            certificate_id: certificate.and_then(|c| number(c, "CertificateID")),
            ssl_type: certificate.map(|c| attr(c, "SSLType")).unwrap_or_default(),
            years: certificate.and_then(|c| number(c, "Years")),
            status: certificate.and_then(|c| opt_attr(c, "Status")),
            order_id: number(node, "OrderId"),
            transaction_id: number(node, "TransactionId"),
            charged_amount: number(node, "ChargedAmount"),
        })
    }

    /// Renew a certificate
    pub fn renew(&self, certificate_id: u64, ssl_type: &str, years: u8) -> Result<SslOrderResult, ApiError> {
        check_years(RENEW, years)?;
        let params = Params::new()
            .with("CertificateID", certificate_id)
            .with("SSLType", ssl_type.trim())
            .with("Years", years);
        let outcome = self.client.call(RENEW, params)?;
        let node = result(&outcome, "SSLRenewResult")?;

        Ok(SslOrderResult {
            is_success: true,
            certificate_id: number(node, "CertificateID"),
            ssl_type: attr(node, "SSLType"),
            years: number(node, "Years"),
            status: None,
            order_id: number(node, "OrderId"),
            transaction_id: number(node, "TransactionId"),
            charged_amount: number(node, "ChargedAmount"),
        })
    }

    /// Submit the CSR and validation method for a purchased certificate
    pub fn activate(&self, activation: &SslActivation) -> Result<bool, ApiError> {
        let outcome = self.client.call(ACTIVATE, activation.to_params()?)?;
        Ok(flag(result(&outcome, "SSLActivateResult")?, "IsSuccess"))
    }
}

fn check_years(command: &str, years: u8) -> Result<(), ApiError> {
    if years == 0 {
        return Err(ApiError::invalid_argument(command, "Invalid parameter Years: must be at least 1"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{CannedTransport, client, ok_response};
    use crate::error::ErrorKind;

    fn activation() -> SslActivation {
        SslActivation {
            certificate_id: 1234,
            csr: "-----BEGIN CERTIFICATE REQUEST-----\nMIIB\n-----END CERTIFICATE REQUEST-----".into(),
            admin_email: "admin@example.com".into(),
            web_server_type: "nginx".into(),
            approver_email: None,
            http_dc_validation: true,
            dns_dc_validation: false,
        }
    }

    #[test]
    fn test_get_list() {
        let transport = CannedTransport::new(&ok_response(
            r#"<SSLListResult>
                 <SSL CertificateID="52556" HostName="" SSLType="Instant SSL" PurchaseDate="12/18/2013" ExpireDate="12/18/2014" IsExpiredYN="true" Status="newpurchase" Years="1"/>
               </SSLListResult>
               <Paging><TotalItems>1</TotalItems><CurrentPage>1</CurrentPage><PageSize>20</PageSize></Paging>"#,
        ));
        let query = SslListQuery {
            list_type: Some("NewPurchase".into()),
            ..SslListQuery::default()
        };
        let page = client(&transport).ssl().get_list(&query).unwrap();

        assert_eq!(page.certificates.len(), 1);
        let cert = &page.certificates[0];
        assert_eq!(cert.certificate_id, 52556);
        assert_eq!(cert.host_name, None);
        assert!(cert.is_expired);
        assert_eq!(cert.purchase_date, NaiveDate::from_ymd_opt(2013, 12, 18));
        assert_eq!(page.paging.total_items, 1);
        assert_eq!(transport.last_params().get("ListType"), Some("NewPurchase"));
    }

    #[test]
    fn test_get_info() {
        let transport = CannedTransport::new(&ok_response(
            r#"<SSLGetInfoResult Status="active" StatusDescription="Certificate Active" Type="PositiveSSL" IssuedOn="6/13/2014" Expires="6/13/2015" OrderId="1234">
                 <CertificateDetails><CommonName>domain.com</CommonName><ApproverEmail>admin@domain.com</ApproverEmail></CertificateDetails>
                 <Provider><OrderID>5678</OrderID><Name>COMODO</Name></Provider>
               </SSLGetInfoResult>"#,
        ));
        let info = client(&transport).ssl().get_info(1234).unwrap();
        assert_eq!(info.status, "active");
        assert_eq!(info.issued_on, NaiveDate::from_ymd_opt(2014, 6, 13));
        assert_eq!(info.common_name.as_deref(), Some("domain.com"));
        assert_eq!(info.provider.as_deref(), Some("COMODO"));
        assert_eq!(transport.last_params().get("CertificateID"), Some("1234"));
    }

    #[test]
    fn test_create() {
        let transport = CannedTransport::new(&ok_response(
            r#"<SSLCreateResult IsSuccess="true" OrderId="1234" TransactionId="5678" ChargedAmount="8.0000">
                 <SSLCertificate CertificateID="999" Created="12/10/2013" SSLType="PositiveSSL" Years="2" Status="NewPurchase"/>
               </SSLCreateResult>"#,
        ));
        let order = client(&transport).ssl().create("PositiveSSL", 2).unwrap();
        assert!(order.is_success);
        assert_eq!(order.certificate_id, Some(999));
        assert_eq!(order.years, Some(2));
        assert_eq!(order.charged_amount, Some(8.0));
        assert_eq!(transport.last_params().get("Type"), Some("PositiveSSL"));
    }

    #[test]
    fn test_renew() {
        let transport = CannedTransport::new(&ok_response(
            r#"<SSLRenewResult CertificateID="1000" Years="1" SSLType="PositiveSSL" OrderId="55" TransactionId="66" ChargedAmount="9.0000"/>"#,
        ));
        let order = client(&transport).ssl().renew(999, "PositiveSSL", 1).unwrap();
        assert_eq!(order.certificate_id, Some(1000));
        assert_eq!(order.transaction_id, Some(66));
        assert_eq!(transport.last_params().get("SSLType"), Some("PositiveSSL"));
    }

    #[test]
    fn test_zero_years_rejected_before_request() {
        let transport = CannedTransport::new("");
        let ssl_client = client(&transport);

        let err = ssl_client.ssl().create("PositiveSSL", 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.command(), Some(CREATE));

        let err = ssl_client.ssl().renew(999, "PositiveSSL", 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.command(), Some(RENEW));

        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn test_activate_sends_one_validation_method() {
        let transport = CannedTransport::new(&ok_response(
            r#"<SSLActivateResult ID="1234" IsSuccess="true"/>"#,
        ));
        assert!(client(&transport).ssl().activate(&activation()).unwrap());

        let params = transport.last_params();
        assert_eq!(params.get("HTTPDCValidation"), Some("TRUE"));
        assert!(params.get("DNSDCValidation").is_none());
        assert!(params.get("ApproverEmail").is_none());
        assert_eq!(params.get("WebServerType"), Some("nginx"));
    }

    #[test]
    fn test_activate_rejects_ambiguous_validation() {
        let transport = CannedTransport::new("");
        let both = SslActivation {
            dns_dc_validation: true,
            ..activation()
        };
        let none = SslActivation {
            http_dc_validation: false,
            ..activation()
        };
        for bad in [both, none] {
            let err = client(&transport).ssl().activate(&bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
        assert_eq!(transport.request_count(), 0);
    }
}
