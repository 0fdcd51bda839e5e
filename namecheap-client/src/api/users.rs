//! `namecheap.users.*` commands

use super::{attr, number, opt_attr, result};
use crate::client::NamecheapClient;
use crate::error::ApiError;
use crate::payload::Payload;
use crate::request::Params;
use crate::transport::Transport;
use std::fmt;

const GET_BALANCES: &str = "namecheap.users.getBalances";
const GET_PRICING: &str = "namecheap.users.getPricing";

/// Account balances
#[derive(Debug, Clone, PartialEq)]
pub struct Balances {
    pub currency: String,
    pub available_balance: f64,
    pub account_balance: f64,
    pub earned_amount: f64,
    pub withdrawable_amount: f64,
    pub funds_required_for_auto_renew: f64,
}

/// Product family accepted by `get_pricing`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductType {
    Domain,
    SslCertificate,
    Whoisguard,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Domain => "DOMAIN",
            ProductType::SslCertificate => "SSLCERTIFICATE",
            ProductType::Whoisguard => "WHOISGUARD",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filters for `get_pricing`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingQuery {
    pub product_type: ProductType,
    /// e.g. `DOMAINS`, `COMODO`
    pub product_category: Option<String>,
    pub promotion_code: Option<String>,
    /// e.g. `REGISTER`, `RENEW`, `TRANSFER`
    pub action_name: Option<String>,
    /// e.g. `com` for domains, `PositiveSSL` for certificates
    pub product_name: Option<String>,
}

impl PricingQuery {
    pub fn new(product_type: ProductType) -> Self {
        Self {
            product_type,
            product_category: None,
            promotion_code: None,
            action_name: None,
            product_name: None,
        }
    }
}

/// One price point, flattened out of the type/category/product nesting
#[derive(Debug, Clone, PartialEq)]
pub struct PricingEntry {
    pub product_type: String,
    pub category: String,
    pub product: String,
    pub duration: u32,
    pub duration_type: String,
    pub price: Option<f64>,
    pub regular_price: Option<f64>,
    pub your_price: Option<f64>,
    pub coupon_price: Option<f64>,
    pub currency: String,
}

/// `namecheap.users.*` commands
pub struct Users<'a, T> {
    client: &'a NamecheapClient<T>,
}

impl<'a, T: Transport> Users<'a, T> {
    pub(crate) fn new(client: &'a NamecheapClient<T>) -> Self {
        Self { client }
    }

    /// Current account balances
    pub fn get_balances(&self) -> Result<Balances, ApiError> {
        let outcome = self.client.call(GET_BALANCES, Params::new())?;
        let node = result(&outcome, "UserGetBalancesResult")?;
        let amount = |name: &str| number(node, name).unwrap_or(0.0);

        Ok(Balances {
            currency: attr(node, "Currency"),
            available_balance: amount("AvailableBalance"),
            account_balance: amount("AccountBalance"),
            earned_amount: amount("EarnedAmount"),
            withdrawable_amount: amount("WithdrawableAmount"),
            funds_required_for_auto_renew: amount("FundsRequiredForAutoRenew"),
        })
    }

    /// Price list for a product family
    pub fn get_pricing(&self, query: &PricingQuery) -> Result<Vec<PricingEntry>, ApiError> {
        let params = Params::new()
            .with("ProductType", query.product_type)
            .with_opt("ProductCategory", query.product_category.as_deref())
            .with_opt("PromotionCode", query.promotion_code.as_deref())
            .with_opt("ActionName", query.action_name.as_deref())
            .with_opt("ProductName", query.product_name.as_deref());
        let outcome = self.client.call(GET_PRICING, params)?;
        let node = result(&outcome, "UserGetPricingResult")?;

        let mut entries = Vec::new();
        for product_type in node.children("ProductType") {
            let type_name = attr(product_type, "Name");
            for category in product_type.children("ProductCategory") {
                let category_name = attr(category, "Name");
                for product in category.children("Product") {
                    let product_name = attr(product, "Name");
                    entries.extend(product.children("Price").map(|price| PricingEntry {
                        product_type: type_name.clone(),
                        category: category_name.clone(),
                        product: product_name.clone(),
                        ..price_entry(price)
                    }));
                }
            }
        }
        Ok(entries)
    }
}

fn price_entry(price: &Payload) -> PricingEntry {
    PricingEntry {
        product_type: String::new(),
        category: String::new(),
        product: String::new(),
        duration: number(price, "Duration").unwrap_or(0),
        duration_type: attr(price, "DurationType"),
        price: number(price, "Price"),
        regular_price: number(price, "RegularPrice"),
        your_price: number(price, "YourPrice"),
        coupon_price: opt_attr(price, "CouponPrice").and_then(|v| v.parse().ok()),
        currency: attr(price, "Currency"),
    }
}
