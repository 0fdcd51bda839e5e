//! CLI argument parsing using clap

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use namecheap_client::{ProductType, ResponseFormat};
use std::time::Duration;

/// Response format requested from the client
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum Format {
    /// XML (default)
    #[default]
    Xml,
    /// The "array" flavour of XML
    Array,
    /// JSON
    Json,
}

impl From<Format> for ResponseFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Xml => ResponseFormat::Xml,
            Format::Array => ResponseFormat::Array,
            Format::Json => ResponseFormat::Json,
        }
    }
}

/// Product family for pricing
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum Product {
    Domain,
    Ssl,
    Whoisguard,
}

impl From<Product> for ProductType {
    fn from(product: Product) -> Self {
        match product {
            Product::Domain => ProductType::Domain,
            Product::Ssl => ProductType::SslCertificate,
            Product::Whoisguard => ProductType::Whoisguard,
        }
    }
}

/// Namecheap API command-line client
#[derive(Parser, Debug)]
#[command(name = "namecheap", about = "Query the Namecheap API", version)]
pub struct Args {
    /// API user
    #[arg(long, env = "NAMECHEAP_API_USER", global = true)]
    pub api_user: Option<String>,

    /// User to act on behalf of (defaults to the API user)
    #[arg(long, env = "NAMECHEAP_USERNAME", global = true)]
    pub username: Option<String>,

    /// Whitelisted IP address of this machine
    #[arg(long, env = "NAMECHEAP_CLIENT_IP", global = true)]
    pub client_ip: Option<String>,

    /// Use the sandbox endpoint (env accepts 1/0, true/false, yes/no, on/off)
    #[arg(
        long,
        env = "NAMECHEAP_SANDBOX",
        global = true,
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub sandbox: bool,

    /// Per-request timeout, e.g. "30s" or "1m"
    #[arg(long, value_parser = humantime::parse_duration, default_value = "30s", global = true)]
    pub timeout: Duration,

    /// Format to parse responses as
    #[arg(long, value_enum, default_value = "xml", global = true)]
    pub format: Format,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Check domain availability
    Check {
        /// Domains to check
        #[arg(required = true, num_args = 1..)]
        domains: Vec<String>,
    },

    /// List domains in the account
    List {
        /// Only domains matching this term
        #[arg(short, long)]
        search: Option<String>,

        /// Only domains expiring soon
        #[arg(long, conflicts_with = "expired")]
        expiring: bool,

        /// Only expired domains
        #[arg(long)]
        expired: bool,

        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Domains per page (10-100)
        #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(10..=100))]
        page_size: u32,
    },

    /// Show details of a domain
    Info {
        domain: String,
    },

    /// List DNS host records of a domain
    Hosts {
        domain: String,
    },

    /// Show nameservers of a domain
    Nameservers {
        domain: String,
    },

    /// Show account balances
    Balances,

    /// List SSL certificates
    Certs {
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Show prices for a product family
    Pricing {
        /// Product family
        #[arg(value_enum)]
        product: Product,

        /// Action, e.g. REGISTER, RENEW, TRANSFER
        #[arg(long)]
        action: Option<String>,

        /// Product name, e.g. com
        #[arg(long)]
        name: Option<String>,
    },
}
