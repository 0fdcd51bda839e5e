//! Namecheap CLI - Command-line interface for the Namecheap API

mod cli;
mod config;
mod error;
mod output;

use clap::Parser;
use cli::{Args, Command};
use config::Config;
use error::CliError;
use namecheap_client::{
    DomainListQuery, ListType, NamecheapClient, PricingQuery, SslListQuery,
};
use output::OutputFormatter;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

/// Log to stderr; `RUST_LOG` takes precedence over `-v`
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "warn,namecheap_client=debug,namecheap=debug",
        _ => "debug,namecheap_client=trace,namecheap=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(&args)?;
    let client = config.client()?;
    debug!(command = ?args.command, sandbox = config.sandbox, "Running command");

    let output = execute(&client, args.command, &OutputFormatter::new())?;
    print!("{}", output);
    Ok(())
}

/// Run one subcommand and render its result
fn execute(client: &NamecheapClient, command: Command, formatter: &OutputFormatter) -> Result<String, CliError> {
    let output = match command {
        Command::Check { domains } => formatter.checks(&client.domains().check(&domains)?),
        Command::List {
            search,
            expiring,
            expired,
            page,
            page_size,
        } => {
            let list_type = if expiring {
                ListType::Expiring
            } else if expired {
                ListType::Expired
            } else {
                ListType::All
            };
            let query = DomainListQuery {
                list_type: Some(list_type),
                search_term: search,
                page: Some(page),
                page_size: Some(page_size),
                sort_by: None,
            };
            formatter.domains(&client.domains().get_list(&query)?)
        }
        Command::Info { domain } => formatter.info(&client.domains().get_info(&domain)?),
        Command::Hosts { domain } => formatter.hosts(&client.dns().get_hosts(&domain)?),
        Command::Nameservers { domain } => formatter.nameservers(&client.dns().get_list(&domain)?),
        Command::Balances => formatter.balances(&client.users().get_balances()?),
        Command::Certs { page } => {
            let query = SslListQuery {
                page: Some(page),
                ..SslListQuery::default()
            };
            formatter.certificates(&client.ssl().get_list(&query)?)
        }
        Command::Pricing {
            product,
            action,
            name,
        } => {
            let query = PricingQuery {
                action_name: action,
                product_name: name,
                ..PricingQuery::new(product.into())
            };
            formatter.pricing(&client.users().get_pricing(&query)?)
        }
    };
    Ok(output)
}
