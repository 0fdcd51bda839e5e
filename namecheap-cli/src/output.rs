//! Plain-text rendering of API results

use chrono::NaiveDate;
use namecheap_client::{
    Balances, DnsHost, DomainCheck, DomainInfo, DomainPage, NameserverSettings, Paging,
    PricingEntry, SslPage,
};
use std::fmt::Write;

/// Renders results relative to a reference date
pub struct OutputFormatter {
    today: NaiveDate,
}

impl OutputFormatter {
    /// Formatter using the local date
    pub fn new() -> Self {
        Self::at(chrono::Local::now().date_naive())
    }

    /// Formatter with a fixed reference date
    pub fn at(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn checks(&self, checks: &[DomainCheck]) -> String {
        let mut out = String::new();
        for check in checks {
            let mark = if check.available { "✓ available" } else { "✗ taken" };
            let premium = match (check.is_premium_name, check.premium_registration_price) {
                (true, Some(price)) => format!(" (premium, {:.2})", price),
                (true, None) => " (premium)".to_string(),
                _ => String::new(),
            };
            let _ = writeln!(out, "{:<40} {}{}", check.domain, mark, premium);
        }
        out
    }

    pub fn domains(&self, page: &DomainPage) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{:<40} {:<12} {:<10} FLAGS", "DOMAIN", "EXPIRES", "LEFT");
        for domain in &page.domains {
            let mut flags = Vec::new();
            if domain.is_expired {
                flags.push("expired");
            }
            if domain.is_locked {
                flags.push("locked");
            }
            if domain.auto_renew {
                flags.push("auto-renew");
            }
            let _ = writeln!(
                out,
                "{:<40} {:<12} {:<10} {}",
                domain.name,
                format_date(domain.expires),
                self.days_left(domain.expires),
                flags.join(",")
            );
        }
        out.push_str(&format_paging(&page.paging, page.domains.len()));
        out
    }

    pub fn info(&self, info: &DomainInfo) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Domain:      {}", info.domain_name);
        let _ = writeln!(out, "Owner:       {}", info.owner_name);
        let _ = writeln!(out, "Status:      {}", info.status);
        let _ = writeln!(out, "Created:     {}", format_date(info.created));
        let _ = writeln!(
            out,
            "Expires:     {} ({})",
            format_date(info.expires),
            self.days_left(info.expires)
        );
        let _ = writeln!(out, "WhoisGuard:  {}", on_off(info.whoisguard_enabled));
        let _ = writeln!(
            out,
            "DNS:         {}",
            info.dns_provider.as_deref().unwrap_or("-")
        );
        for ns in &info.nameservers {
            let _ = writeln!(out, "  {}", ns);
        }
        out
    }

    pub fn hosts(&self, hosts: &[DnsHost]) -> String {
        if hosts.is_empty() {
            return "No host records.\n".to_string();
        }
        let mut out = String::new();
        let _ = writeln!(out, "{:<24} {:<6} {:<6} {:<40} MX", "NAME", "TYPE", "TTL", "ADDRESS");
        for host in hosts {
            let _ = writeln!(
                out,
                "{:<24} {:<6} {:<6} {:<40} {}",
                host.name,
                host.record_type.as_str(),
                host.ttl.map(|t| t.to_string()).unwrap_or_else(|| "-".into()),
                host.address,
                host.mx_pref.map(|p| p.to_string()).unwrap_or_default()
            );
        }
        out
    }

    pub fn nameservers(&self, settings: &NameserverSettings) -> String {
        let mut out = String::new();
        let source = if settings.is_using_our_dns { "registrar DNS" } else { "custom" };
        let _ = writeln!(out, "{} ({})", settings.domain, source);
        for ns in &settings.nameservers {
            let _ = writeln!(out, "  {}", ns);
        }
        out
    }

    pub fn balances(&self, balances: &Balances) -> String {
        let mut out = String::new();
        let rows = [
            ("Available", balances.available_balance),
            ("Account", balances.account_balance),
            ("Earned", balances.earned_amount),
            ("Withdrawable", balances.withdrawable_amount),
            ("Auto-renew due", balances.funds_required_for_auto_renew),
        ];
        for (label, amount) in rows {
            let _ = writeln!(out, "{:<16} {:>12.2} {}", label, amount, balances.currency);
        }
        out
    }

    pub fn certificates(&self, page: &SslPage) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{:<10} {:<24} {:<32} {:<12} STATUS", "ID", "TYPE", "HOST", "EXPIRES");
        for cert in &page.certificates {
            let _ = writeln!(
                out,
                "{:<10} {:<24} {:<32} {:<12} {}",
                cert.certificate_id,
                cert.ssl_type,
                cert.host_name.as_deref().unwrap_or("-"),
                format_date(cert.expire_date),
                cert.status
            );
        }
        out.push_str(&format_paging(&page.paging, page.certificates.len()));
        out
    }

    pub fn pricing(&self, entries: &[PricingEntry]) -> String {
        if entries.is_empty() {
            return "No prices found.\n".to_string();
        }
        let mut out = String::new();
        let _ = writeln!(out, "{:<20} {:<12} {:<10} {:>10} {:>10}", "PRODUCT", "ACTION", "TERM", "PRICE", "YOURS");
        for entry in entries {
            let _ = writeln!(
                out,
                "{:<20} {:<12} {:<10} {:>10} {:>10} {}",
                entry.product,
                entry.category,
                format!("{} {}", entry.duration, entry.duration_type.to_lowercase()),
                format_price(entry.price),
                format_price(entry.coupon_price.or(entry.your_price)),
                entry.currency
            );
        }
        out
    }

    fn days_left(&self, date: Option<NaiveDate>) -> String {
        match date {
            Some(date) => {
                let days = (date - self.today).num_days();
                if days < 0 {
                    format!("{}d ago", -days)
                } else {
                    format!("{}d", days)
                }
            }
            None => "-".to_string(),
        }
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn format_price(price: Option<f64>) -> String {
    price.map(|p| format!("{:.2}", p)).unwrap_or_else(|| "-".to_string())
}

fn format_paging(paging: &Paging, shown: usize) -> String {
    if paging.page_size == 0 {
        return String::new();
    }
    let pages = paging.total_items.div_ceil(paging.page_size).max(1);
    format!(
        "\n{} shown, {} total (page {} of {})\n",
        shown, paging.total_items, paging.current_page, pages
    )
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}
