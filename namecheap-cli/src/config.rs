//! Configuration resolution from CLI args

use crate::cli::Args;
use crate::error::CliError;
use namecheap_client::{NamecheapClient, ResponseFormat};
use std::time::Duration;
use zeroize::Zeroizing;

const API_KEY_VAR: &str = "NAMECHEAP_API_KEY";

/// Resolved runtime configuration
pub struct Config {
    pub api_user: String,
    pub username: Option<String>,
    pub client_ip: String,
    pub sandbox: bool,
    pub timeout: Duration,
    pub format: ResponseFormat,
    /// API key (zeroized on drop)
    pub api_key: Zeroizing<String>,
}

impl Config {
    /// Build config from CLI args, prompting for the API key if it is not
    /// in the environment
    pub fn from_args(args: &Args) -> Result<Self, CliError> {
        Self::resolve(args, std::env::var(API_KEY_VAR).ok(), prompt_api_key)
    }

    fn resolve(
        args: &Args,
        env_key: Option<String>,
        prompt: impl FnOnce() -> Result<Zeroizing<String>, CliError>,
    ) -> Result<Self, CliError> {
        let api_user = non_empty(args.api_user.as_deref())
            .ok_or_else(|| CliError::Config("--api-user or NAMECHEAP_API_USER is required".to_string()))?;
        let client_ip = non_empty(args.client_ip.as_deref())
            .ok_or_else(|| CliError::Config("--client-ip or NAMECHEAP_CLIENT_IP is required".to_string()))?;

        let api_key = match env_key.filter(|k| !k.trim().is_empty()) {
            Some(key) => Zeroizing::new(key),
            None => prompt()?,
        };

        Ok(Config {
            api_user: api_user.to_string(),
            username: non_empty(args.username.as_deref()).map(String::from),
            client_ip: client_ip.to_string(),
            sandbox: args.sandbox,
            timeout: args.timeout,
            format: args.format.into(),
            api_key,
        })
    }

    /// Build the API client
    pub fn client(&self) -> Result<NamecheapClient, CliError> {
        let mut builder = NamecheapClient::builder()
            .api_user(&self.api_user)
            .api_key(self.api_key.as_str())
            .client_ip(&self.client_ip)
            .sandbox(self.sandbox)
            .timeout(self.timeout)
            .response_format(self.format);
        if let Some(username) = &self.username {
            builder = builder.username(username);
        }
        Ok(builder.build()?)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Prompt user for the API key
fn prompt_api_key() -> Result<Zeroizing<String>, CliError> {
    println!("{} is not set.", API_KEY_VAR);
    let key = rpassword::prompt_password("Enter Namecheap API key: ")
        .map_err(|e| CliError::Config(format!("Failed to read API key: {}", e)))?;
    if key.trim().is_empty() {
        return Err(CliError::Config("API key is required.".to_string()));
    }
    Ok(Zeroizing::new(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec![
            "namecheap",
            "--api-user",
            "apiuser",
            "--client-ip",
            "192.0.2.10",
        ];
        argv.extend_from_slice(extra);
        argv.push("balances");
        Args::try_parse_from(argv).unwrap()
    }

    fn no_prompt() -> Result<Zeroizing<String>, CliError> {
        panic!("prompt should not be called")
    }

    #[test]
    fn test_env_key_skips_prompt() {
        let config = Config::resolve(&args(&[]), Some("envkey".into()), no_prompt).unwrap();
        assert_eq!(config.api_key.as_str(), "envkey");
        assert_eq!(config.api_user, "apiuser");
        assert_eq!(config.username, None);
        assert_eq!(config.format, ResponseFormat::Xml);
    }

    #[test]
    fn test_missing_key_prompts() {
        let config = Config::resolve(&args(&[]), Some("  ".into()), || Ok(Zeroizing::new("typed".into()))).unwrap();
        assert_eq!(config.api_key.as_str(), "typed");
    }

    #[test]
    fn test_missing_api_user_is_config_error() {
        let parsed = Args::try_parse_from(["namecheap", "--api-user", " ", "--client-ip", "192.0.2.10", "balances"]).unwrap();
        let err = Config::resolve(&parsed, Some("k".into()), no_prompt).err().unwrap();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_client_builds_from_config() {
        let config = Config::resolve(
            &args(&["--sandbox", "--username", "reseller", "--format", "json"]),
            Some("envkey".into()),
            no_prompt,
        )
        .unwrap();
        let client = config.client().unwrap();

        assert_eq!(client.credentials().username(), "reseller");
        assert_eq!(client.response_format(), ResponseFormat::Json);
        assert_eq!(
            client.transport().endpoint().as_str(),
            namecheap_client::SANDBOX_URL
        );
    }

    #[test]
    fn test_invalid_client_ip_fails_at_build() {
        let parsed = Args::try_parse_from(["namecheap", "--api-user", "u", "--client-ip", "nope", "balances"]).unwrap();
        let config = Config::resolve(&parsed, Some("k".into()), no_prompt).unwrap();
        let err = config.client().err().unwrap();
        assert_eq!(err.exit_code(), 2);
    }
}
