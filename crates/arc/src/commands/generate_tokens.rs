//! `arc generate-tokens` command implementation.

use std::io::{self, BufRead, Write};
use std::path::Path;

use arc_config::{CliSettings, Config};
use arc_oauth1::{Credentials, TokenExchange, TokenFlow, UreqTransport};
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generate-tokens command.
#[derive(Args)]
pub(crate) struct GenerateTokensArgs {
    /// Consumer key (overrides config).
    #[arg(long, env = "ARC_CONSUMER_KEY")]
    consumer_key: Option<String>,

    /// PLAINTEXT, HMAC-SHA1 or RSA-SHA1 (overrides config).
    #[arg(short = 's', long)]
    signature_method: Option<String>,

    /// Extra request token parameter as `name=value` (repeatable).
    #[arg(short, long = "param", value_name = "NAME=VALUE")]
    params: Vec<String>,

    /// Verification code; prompted for when omitted.
    #[arg(long)]
    verifier: Option<String>,
}

impl GenerateTokensArgs {
    /// Execute the generate-tokens command.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is incomplete or an exchange fails.
    pub(crate) async fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            consumer_key: self.consumer_key.clone(),
            signature_method: self.signature_method.clone(),
            ..CliSettings::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;
        tracing::debug!(config_path = ?config.config_path, "Configuration loaded");
        let endpoints = config.require_endpoints()?;
        let Credentials {
            consumer_key,
            consumer_secret,
            ..
        } = config.oauth1.credentials()?;
        let extra_params = parse_params(&self.params)?;

        let exchange = TokenExchange::new(
            UreqTransport::new(endpoints.timeout()),
            endpoints.token_endpoints(),
            &consumer_key,
            &consumer_secret,
        )
        .with_signature_method(config.oauth1.signature_method()?)
        .with_location(config.oauth1.location()?)
        .with_token_method(endpoints.token_method()?)
        .with_callback(&endpoints.callback)
        .with_timeout(endpoints.timeout());
        let mut flow = TokenFlow::new();

        // Step 1: Get request token
        output.info("Step 1: Requesting temporary credentials...");
        let auth_url = flow.request_token(&exchange, &extra_params).await?;
        output.success("Temporary token received");
        if flow.pending().is_some_and(|token| !token.callback_confirmed) {
            output.warning("Provider did not confirm the callback (oauth_callback_confirmed)");
        }

        // Step 2: User authorization
        output.banner("Step 2: Authorization Required");
        output.info("\nPlease open this URL in your browser:");
        output.highlight(&format!("\n{auth_url}\n"));

        let verifier = match self.verifier {
            Some(verifier) => verifier,
            None => prompt_verifier()?,
        };
        if verifier.is_empty() {
            return Err(CliError::Validation("verification code required".to_owned()));
        }

        // Step 3: Exchange for access token
        output.info("\nStep 3: Exchanging for access token...");
        let credentials = flow.access_token(&exchange, &verifier).await?;

        output.banner("OAuth Authorization Successful!");
        output.info("\nAdd these credentials to your arc.toml:");
        output.info("\n[oauth1]");
        output.toml_entry("consumer_key", &credentials.consumer_key);
        output.toml_entry("token", credentials.token.as_deref().unwrap_or(""));
        output.toml_entry(
            "token_secret",
            credentials.token_secret.as_deref().unwrap_or(""),
        );

        Ok(())
    }
}

/// Read the verification code from stdin.
fn prompt_verifier() -> Result<String, CliError> {
    let mut stdout = io::stdout();
    write!(stdout, "Enter the verification code: ")?;
    stdout.flush()?;
    let mut verifier = String::new();
    io::stdin().lock().read_line(&mut verifier)?;
    Ok(verifier.trim().to_owned())
}

/// Split `name=value` arguments.
fn parse_params(params: &[String]) -> Result<Vec<(String, String)>, CliError> {
    params
        .iter()
        .map(|param| match param.split_once('=') {
            Some((name, value)) if !name.is_empty() => Ok((name.to_owned(), value.to_owned())),
            _ => Err(CliError::Validation(format!(
                "invalid parameter {param:?}, expected NAME=VALUE"
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_params() {
        let params = parse_params(&["scope=read write".to_owned(), "empty=".to_owned()]).unwrap();
        assert_eq!(
            params,
            vec![
                ("scope".to_owned(), "read write".to_owned()),
                ("empty".to_owned(), String::new()),
            ]
        );
    }

    #[test]
    fn test_parse_params_rejects_missing_name() {
        assert!(parse_params(&["=value".to_owned()]).is_err());
        assert!(parse_params(&["novalue".to_owned()]).is_err());
    }
}
