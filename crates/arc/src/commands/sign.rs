//! `arc sign` command implementation.

use std::io::{self, Write};
use std::path::Path;

use arc_config::{CliSettings, Config};
use arc_oauth1::{RequestDescriptor, sign_request};
use clap::Args;

use crate::error::CliError;

/// Arguments for the sign command.
#[derive(Args)]
pub(crate) struct SignArgs {
    /// Request URL, including any query.
    #[arg(short, long)]
    url: String,

    /// HTTP method.
    #[arg(short = 'X', long, default_value = "GET")]
    method: String,

    /// Request header as `Name: value` (repeatable).
    #[arg(short = 'H', long = "header", value_name = "HEADER")]
    headers: Vec<String>,

    /// Request body. Signed when Content-Type is form-urlencoded.
    #[arg(short, long)]
    body: Option<String>,

    /// Where to send parameters: header, body or querystring (overrides config).
    #[arg(short, long)]
    location: Option<String>,

    /// PLAINTEXT, HMAC-SHA1 or RSA-SHA1 (overrides config).
    #[arg(short = 's', long)]
    signature_method: Option<String>,

    /// Authorization header realm (overrides config).
    #[arg(long)]
    realm: Option<String>,

    /// Consumer key (overrides config).
    #[arg(long, env = "ARC_CONSUMER_KEY")]
    consumer_key: Option<String>,

    /// Access token (overrides config).
    #[arg(long, env = "ARC_TOKEN")]
    token: Option<String>,

    /// Access token secret (overrides config).
    #[arg(long, env = "ARC_TOKEN_SECRET", hide_env_values = true)]
    token_secret: Option<String>,

    /// Print the signed request as JSON.
    #[arg(long)]
    json: bool,
}

impl SignArgs {
    /// Execute the sign command.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or signing fails.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            consumer_key: self.consumer_key.clone(),
            token: self.token.clone(),
            token_secret: self.token_secret.clone(),
            signature_method: self.signature_method.clone(),
            location: self.location.clone(),
            realm: self.realm.clone(),
        };
        let config = Config::load(config_path, Some(&cli_settings))?;
        tracing::debug!(config_path = ?config.config_path, "Configuration loaded");

        let request = self.request()?;
        let credentials = config.oauth1.credentials()?;
        let options = config.oauth1.sign_options()?;
        let signed = sign_request(&request, &credentials, &options)?;

        let mut stdout = io::stdout().lock();
        if self.json {
            writeln!(stdout, "{}", serde_json::to_string_pretty(&signed)?)?;
        } else {
            write!(stdout, "{}", render(&signed))?;
        }
        Ok(())
    }

    /// Build the unsigned request from the arguments.
    fn request(&self) -> Result<RequestDescriptor, CliError> {
        let mut request = RequestDescriptor::new(self.method.to_ascii_uppercase(), &self.url);
        for header in &self.headers {
            let (name, value) = parse_header(header)?;
            request = request.with_header(name, value);
        }
        if let Some(body) = &self.body {
            request = request.with_body(body);
        }
        Ok(request)
    }
}

/// Split `Name: value`.
fn parse_header(header: &str) -> Result<(&str, &str), CliError> {
    match header.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value.trim())),
        _ => Err(CliError::Validation(format!(
            "invalid header {header:?}, expected \"Name: value\""
        ))),
    }
}

/// Request line, headers, blank line, body.
fn render(request: &RequestDescriptor) -> String {
    let mut text = format!("{} {}\n", request.method, request.url);
    for (name, value) in &request.headers {
        text.push_str(name);
        text.push_str(": ");
        text.push_str(value);
        text.push('\n');
    }
    if let Some(body) = &request.body {
        text.push('\n');
        text.push_str(body);
        text.push('\n');
    }
    text
}
