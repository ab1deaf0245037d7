use std::env::VarError;

use anyhow::{bail, Context, Result};
use clap::clap_derive::Parser;
use once_cell::sync::OnceCell;
use pulseback_client::{
    ClientBuilder,
    Response,
    BASE_URL_ENV,
    DEFAULT_BASE_URL,
};
use url::Url;

use crate::client::WrappedClient;
use crate::ui::FancyToString;
use crate::{api_keys, whoami, RunCommand};

const PULSEBACK_SECRET_TOKEN_VAR: &str = "PULSEBACK_SECRET_TOKEN";

#[derive(Parser, Debug, Clone)]
/// Command-line utility to manage pulseback API keys
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonOptions,
    #[clap(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Parser, Debug, Clone)]
pub struct CommonOptions {
    #[arg(long, global = true)]
    /// Connect to a local pulseback service (http://localhost:8888)
    localhost: bool,
    #[arg(long, global = true, value_name = "URL", env(BASE_URL_ENV))]
    base_url: Option<Url>,
    #[arg(
        long,
        global = true,
        value_name = "TOKEN",
        env(PULSEBACK_SECRET_TOKEN_VAR),
        hide_env_values = true
    )]
    /// The API secret token. We attempt to read from `.env` if environment
    /// variable is not set
    secret_token: Option<String>,
    #[arg(long, global = true)]
    /// Displays a table with meta information about the response
    show_meta: bool,
    /// Ignore the confirmation prompt and always answer "yes"
    #[arg(long, short, global = true)]
    pub yes: bool,
}

#[derive(Parser, Debug, Clone)]
pub enum CliCommand {
    /// Commands for api keys
    ApiKey {
        #[command(subcommand)]
        command: api_keys::ApiKeyCommand,
    },
    #[command(name = "whoami")]
    /// Prints information about the current context/environment
    WhoAmI(whoami::WhoAmI),
}

impl CommonOptions {
    pub fn secret_token(&self) -> Result<String> {
        if let Some(ref token) = self.secret_token {
            return Ok(token.to_string());
        }

        // is it set in env (loaded from .env)
        let maybe_token = match std::env::var(PULSEBACK_SECRET_TOKEN_VAR) {
            | Ok(t) => Some(t),
            | Err(VarError::NotPresent) => None,
            | e => {
                // Note that we land here, only when the environment is loaded
                // through the .env file. If the environment variable was set
                // directly, then self.secret_token would have been set.
                return e.with_context(|| {
                    format!(
                        "Failed to load value of `{}` from .env file",
                        PULSEBACK_SECRET_TOKEN_VAR
                    )
                });
            }
        };

        if let Some(token) = maybe_token {
            return Ok(token);
        }

        bail!("No secret token was specified!")
    }

    pub fn base_url(&self) -> &Url {
        if self.localhost {
            static LOCALHOST_URL: OnceCell<Url> = OnceCell::new();
            LOCALHOST_URL
                .get_or_init(|| Url::parse("http://localhost:8888").unwrap())
        } else {
            self.base_url.as_ref().unwrap_or(&DEFAULT_BASE_URL)
        }
    }

    pub fn new_client(&self) -> Result<WrappedClient> {
        let base_url = self.base_url();
        let secret_token = self.secret_token()?;
        let inner = ClientBuilder::new()
            .base_url(base_url.clone())
            .context("Error while parsing base url")?
            .secret_token(secret_token)
            .build()?;
        Ok(WrappedClient {
            common_options: self.clone(),
            inner,
        })
    }

    pub fn show_response_meta<T>(&self, response: &Response<T>) {
        use colored::Colorize;
        // Print extra information.
        if self.show_meta {
            eprintln!();
            eprintln!(
                "{}",
                "<<-------------------------------------------------".green()
            );
            eprintln!("Path: {}", response.url());
            eprintln!("Status Code: {}", response.status_code().fancy());
            eprintln!(
                "Request Id: {}",
                response.request_id().clone().unwrap_or_default().green()
            );
            eprintln!(
                "{}",
                "-------------------------------------------------".green()
            );
            eprintln!();
        }
    }
}

impl CliCommand {
    pub async fn run<
        A: tokio::io::AsyncWrite + Send + Sync + Unpin,
        B: tokio::io::AsyncWrite + Send + Sync + Unpin,
    >(
        &self,
        out: &mut tokio::io::BufWriter<A>,
        err: &mut tokio::io::BufWriter<B>,
        common_options: &CommonOptions,
    ) -> Result<()> {
        match self {
            | CliCommand::ApiKey { command } => {
                command.run(out, err, common_options).await
            }
            | CliCommand::WhoAmI(c) => c.run(out, err, common_options).await,
        }
    }
}
