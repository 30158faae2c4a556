//! `authsome` command line
//!
//! Operator helpers around a deployment's configuration: hashing passwords
//! the way the backend will, checking and printing the effective config,
//! and minting cookie secrets.

use anyhow::{Context, Result, bail};
use authsome_domain::PersistenceToken;
use authsome_domain::ports::PasswordHasher;
use authsome_infrastructure::config::{AppConfig, ConfigLoader};
use authsome_infrastructure::logging::init_logging;
use authsome_providers::crypto::{HashService, TokenGenerator};
use authsome_providers::duration::parse_duration;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command line interface for Authsome
#[derive(Parser, Debug)]
#[command(name = "authsome")]
#[command(about = "Authsome - identity resolution and persistent login tooling")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs using the configured logging settings
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Hash a password with the configured salt
    Hash {
        password: String,

        /// Hash method (defaults to security.default_hash_method)
        #[arg(short, long)]
        method: Option<String>,

        /// Do not prepend the configured salt
        #[arg(long)]
        no_salt: bool,
    },

    /// Validate and print the effective configuration
    Config {
        /// Only validate, print nothing but a confirmation
        #[arg(long)]
        check: bool,
    },

    /// Persistence token and cookie secret helpers
    #[command(subcommand)]
    Token(TokenCommand),
}

#[derive(Subcommand, Debug)]
pub enum TokenCommand {
    /// Generate a hex cookie secret for security.cookie_secret
    Secret,

    /// Check a `<token>:<duration>` cookie value without revealing the token
    Inspect { value: String },
}

impl Cli {
    fn load_config(&self) -> Result<AppConfig> {
        let loader = match &self.config {
            Some(path) => {
                if !path.exists() {
                    bail!("configuration file {} does not exist", path.display());
                }
                ConfigLoader::new().with_config_path(path)
            }
            None => ConfigLoader::new(),
        };
        loader.load().context("failed to load configuration")
    }
}

/// Run a parsed command, returning what should be printed
pub fn run(cli: &Cli) -> Result<String> {
    match &cli.command {
        Command::Token(TokenCommand::Secret) => Ok(TokenGenerator::cookie_secret()),
        Command::Token(TokenCommand::Inspect { value }) => inspect_token(value),
        Command::Hash {
            password,
            method,
            no_salt,
        } => {
            let config = configured(cli)?;
            let hasher = HashService::new(config.security.salt.clone())
                .with_bcrypt_cost(config.security.bcrypt_cost);
            let method = method
                .as_deref()
                .unwrap_or(&config.security.default_hash_method);
            hasher
                .hash(password, method, !no_salt)
                .with_context(|| format!("failed to hash with '{method}'"))
        }
        Command::Config { check } => {
            let config = configured(cli)?;
            if *check {
                return Ok("Configuration OK".to_string());
            }
            render_config(&config)
        }
    }
}

fn configured(cli: &Cli) -> Result<AppConfig> {
    let config = cli.load_config()?;
    if cli.verbose {
        init_logging(&config.logging)?;
    }
    Ok(config)
}

fn inspect_token(value: &str) -> Result<String> {
    let token: PersistenceToken = value.parse()?;
    let lifetime = parse_duration(token.duration())
        .map(|d| format!("{}s", d.as_secs()))
        .unwrap_or_else(|_| "unparseable".to_string());
    Ok(format!(
        "token: {} chars\nduration: {} ({lifetime})",
        token.token().len(),
        token.duration()
    ))
}

/// Effective configuration as TOML with secrets masked
fn render_config(config: &AppConfig) -> Result<String> {
    let mut shown = config.clone();
    if !shown.security.salt.is_empty() {
        shown.security.salt = "<redacted>".to_string();
    }
    if shown.security.cookie_secret.is_some() {
        shown.security.cookie_secret = Some("<redacted>".to_string());
    }
    toml::to_string_pretty(&shown).context("failed to render configuration")
}
