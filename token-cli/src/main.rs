use std::process::ExitCode;

use anyhow::{Context, anyhow};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use clap::{Parser, Subcommand};
use token_gate::{AuthError, GateConfig, Policy, TokenIssuer, TokenVerifier};

/// Mint and check SCM access tokens with the shared gate configuration.
///
/// Reads `AUTH_SECRET_KEY`, `AUTH_ISSUER` and `AUTH_AUDIENCE` from the
/// environment (or `.env`), the same variables the services use.
#[derive(Parser, Debug)]
#[command(name = "token-cli", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign a token for a subject
    Issue {
        #[arg(long)]
        sub: String,

        /// Role to grant; repeat for several
        #[arg(long = "role")]
        roles: Vec<String>,

        /// Lifetime in seconds
        #[arg(long, env = "ACCESS_TOKEN_TTL_SECONDS", default_value_t = 3600)]
        ttl: u64,

        /// Print only the token
        #[arg(long, default_value_t = false)]
        quiet: bool,
    },

    /// Verify a token and print its claims
    Verify {
        token: String,

        /// Also require one of these roles; repeat for several
        #[arg(long = "policy-role")]
        policy_roles: Vec<String>,
    },

    /// Print header and payload without checking anything
    Inspect { token: String },
}

fn issue(
    config: &GateConfig,
    sub: &str,
    roles: &[String],
    ttl: u64,
    quiet: bool,
) -> Result<String, AuthError> {
    let issued = TokenIssuer::new(config, ttl).issue(sub, roles)?;
    if quiet {
        return Ok(issued.access_token);
    }

    let claims = serde_json::to_string_pretty(&issued.claims).unwrap_or_default();
    Ok(format!(
        "token: {}\nexpires_in: {}\nclaims: {}",
        issued.access_token, issued.expires_in, claims
    ))
}

fn verify(config: &GateConfig, token: &str, policy_roles: &[String]) -> Result<String, AuthError> {
    let claims = TokenVerifier::new(config).verify(token.trim())?;

    if !policy_roles.is_empty() {
        Policy::new("CliPolicy", policy_roles.iter().cloned()).require(&claims)?;
    }

    Ok(serde_json::to_string_pretty(&claims).unwrap_or_default())
}

fn inspect(token: &str) -> anyhow::Result<String> {
    let mut parts = token.trim().split('.');
    let mut segment = |name: &str| -> anyhow::Result<serde_json::Value> {
        let raw = parts.next().ok_or_else(|| anyhow!("token has no {name} segment"))?;
        let bytes = URL_SAFE_NO_PAD
            .decode(raw)
            .with_context(|| format!("{name} is not base64url"))?;
        serde_json::from_slice(&bytes).with_context(|| format!("{name} is not JSON"))
    };

    let header = segment("header")?;
    let payload = segment("payload")?;
    Ok(format!(
        "header: {}\npayload: {}",
        serde_json::to_string_pretty(&header)?,
        serde_json::to_string_pretty(&payload)?
    ))
}

fn load_config() -> anyhow::Result<GateConfig> {
    dotenvy::dotenv().ok();
    GateConfig::from_env().context("gate configuration")
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let result = match cli.command {
        Command::Inspect { token } => {
            println!("{}", inspect(&token)?);
            return Ok(ExitCode::SUCCESS);
        }
        Command::Issue {
            sub,
            roles,
            ttl,
            quiet,
        } => issue(&load_config()?, &sub, &roles, ttl, quiet),
        Command::Verify {
            token,
            policy_roles,
        } => verify(&load_config()?, &token, &policy_roles),
    };

    match result {
        Ok(out) => {
            println!("{out}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{}: {}", err.code(), err);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
