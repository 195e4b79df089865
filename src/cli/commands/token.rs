use anyhow::Context;
use clap::Subcommand;
use serde_json::json;

use crate::auth::JwtKeys;
use crate::cli::{utils, OutputFormat};
use crate::config::AppConfig;

#[derive(Subcommand)]
pub enum TokenCommands {
    #[command(about = "Sign a JSON payload with the configured secret")]
    Issue {
        #[arg(help = "JSON object to sign, e.g. '{\"email\":\"reader@example.com\"}'")]
        payload: String,
    },

    #[command(about = "Verify a token and print its claims")]
    Verify {
        #[arg(help = "Bearer token")]
        token: String,
    },
}

pub fn handle(cmd: TokenCommands, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let keys = JwtKeys::from_config(&config.security).context("ACCESS_TOKEN_SECRET is not configured")?;

    match cmd {
        TokenCommands::Issue { payload } => {
            let payload = serde_json::from_str(&payload).context("payload is not valid JSON")?;
            let token = keys.issue(payload)?;
            match output_format {
                OutputFormat::Json => utils::output_success(output_format, "token issued", Some(json!({ "token": token }))),
                OutputFormat::Text => {
                    println!("{}", token);
                    Ok(())
                }
            }
        }
        TokenCommands::Verify { token } => {
            let claims = keys.verify(&token)?;
            utils::output_success(output_format, "token is valid", Some(json!({ "claims": claims })))
        }
    }
}
