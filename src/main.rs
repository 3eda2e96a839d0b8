use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use whatsapp_gateway::config::loader::load_config;
use whatsapp_gateway::dispatch::client::{build_http_client, MessageDispatcher};
use whatsapp_gateway::helpers::time::SystemClock;
use whatsapp_gateway::server::dlr;
use whatsapp_gateway::token::manager::TokenManager;
use whatsapp_gateway::utils::logging::{self, LogLevel};
use whatsapp_gateway::InMemoryTokenStore;

#[derive(Debug, Parser)]
#[command(name = "whatsapp-gateway", about = "WhatsApp PSMS gateway client")]
struct Cli {
    /// Path to the gateway YAML config
    #[arg(long, short, default_value = "whatsapp.yaml", env = "WHATSAPP_CONFIG")]
    config: String,

    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Send one templated message
    Send {
        /// Recipient number, international format
        to: String,
        /// Registered template id
        template_id: String,
        /// Template parameters, appended in order
        params: Vec<String>,
    },
    /// Force a token refresh using the configured seed
    Refresh,
    /// Enable, disable, or delete a token at the gateway
    Token {
        /// One of: enable, disable, delete
        action: String,
        token: String,
    },
    /// Serve the delivery-report webhook
    Dlr,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    logging::run(&config, cli.log_level);

    let client = build_http_client(config.timeout_seconds)?;
    let store = Arc::new(InMemoryTokenStore::new());
    let clock = Arc::new(SystemClock);
    let token_manager = Arc::new(TokenManager::new(client.clone(), &config, store, clock));

    match cli.command {
        Command::Send { to, template_id, params } => {
            let dispatcher = MessageDispatcher::new(
                client,
                &config.api_base_url,
                &config.username,
                &config.business_number,
                token_manager,
            );
            let result = dispatcher.send_message(&to, &template_id, &params).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
            if !result.success {
                std::process::exit(1);
            }
        }
        Command::Refresh => {
            println!("{}", token_manager.refresh_token().await);
        }
        Command::Token { action, token } => {
            let response = token_manager
                .manage_token(&action, &token)
                .await
                .map_err(|err| anyhow!(err.to_string()))?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Dlr => {
            let server = config
                .server
                .clone()
                .ok_or_else(|| anyhow!("config is missing the server block"))?;
            dlr::serve(&server).await?;
        }
    }

    Ok(())
}
