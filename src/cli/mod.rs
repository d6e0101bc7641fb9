pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "datagate")]
#[command(about = "Datagate CLI - console for data connectors and masked data endpoints")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Tenant id (defaults to configured tenant)")]
    pub tenant: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Browse approved connectors and their registered tables")]
    Connectors {
        #[command(subcommand)]
        cmd: commands::connectors::ConnectorCommands,
    },

    #[command(about = "Test and create data endpoints")]
    Endpoints {
        #[command(subcommand)]
        cmd: commands::endpoints::EndpointCommands,
    },

    #[command(about = "Preview column masking rules")]
    Mask {
        #[command(subcommand)]
        cmd: commands::mask::MaskCommands,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let format = OutputFormat::from_cli(&cli);
    let tenant = cli
        .tenant
        .clone()
        .unwrap_or_else(|| crate::config::config().api.default_tenant.clone());

    match cli.command {
        Commands::Connectors { cmd } => commands::connectors::run(cmd, &tenant, format).await,
        Commands::Endpoints { cmd } => commands::endpoints::run(cmd, &tenant, format).await,
        Commands::Mask { cmd } => commands::mask::run(cmd, format),
    }
}
