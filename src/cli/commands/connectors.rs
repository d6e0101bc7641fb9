use anyhow::Context;
use clap::Subcommand;

use crate::cli::OutputFormat;
use crate::clients::{ConnectorDirectory, HttpApi};
use crate::config;

#[derive(Subcommand)]
pub enum ConnectorCommands {
    #[command(about = "List approved connectors for the tenant")]
    List,

    #[command(about = "Show tables registered on a connector")]
    Tables {
        #[arg(help = "Connector id")]
        connector_id: String,
    },
}

pub async fn run(cmd: ConnectorCommands, tenant: &str, format: OutputFormat) -> anyhow::Result<()> {
    let api = HttpApi::new(&config::config().api.base_url, tenant)
        .context("failed to build API client")?;

    match cmd {
        ConnectorCommands::List => {
            let connectors = api.list_approved().await.context("failed to list connectors")?;
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&connectors)?);
                }
                OutputFormat::Text => {
                    if connectors.is_empty() {
                        println!("No approved connectors.");
                    }
                    for connector in &connectors {
                        let kind = connector
                            .config
                            .as_ref()
                            .map(|c| c.type_name())
                            .unwrap_or("UNKNOWN");
                        println!(
                            "{}  {}  [{}]  {} tables",
                            connector.id,
                            connector.name,
                            kind,
                            connector.registered_tables.len()
                        );
                    }
                }
            }
        }
        ConnectorCommands::Tables { connector_id } => {
            let tables = api
                .registered_tables(&connector_id)
                .await
                .context("failed to fetch registered tables")?;
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&tables)?);
                }
                OutputFormat::Text => {
                    for table in &tables {
                        println!("{} ({} columns)", table.name, table.columns.len());
                        for column in &table.columns {
                            let pk = column.is_primary_key.unwrap_or(false);
                            println!(
                                "  {} {}{}",
                                column.name,
                                column.data_type,
                                if pk { " [pk]" } else { "" }
                            );
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
