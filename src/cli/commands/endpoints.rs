use std::path::PathBuf;

use anyhow::Context;
use clap::Subcommand;

use crate::cli::OutputFormat;
use crate::clients::{
    CreateEndpointRequest, EndpointRepository, HttpApi, QueryExecutor, TestQueryRequest,
};
use crate::config;
use crate::query::QueryConfig;

#[derive(Subcommand)]
pub enum EndpointCommands {
    #[command(about = "Run a query config against a connector and show sample rows")]
    Test {
        #[arg(help = "Connector id")]
        connector_id: String,

        #[arg(help = "Path to a QueryConfig JSON file")]
        config_file: PathBuf,

        #[arg(long, help = "Row limit (capped by configuration)")]
        limit: Option<i64>,
    },

    #[command(about = "Create a data endpoint from a request JSON file")]
    Create {
        #[arg(help = "Path to a CreateEndpointRequest JSON file")]
        request_file: PathBuf,
    },
}

pub async fn run(cmd: EndpointCommands, tenant: &str, format: OutputFormat) -> anyhow::Result<()> {
    let api = HttpApi::new(&config::config().api.base_url, tenant)
        .context("failed to build API client")?;

    match cmd {
        EndpointCommands::Test { connector_id, config_file, limit } => {
            let raw = std::fs::read_to_string(&config_file)
                .with_context(|| format!("failed to read {}", config_file.display()))?;
            let query_config: QueryConfig =
                serde_json::from_str(&raw).context("invalid query config")?;

            let preview = &config::config().preview;
            let requested = limit.unwrap_or(preview.row_limit);
            let limit = requested.min(preview.max_row_limit);
            if limit < requested {
                tracing::warn!(requested, capped_to = limit, "preview limit capped");
            }

            let response = api
                .test(TestQueryRequest { connector_id, query_config, limit: Some(limit) })
                .await
                .context("query test failed")?;

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
                OutputFormat::Text => {
                    if let Some(sql) = &response.generated_sql {
                        println!("-- {}", sql);
                    }
                    println!("{}", response.columns.join(" | "));
                    for row in &response.rows {
                        let cells: Vec<String> = response
                            .columns
                            .iter()
                            .map(|c| {
                                row.get(c).map(|v| v.to_string()).unwrap_or_else(|| "-".into())
                            })
                            .collect();
                        println!("{}", cells.join(" | "));
                    }
                    println!("({} rows)", response.row_count);
                }
            }
        }
        EndpointCommands::Create { request_file } => {
            let raw = std::fs::read_to_string(&request_file)
                .with_context(|| format!("failed to read {}", request_file.display()))?;
            let request: CreateEndpointRequest =
                serde_json::from_str(&raw).context("invalid endpoint request")?;

            let endpoint = api.create(request).await.context("failed to create endpoint")?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&endpoint)?),
                OutputFormat::Text => {
                    println!("Created endpoint '{}' (id {})", endpoint.name, endpoint.id);
                    println!("Route alias: {}", endpoint.path_alias);
                }
            }
        }
    }

    Ok(())
}
