use clap::Parser;
use datagate_console::cli::Cli;

#[tokio::main]
async fn main() {
    // Load .env if present so DATAGATE_API_BASE_URL, DATAGATE_TENANT_ID,
    // etc. are picked up before the config singleton initializes.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = datagate_console::cli::run(cli).await {
        match std::env::var("CLI_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
            _ => eprintln!("Error: {e}"),
        }
        std::process::exit(1);
    }
}
