use anyhow::bail;
use clap::Subcommand;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::masking::{mask, MaskingRule};

#[derive(Subcommand)]
pub enum MaskCommands {
    #[command(about = "Show the display-safe value a rule produces for a sample")]
    Preview {
        #[arg(help = "Sample value")]
        value: String,

        #[arg(long, default_value = "PARTIAL", help = "Rule type: MASK_ALL or PARTIAL")]
        rule: String,

        #[arg(long, help = "Pattern for PARTIAL rules (ShowFirst4, ShowLast4, ***@***.com, ...)")]
        pattern: Option<String>,
    },
}

pub fn run(cmd: MaskCommands, format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        MaskCommands::Preview { value, rule, pattern } => {
            let rule = match rule.as_str() {
                "MASK_ALL" => MaskingRule::MaskAll,
                "PARTIAL" => MaskingRule::Partial { pattern: pattern.unwrap_or_default() },
                other => bail!("unknown rule type '{other}' (expected MASK_ALL or PARTIAL)"),
            };

            let masked = mask(&value, &rule);
            match format {
                OutputFormat::Json => {
                    println!("{}", json!({"input": value, "masked": masked}))
                }
                OutputFormat::Text => println!("{masked}"),
            }
        }
    }

    Ok(())
}
