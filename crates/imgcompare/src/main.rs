mod cli;
mod commands;
mod config;
mod ingest;
mod report;
mod store;

use clap::Parser;
use config::ResolvedCompareConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("imgcompare=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    match cli.command {
        cli::Command::Init { force } => {
            commands::init(force)?;
        }
        cli::Command::Compare {
            first,
            second,
            view,
            swap,
            output,
            report,
            json,
        } => {
            let config = ResolvedCompareConfig::new(view.into())?;
            let out = commands::CompareOutput {
                swap,
                output,
                report,
                json,
            };
            commands::compare(config, &first, &second, out).await?;
        }
        cli::Command::Analyze {
            first,
            second,
            output_dir,
            json,
        } => {
            commands::analyze(&first, &second, output_dir, json).await?;
        }
        cli::Command::Locate {
            source,
            template,
            output,
            json,
        } => {
            commands::locate(&source, &template, output, json).await?;
        }
    }

    Ok(())
}
