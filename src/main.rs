mod cli;
mod context;
mod describe;
mod download;
mod error;
mod logging;
mod output;
mod portal;
mod publish;
mod reading;
mod table;

use std::{process::ExitCode, time::Instant};

use clap::Parser;
use cli::{command, Cli, Commands};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    logging::init();
    let started = Instant::now();
    let cli = Cli::parse();

    let code = match &cli.command {
        Commands::Update(args) => match command::update(args).await {
            Ok(outcome) => {
                info!(
                    rows = outcome.rows,
                    columns = outcome.columns.len(),
                    published = outcome.published,
                    "File saved to `{}`",
                    outcome.csv_path.display()
                );
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("{}", e);
                ExitCode::from(e.exit_code())
            }
        },
        Commands::Describe(args) => {
            let text = command::describe(args);
            println!("Snippet:\n{}\n", text.dataset_snippet);
            println!("Dataset description:\n{}\n", text.dataset_description);
            println!("Dashboard description:\n{}", text.dashboard_description);
            ExitCode::SUCCESS
        }
    };

    info!("Execution time: {:.2?}", started.elapsed());

    code
}
