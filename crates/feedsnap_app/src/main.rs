mod cli;
mod config;
mod logging;
mod run;

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use feed_logging::{feed_error, feed_info};

use crate::cli::Cli;
use crate::run::{RunError, EXIT_NO_INPUT};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::initialize(cli.log_level(), cli.log_file.as_deref());

    let urls = config::input_urls(cli.urls.as_deref(), |key| std::env::var(key).ok());
    if urls.is_empty() {
        eprintln!("Error: No feed URLs provided");
        eprintln!("{}", Cli::command().render_usage());
        eprintln!("   or: {}=<url1,url2,...> feedsnap", config::URLS_ENV);
        eprintln!("   or: {}=<url> feedsnap", config::URL_ENV);
        return ExitCode::from(EXIT_NO_INPUT);
    }

    let config = cli.into_run_config(urls);
    let outcome = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(RunError::from)
        .and_then(|runtime| runtime.block_on(run::run(&config, run::utc_timestamp)));

    match outcome {
        Ok(summary) => {
            feed_info!(
                "Generated {} ({} feeds, {} items)",
                summary.output.display(),
                summary.feeds,
                summary.items
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            feed_error!("{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}
