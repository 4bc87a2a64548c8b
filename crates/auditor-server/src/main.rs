//! `auditor` - upload/scan service and one-shot pipeline commands.

mod cli;
mod commands;
mod error;
mod output;

use auditor_server::telemetry;
use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = cli::Cli::parse();

    let filter = match (&cli.command, cli.verbose) {
        (cli::Commands::Serve(_), _) => telemetry::SERVER_FILTER,
        (_, true) => telemetry::VERBOSE_FILTER,
        (_, false) => telemetry::QUIET_FILTER,
    };
    telemetry::init(filter);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    let result = match &cli.command {
        cli::Commands::Serve(args) => commands::serve::execute(args).await,
        cli::Commands::Extract(args) => commands::extract::execute(args, &*formatter),
        cli::Commands::Scan(args) => commands::scan::execute(args, &*formatter).await,
        cli::Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            formatter.format_error(&err);
            ExitCode::FAILURE
        }
    }
}
