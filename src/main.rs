//! media-capture CLI entry point

use std::process::ExitCode;

use clap::Parser;

use media_capture::cli::{
    config_cmd::handle_config_command, init_tracing, load_merged_config, record_config,
    resolve_record_options, run_record, Cli, Commands, Presenter, EXIT_ERROR, EXIT_USAGE_ERROR,
};
use media_capture::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let presenter = Presenter::new();

    match cli.command {
        Commands::Config { action } => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        Commands::Record(args) => {
            let config = load_merged_config(record_config(&args)).await;
            let options = match resolve_record_options(&args, &config) {
                Ok(options) => options,
                Err(e) => {
                    presenter.error(&format!("Invalid duration: {}", e));
                    return ExitCode::from(EXIT_USAGE_ERROR);
                }
            };
            run_record(options).await
        }
    }
}
