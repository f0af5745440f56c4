mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use doxie_api::DoxieClient;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(mut cli: Cli) -> Result<(), CliError> {
    if let Command::Completions(args) = &cli.command {
        use clap::CommandFactory;
        use clap_complete::generate;

        let mut cmd = Cli::command();
        generate(args.shell, &mut cmd, "doxie", &mut std::io::stdout());
        return Ok(());
    }

    let cfg = config::load_config_or_default();
    cli.global.output = Some(config::output_format(&cli.global, &cfg));

    match cli.command {
        // Config commands don't need a scanner connection
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        cmd => {
            let resolved = config::resolve(&cli.global, &cfg)?;
            let client = DoxieClient::new(resolved.client, &resolved.transport)?;

            tracing::debug!(command = ?cmd, address = client.address(), "dispatching command");
            commands::dispatch(cmd, &client, &cli.global)
                .await
                .map_err(|e| e.with_profile(&resolved.profile_name))
        }
    }
}
