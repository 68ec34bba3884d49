use clap::Parser;
use issue_tracker::cli::commands;
use issue_tracker::cli::{Cli, Commands, ServeArgs};
use issue_tracker::config::{CliOverrides, ServerConfig};
use issue_tracker::logging::init_logging;
use issue_tracker::{StructuredError, TrackerError};
use std::io::{self, IsTerminal};

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_else(|| Commands::Serve(ServeArgs::default()));

    let overrides = match &command {
        Commands::Serve(args) => build_cli_overrides(args),
        Commands::Config | Commands::Version => CliOverrides::default(),
    };

    let config = match ServerConfig::load(cli.config.as_deref(), &overrides) {
        Ok(config) => config,
        Err(e) => handle_error(&e, cli.json),
    };

    if let Err(e) = init_logging(cli.verbose, cli.quiet, Some(config.log_format)) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let result = match command {
        Commands::Serve(_) => commands::serve::execute(&config),
        Commands::Config => commands::config::execute(&config, cli.json),
        Commands::Version => commands::version::execute(cli.json),
    };

    if let Err(e) = result {
        handle_error(&e, cli.json);
    }
}

/// Handle errors with structured output support.
///
/// When --json is set or stdout is not a TTY, outputs structured JSON to stderr.
fn handle_error(err: &TrackerError, json_mode: bool) -> ! {
    let structured = StructuredError::from_error(err);
    let exit_code = structured.code.exit_code();

    if json_mode || !io::stdout().is_terminal() {
        let json = structured.to_json();
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string())
        );
    } else {
        eprintln!("{}", structured.to_human(io::stderr().is_terminal()));
    }

    std::process::exit(exit_code);
}

fn build_cli_overrides(args: &ServeArgs) -> CliOverrides {
    CliOverrides {
        host: args.host.clone(),
        port: args.port,
        no_seed: Some(args.no_seed),
        max_page_size: args.max_page_size,
    }
}
