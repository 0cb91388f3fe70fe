use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use modelver_cli::{Cli, CliConfig, Commands, bootstrap, handlers, report};
use modelver_core::ArtifactKind;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let (code, message) = report(&err);
            eprintln!("Error: {message}");
            ExitCode::from(code)
        }
    }
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    // Bootstrap the CLI context (composition root)
    let config = CliConfig::from_env(cli.project_dir, cli.registry)?;
    let ctx = bootstrap(config)?;

    match command {
        Commands::AddData(args) => handlers::add::execute(&ctx, &args, ArtifactKind::Data),
        Commands::AddModel(args) => handlers::add::execute(&ctx, &args, ArtifactKind::Model),
        Commands::Switch {
            model,
            version,
            pull,
            force,
        } => handlers::switch::execute(&ctx, &model, &version, pull, force),
        Commands::PullFile { file_path, model } => {
            handlers::pull::execute_file(&ctx, &file_path, &model)
        }
        Commands::PullModel { model } => handlers::pull::execute_model(&ctx, &model),
        Commands::List { model } => handlers::list::execute(&ctx, model.as_deref()),
        Commands::Push { model, version } => handlers::push::execute(&ctx, &model, &version),
        Commands::Paths => handlers::paths::execute(&ctx),
        Commands::CheckDeps => handlers::check_deps::execute(&ctx),
    }
}
