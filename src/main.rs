use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chainrig::ConfigLoader;
use chainrig::cli::{Output, commands};

#[derive(Parser)]
#[command(name = "chainrig")]
#[command(
    version,
    about = "Resolve multi-network smart contract toolchain configuration"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project config file (default: ./chainrig.toml)
    #[arg(long, short, global = true, env = "CHAINRIG_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resolved configuration (secrets redacted)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json"
        )]
        format: String,
    },

    /// Describe one network profile
    Network {
        #[arg(help = "Network name (case-sensitive)")]
        name: String,
    },

    /// Check that a network is ready for signed transactions
    Check {
        #[arg(long, short, help = "Network to check (default: default network)")]
        network: Option<String>,
        #[arg(long, help = "Also require a block explorer API key")]
        verify: bool,
        #[arg(long, help = "Also require a resolved, parsable RPC endpoint")]
        endpoint: bool,
    },

    /// Select the compiler profile for a version
    Compiler {
        #[arg(help = "Exact compiler version, e.g. 0.8.25")]
        version: String,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// Manage configuration sources
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show configuration source paths
    Path,
    /// Show the declared tree before interpolation
    Defaults {
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json"
        )]
        format: String,
    },
    /// Write a starter project config
    Init {
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Output::new().error(&format!("Error: {}", e));
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let project_file = cli.config.as_deref();

    match cli.command {
        Commands::Show { format } => {
            let config = ConfigLoader::load(project_file)?;
            commands::show::run(&config, &format)?;
        }
        Commands::Network { name } => {
            let config = ConfigLoader::load(project_file)?;
            commands::network::run(&config, &name)?;
        }
        Commands::Check {
            network,
            verify,
            endpoint,
        } => {
            let config = ConfigLoader::load(project_file)?;
            commands::check::run(&config, network.as_deref(), verify, endpoint)?;
        }
        Commands::Compiler { version, format } => {
            let config = ConfigLoader::load(project_file)?;
            commands::compiler::run(&config, &version, &format)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Path => commands::config::path()?,
            ConfigAction::Defaults { format } => commands::config::defaults(project_file, &format)?,
            ConfigAction::Init { force } => commands::config::init(project_file, force)?,
        },
    }

    Ok(())
}
