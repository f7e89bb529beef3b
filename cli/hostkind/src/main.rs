//! hostkind CLI — classify host platforms from raw OS and architecture names.

mod commands;
mod settings;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use commands::OutputFormat;

#[derive(Parser)]
#[command(name = "hostkind", version, about = "Host platform classification")]
struct Cli {
    /// Config file (default: $HOSTKIND_CONFIG, then the nearest hostkind.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current and system platforms of this host
    Detect {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Classify a raw architecture name (e.g. "amd64", "armv7l")
    Arch {
        /// Raw architecture name
        name: String,
        /// Treat the host as little-endian (maps ppc/ppc64 to their LE forms)
        #[arg(long)]
        little_endian: bool,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Classify a raw operating system name (e.g. "Mac OS X", "SunOS")
    Os {
        /// Raw operating system name
        name: String,
        /// Runtime identity (e.g. "dalvik", "robovm")
        #[arg(long)]
        runtime: Option<String>,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Describe the platform formed by an OS and an architecture
    Describe {
        /// Raw operating system name
        os: String,
        /// Raw architecture name
        arch: String,
        #[arg(long)]
        little_endian: bool,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Print the application data directory for a folder name
    DataDir {
        /// Application folder name
        folder: String,
        /// Use this operating system's convention instead of the host's
        #[arg(long)]
        os: Option<String>,
    },
    /// List every canonical architecture and operating system
    List,
    /// Manage hostkind.toml
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a default hostkind.toml in the current directory
    Init,
    /// Check a config file (default: the one that would be loaded)
    Validate {
        path: Option<PathBuf>,
    },
    /// Print the effective configuration
    Show,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Detect { format } => {
            let (config, source) = settings::resolve(cli.config.as_deref(), &cwd)?;
            commands::detect::run(&config, &source, format)
        }
        Commands::Arch {
            name,
            little_endian,
            format,
        } => commands::classify::arch(&name, little_endian, format),
        Commands::Os {
            name,
            runtime,
            format,
        } => commands::classify::os(&name, runtime.as_deref(), format),
        Commands::Describe {
            os,
            arch,
            little_endian,
            format,
        } => commands::describe::run(&os, &arch, little_endian, format),
        Commands::DataDir { folder, os } => {
            let (config, _) = settings::resolve(cli.config.as_deref(), &cwd)?;
            hostkind_platform::host::init(&config);
            commands::data_dir::run(&folder, os.as_deref())
        }
        Commands::List => commands::classify::list(),
        Commands::Config { action } => match action {
            ConfigAction::Init => commands::config::init(&cwd),
            ConfigAction::Validate { path } => {
                let path = match path {
                    Some(p) => p,
                    None => {
                        let source = settings::locate(
                            cli.config.as_deref(),
                            std::env::var_os(settings::CONFIG_ENV_VAR).map(PathBuf::from),
                            &cwd,
                        );
                        match source.path() {
                            Some(p) => p.to_path_buf(),
                            None => anyhow::bail!(
                                "no config file found; pass a path or run 'hostkind config init'"
                            ),
                        }
                    }
                };
                commands::config::validate(&path)
            }
            ConfigAction::Show => {
                let (config, _) = settings::resolve(cli.config.as_deref(), &cwd)?;
                commands::config::show(&config)
            }
        },
    }
}
