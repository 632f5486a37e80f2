use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use hostup::{AppError, ConfigFormat, ConfigOverrides, DoctorOptions, ProvisionOptions, RenderOptions};

#[derive(Parser)]
#[command(name = "hostup")]
#[command(version)]
#[command(
    about = "Provision a self-hosted n8n + Traefik stack on a single Ubuntu host",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ./hostup.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the public hostname
    #[arg(long, global = true)]
    domain: Option<String>,

    /// Override the ACME notification email
    #[arg(long, global = true)]
    email: Option<String>,

    /// Override the service account name
    #[arg(long, global = true)]
    user: Option<String>,

    /// Override the data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Override the container timezone
    #[arg(long, global = true)]
    timezone: Option<String>,

    /// Override the application image
    #[arg(long, global = true)]
    image: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Converge the host to the configured desired state
    #[clap(visible_alias = "up")]
    Provision {
        /// Report pending changes without applying them
        #[arg(long)]
        dry_run: bool,
        /// Regenerate the encryption key even if a valid one exists
        #[arg(long)]
        rotate_key: bool,
        /// Skip interactive confirmations
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Check every step without applying changes
    Plan,
    /// Render and validate the compose file and systemd unit
    Render {
        /// Write artifacts into this directory instead of the configured paths
        #[arg(long)]
        output: Option<PathBuf>,
        /// Print artifacts instead of writing them
        #[arg(long)]
        stdout: bool,
    },
    /// Diagnose host prerequisites
    #[clap(visible_alias = "dr")]
    Doctor {
        /// Treat warnings as a failure
        #[arg(long)]
        strict: bool,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration after defaults, file, and flags
    Show {
        #[arg(long, value_enum, default_value_t = FormatArg::Toml)]
        format: FormatArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Toml,
    Json,
}

impl From<FormatArg> for ConfigFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Toml => ConfigFormat::Toml,
            FormatArg::Json => ConfigFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let overrides = ConfigOverrides {
        domain: cli.domain,
        acme_email: cli.email,
        service_user: cli.user,
        data_dir: cli.data_dir,
        timezone: cli.timezone,
        n8n_image: cli.image,
    };
    let config_path = cli.config.as_deref();

    let result: Result<(), AppError> = match cli.command {
        Commands::Provision { dry_run, rotate_key, yes } => {
            let options = ProvisionOptions { dry_run, rotate_key, assume_yes: yes };
            hostup::provision(config_path, overrides, options).map(|_| ())
        }
        Commands::Plan => hostup::plan(config_path, overrides).map(|_| ()),
        Commands::Render { output, stdout } => {
            hostup::render(config_path, overrides, RenderOptions { output, stdout })
        }
        Commands::Doctor { strict } => {
            match hostup::doctor(config_path, overrides, DoctorOptions { strict }) {
                Ok(outcome) => std::process::exit(outcome.exit_code),
                Err(e) => Err(e),
            }
        }
        Commands::Config { command: ConfigCommands::Show { format } } => {
            hostup::config_show(config_path, overrides, format.into()).map(|rendered| {
                println!("{rendered}");
            })
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
