use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "flowpack",
    about = "Flowpack — capacity-aware job selection for workflow engines",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one selection tick over a JSON manifest.
    ///
    /// The manifest carries what a workflow engine would hand the selector
    /// on a scheduling tick: selectable jobs, remaining jobs, available
    /// resources, input-file sizes, and the rate-limiter window.
    Select {
        /// Path to the tick manifest (JSON).
        #[arg(short, long)]
        manifest: String,
        /// Selector configuration file (TOML). Defaults apply when omitted.
        #[arg(short, long)]
        config: Option<String>,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Validate a selector configuration file.
    CheckConfig {
        /// Path to the configuration file (TOML).
        #[arg(short, long)]
        config: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("flowpack=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Select {
            manifest,
            config,
            format,
        } => commands::select::run(&manifest, config.as_deref(), &format),
        Commands::CheckConfig { config } => commands::check::run(&config),
    }
}
