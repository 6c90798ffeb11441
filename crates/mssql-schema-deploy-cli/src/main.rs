//! mssql-schema-deploy CLI - replace-mode schema deployment for SQL Server.

use clap::{Parser, Subcommand};
use mssql_schema_deploy::{DeployConfig, DeployError, Deployer};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser)]
#[command(name = "mssql-schema-deploy")]
#[command(about = "Deploy versioned SQL scripts into an isolated per-project schema")]
#[command(version)]
struct Cli {
    /// Path to a YAML configuration file; environment variables
    /// (DB_SERVER, DB_NAME, DB_USER, DB_PASSWORD, PROJECT_ID, ...) are used
    /// when absent
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the migrations directory
    #[arg(long)]
    migrations_dir: Option<PathBuf>,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Wipe and rebuild the isolated schema from the migrations directory
    Run {
        /// Override the project identifier (schema becomes project_<id>)
        #[arg(long)]
        project_id: Option<String>,
    },

    /// Test the database connection
    HealthCheck,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), DeployError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format)
        .map_err(DeployError::Config)?;

    // Deployment convention: SKIP_MIGRATIONS=true disables the runner
    // entirely, e.g. for environments where the schema is managed manually.
    if std::env::var("SKIP_MIGRATIONS").as_deref() == Ok("true") {
        info!("Migrations skipped (SKIP_MIGRATIONS=true)");
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => {
            let config = DeployConfig::load(path)?;
            info!("Loaded configuration from {:?}", path);
            config
        }
        None => DeployConfig::from_env()?,
    };

    if let Some(dir) = &cli.migrations_dir {
        config.migrations_dir = dir.display().to_string();
    }

    match cli.command {
        Commands::Run { project_id } => {
            if let Some(id) = project_id {
                config.project_id = id;
                config.validate()?;
            }

            let result = Deployer::new(config).run().await?;

            if cli.output_json {
                println!("{}", result.to_json()?);
            } else {
                println!("\nDeploy completed!");
                println!("  Schema: [{}]", result.schema);
                println!("  Files applied: {}/{}", result.files_applied, result.files_total);
                println!("  Batches executed: {}", result.batches_executed);
                println!("  Duration: {:.2}s", result.duration_seconds);
            }
        }

        Commands::HealthCheck => {
            Deployer::new(config).health_check().await?;
            println!("Connection OK");
        }
    }

    Ok(())
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    Ok(())
}
