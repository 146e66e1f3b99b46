use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use customers::infra::storage::{
    migrations::Migrator, InMemoryCustomersRepository, SeaOrmCustomersRepository,
};
use customers::{CustomersConfig, CustomersRepository, SeedRunner, StorageBackend};
use runtime::{AppConfig, CliArgs, DatabaseConfig};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const MODULE_NAME: &str = "customers";

/// Rewrite a relative SQLite file DSN to live under `base_dir`, keeping its
/// query string. In-memory DSNs come back in the `sqlite::memory:` form.
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if dsn.eq_ignore_ascii_case("sqlite::memory:") || dsn.eq_ignore_ascii_case("sqlite://:memory:")
    {
        return Ok("sqlite::memory:".to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    if let Some(dir) = p.parent() {
        if create_dirs {
            std::fs::create_dir_all(dir)?;
        }
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}

/// Customers demo - seeds a customer store and prints every query result
#[derive(Parser)]
#[command(name = "customers-demo")]
#[command(about = "Customers demo - seeds a customer store and prints every query result")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the store and run every query once
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        verbose: cli.verbose,
        mock: cli.mock,
    };

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.app.home_dir));
    tracing::info!("Customers demo starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_demo(config, args).await,
        Commands::Check => check_config(config).await,
    }
}

/// Only SQLite is compiled into SeaORM here.
fn ensure_sqlite_dsn(cfg: &DatabaseConfig) -> Result<()> {
    let raw = cfg.url.trim();
    if raw.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }

    let url = Url::parse(raw).map_err(|e| anyhow!("Invalid database DSN '{}': {}", raw, e))?;
    match url.scheme() {
        "sqlite" | "sqlite3" => Ok(()),
        other => Err(anyhow!("Unsupported database type: {}", other)),
    }
}

async fn connect(db_config: &DatabaseConfig, base_dir: &Path, mock: bool) -> Result<DatabaseConnection> {
    ensure_sqlite_dsn(db_config)?;

    let dsn = if mock {
        "sqlite::memory:".to_string()
    } else {
        absolutize_sqlite_dsn(db_config.url.trim(), base_dir, true)?
    };

    let mut opts = ConnectOptions::new(dsn.clone());
    opts.max_connections(db_config.max_conns.unwrap_or(10))
        .acquire_timeout(Duration::from_secs(db_config.acquire_timeout_sec.unwrap_or(5)))
        .sqlx_logging(true);

    tracing::info!("Connecting to database: {}", dsn);
    let conn = Database::connect(opts)
        .await
        .with_context(|| format!("Failed to connect to {dsn}"))?;

    Migrator::up(&conn, None)
        .await
        .context("Customers migrations failed")?;
    tracing::info!("Customers database migrations completed");

    Ok(conn)
}

async fn build_repository(
    config: &AppConfig,
    module_cfg: &CustomersConfig,
    args: &CliArgs,
) -> Result<Arc<dyn CustomersRepository>> {
    match module_cfg.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory customer store");
            Ok(Arc::new(InMemoryCustomersRepository::new()))
        }
        StorageBackend::SeaOrm => {
            let db_config = config
                .database
                .as_ref()
                .ok_or_else(|| anyhow!("The sea_orm backend needs a database section"))?;
            let conn = connect(db_config, Path::new(&config.app.home_dir), args.mock).await?;
            Ok(Arc::new(SeaOrmCustomersRepository::new(conn)))
        }
    }
}

async fn run_demo(config: AppConfig, args: CliArgs) -> Result<()> {
    let module_cfg: CustomersConfig = config.module_config(MODULE_NAME)?;
    tracing::debug!(?module_cfg, "Loaded customers config");

    let repo = build_repository(&config, &module_cfg, &args).await?;

    if !module_cfg.seed_on_startup {
        tracing::info!("Seeding disabled, nothing to do");
        return Ok(());
    }

    let report = SeedRunner::new(repo).run().await?;
    tracing::info!(
        saved = report.saved.len(),
        queries = report.queries.len(),
        "Seed sequence finished"
    );
    Ok(())
}

async fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    let module_cfg: CustomersConfig = config.module_config(MODULE_NAME)?;
    if module_cfg.backend == StorageBackend::SeaOrm {
        let db_config = config
            .database
            .as_ref()
            .ok_or_else(|| anyhow!("The sea_orm backend needs a database section"))?;
        ensure_sqlite_dsn(db_config)?;
    }

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);

    Ok(())
}
