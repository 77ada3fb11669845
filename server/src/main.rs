mod config;
mod graphql;
mod http;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use platform_db::{DatabaseSettings, DbPool, connect};
use platform_obs::{ObsConfig, init_tracing, shutdown_tracing};
use products_hr::{Hr, SeedFixtures, seed};
use tracing::{info, warn};

use crate::{
    config::AppConfig,
    http::{AppState, ServeConfig},
};

#[derive(Parser, Debug)]
#[command(name = "hr-server", version, about = "HR records service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP + GraphQL server.
    Serve(ServeCommand),
    /// Run database migrations.
    #[command(subcommand)]
    Migrate(MigrateCommand),
    /// Seed an empty database with fixture data.
    Seed {
        #[arg(long, value_name = "FILE", help = "JSON fixtures (defaults to the admin fixture)")]
        file: Option<PathBuf>,
    },
    /// Print the GraphQL schema snapshot.
    #[command(name = "schema:print")]
    SchemaPrint {
        #[arg(long, value_name = "FILE", help = "Destination file path")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum MigrateCommand {
    /// Apply pending migrations.
    Up,
    /// Rollback the most recent migration.
    Down,
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, env = "PORT", default_value_t = 8081)]
    port: u16,
    #[arg(long, help = "Allow starting even when migrations are pending")]
    allow_dirty: bool,
    #[arg(long, help = "Skip first-start seeding")]
    no_seed: bool,
}

impl From<&ServeCommand> for ServeConfig {
    fn from(value: &ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(ObsConfig::from_env("hr-server"))?;
    let cli = Cli::parse();
    let app_config = Arc::new(AppConfig::load()?);
    let outcome = match cli.command {
        Command::Serve(cmd) => run_server(cmd, app_config).await,
        Command::Migrate(action) => match action {
            MigrateCommand::Up => migrate_up().await,
            MigrateCommand::Down => migrate_down().await,
        },
        Command::Seed { file } => run_seed(file.as_deref()).await,
        Command::SchemaPrint { output } => schema_print(output),
    };
    if let Err(err) = shutdown_tracing() {
        warn!(error = %err, "tracing shutdown failed");
    }
    outcome
}

fn load_fixtures(path: Option<&Path>) -> Result<SeedFixtures> {
    let Some(path) = path else {
        return Ok(SeedFixtures::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read fixtures {}", path.display()))?;
    SeedFixtures::from_json(&raw)
        .with_context(|| format!("invalid fixtures in {}", path.display()))
}

async fn run_seed(file: Option<&Path>) -> Result<()> {
    let fixtures = load_fixtures(file)?;
    let pool = setup_pool().await?;
    ensure_migrations(&pool, false).await?;
    let report = seed(&Hr::with_connection(pool), fixtures).await?;
    info!(
        departments = report.departments_created,
        employees = report.employees_created,
        "seed finished"
    );
    Ok(())
}

fn schema_print(path: Option<PathBuf>) -> Result<()> {
    let target = path.unwrap_or_else(|| PathBuf::from("schema.graphql"));
    let sdl = graphql::schema_builder().finish().sdl();
    std::fs::write(&target, sdl)
        .with_context(|| format!("failed to write {}", target.display()))?;
    info!(path = %target.display(), "schema snapshot written");
    Ok(())
}

async fn setup_pool() -> Result<DbPool> {
    let settings = DatabaseSettings::from_env();
    connect(&settings).await.map_err(Into::into)
}

async fn run_server(cmd: ServeCommand, config: Arc<AppConfig>) -> Result<()> {
    let pool = setup_pool().await?;
    ensure_migrations(&pool, cmd.allow_dirty).await?;
    let hr = Hr::with_connection(pool.clone());
    if config.seed_on_start && !cmd.no_seed {
        let fixtures = load_fixtures(config.seed_fixtures.as_deref())?;
        let report = seed(&hr, fixtures).await?;
        if !report.is_noop() {
            info!(
                departments = report.departments_created,
                employees = report.employees_created,
                "first-start seed applied"
            );
        }
    }
    let schema = graphql::build_schema(hr);
    let state = AppState {
        pool,
        schema,
        config: config.clone(),
    };
    http::serve(ServeConfig::from(&cmd), state).await
}

async fn ensure_migrations(pool: &DbPool, allow_dirty: bool) -> Result<()> {
    let pending = Migrator::get_pending_migrations(pool).await?;
    if !pending.is_empty() && !allow_dirty {
        anyhow::bail!(
            "pending migrations detected; run `hr-server migrate up` or pass --allow-dirty"
        );
    }
    Ok(())
}

async fn migrate_up() -> Result<()> {
    let pool = setup_pool().await?;
    Migrator::up(&pool, None).await?;
    info!("database migrations applied");
    Ok(())
}

async fn migrate_down() -> Result<()> {
    let pool = setup_pool().await?;
    Migrator::down(&pool, Some(1)).await?;
    info!("most recent migration rolled back");
    Ok(())
}
