use anyhow::Result;
use clap::{Parser, Subcommand};

use habitloop_badge::BadgeCheck;

/// habitloop - habit tracking with achievement badges
#[derive(Parser)]
#[command(name = "habitloop")]
#[command(about = "Habit tracking with achievement badges", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Insert the default badge catalog
    SeedBadges,
    /// Run a badge check for one user and print the outcome
    Check {
        /// User id to evaluate
        #[arg(long)]
        user: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = habitloop::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    habitloop::observability::init_tracing(&config.observability.log_level)?;

    match cli.command {
        Commands::Migrate => migrate_command(config).await,
        Commands::Reset => reset_command(config).await,
        Commands::SeedBadges => seed_badges_command(config).await,
        Commands::Check { user } => check_command(config, user).await,
    }
}

async fn migrate_command(config: habitloop::config::Config) -> Result<()> {
    let pool = habitloop::db::connect(&config.database).await?;
    habitloop::db::migrate(&pool).await?;
    tracing::info!("migrations applied");

    Ok(())
}

async fn reset_command(config: habitloop::config::Config) -> Result<()> {
    habitloop::db::reset(&config.database).await?;
    tracing::info!("database reset");

    Ok(())
}

async fn seed_badges_command(config: habitloop::config::Config) -> Result<()> {
    let pool = habitloop::db::connect(&config.database).await?;
    let created = habitloop_badge::Command(pool).seed_defaults().await?;
    tracing::info!(created, "badge catalog seeded");

    Ok(())
}

async fn check_command(config: habitloop::config::Config, user: String) -> Result<()> {
    let pool = habitloop::db::connect(&config.database).await?;
    let outcome = BadgeCheck::new(pool).evaluate_and_award(&user).await;

    for badge in &outcome.newly_earned {
        println!("earned: {} ({})", badge.name, badge.id);
    }
    for error in &outcome.errors {
        println!("error: {error}");
    }
    if let Some(message) = outcome.pending_notification().and_then(|n| n.message()) {
        println!("{message}");
    }
    println!(
        "stats: habits={} records={} completed={} streak={} rate={:.1}%",
        outcome.stats.total_habits,
        outcome.stats.total_records,
        outcome.stats.completed_records,
        outcome.stats.consecutive_days,
        outcome.stats.completion_rate,
    );

    Ok(())
}
