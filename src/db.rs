use std::str::FromStr;

use anyhow::Result;
use sqlx::{
    SqlitePool,
    migrate::MigrateDatabase,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use sqlx_migrator::{Migrate, Plan};

use crate::config::DatabaseConfig;

pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    let mut conn = pool.acquire().await?;
    habitloop_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(())
}

/// Drops the database if present and recreates it with all migrations.
pub async fn reset(config: &DatabaseConfig) -> Result<SqlitePool> {
    if sqlx::Sqlite::database_exists(&config.url).await? {
        sqlx::Sqlite::drop_database(&config.url).await?;
    }
    sqlx::Sqlite::create_database(&config.url).await?;

    let pool = connect(config).await?;
    migrate(&pool).await?;

    Ok(pool)
}
