use std::{path::PathBuf, str::FromStr};

use habitloop_shared::badge::ConditionType;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub async fn setup_pool(path: PathBuf) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await?;
    let mut conn = pool.acquire().await?;
    habitloop_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(pool)
}

#[allow(dead_code)]
pub async fn create_habit(
    pool: &SqlitePool,
    user_id: &str,
    title: &str,
) -> anyhow::Result<String> {
    let command = habitloop_habit::Command(pool.clone());
    let id = command
        .create(habitloop_habit::CreateHabitInput {
            user_id: user_id.to_owned(),
            title: title.to_owned(),
            description: None,
        })
        .await?;

    Ok(id)
}

#[allow(dead_code)]
pub async fn mark_day(
    pool: &SqlitePool,
    user_id: &str,
    habit_id: &str,
    date: time::Date,
) -> anyhow::Result<()> {
    let command = habitloop_habit::Command(pool.clone());
    command
        .mark_day(habitloop_habit::MarkDayInput {
            user_id: user_id.to_owned(),
            habit_id: habit_id.to_owned(),
            date,
            completed: true,
            note: None,
        })
        .await?;

    Ok(())
}

#[allow(dead_code)]
pub async fn create_badge(
    pool: &SqlitePool,
    name: &str,
    condition_type: ConditionType,
    condition_value: f64,
) -> anyhow::Result<String> {
    let command = habitloop_badge::Command(pool.clone());
    let id = command
        .create(habitloop_badge::CreateBadgeInput {
            name: name.to_owned(),
            description: None,
            icon: None,
            condition_type,
            condition_value,
        })
        .await?;

    Ok(id)
}
