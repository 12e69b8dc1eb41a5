use sqlx::SqlitePool;
use time::OffsetDateTime;
use ulid::Ulid;
use validator::Validate;

use habitloop_shared::badge::ConditionType;

use crate::repository::{self, BadgeRow};

#[derive(Clone)]
pub struct Command(pub SqlitePool);

#[derive(Validate)]
pub struct CreateBadgeInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(length(max = 255))]
    pub icon: Option<String>,
    pub condition_type: ConditionType,
    #[validate(range(exclusive_min = 0.0))]
    pub condition_value: f64,
}

impl Command {
    #[tracing::instrument(skip_all, fields(name = %input.name))]
    pub async fn create(&self, input: CreateBadgeInput) -> habitloop_shared::Result<String> {
        input.validate()?;

        if !input.condition_type.is_known() {
            habitloop_shared::bail!("Unknown condition type")
        }

        if repository::find_badge_by_name(&self.0, &input.name)
            .await?
            .is_some()
        {
            habitloop_shared::bail!("Badge name already exists")
        }

        let row = BadgeRow {
            id: Ulid::new().to_string(),
            name: input.name,
            description: input.description,
            icon: input.icon,
            condition_type: sqlx::types::Text(input.condition_type),
            condition_value: input.condition_value,
            active: true,
            created_at: OffsetDateTime::now_utc().unix_timestamp(),
        };
        repository::insert_badge(&self.0, &row).await?;

        Ok(row.id)
    }

    pub async fn deactivate(&self, id: &str) -> habitloop_shared::Result<()> {
        let updated = repository::set_badge_active(&self.0, id, false).await?;
        if updated == 0 {
            habitloop_shared::bail!("Badge not found")
        }

        Ok(())
    }

    /// Inserts the stock catalog, skipping names that already exist, and
    /// returns how many badges were created.
    pub async fn seed_defaults(&self) -> habitloop_shared::Result<u32> {
        let mut created = 0;
        for (name, description, condition_type, condition_value) in default_catalog() {
            if repository::find_badge_by_name(&self.0, name).await?.is_some() {
                continue;
            }

            let row = BadgeRow {
                id: Ulid::new().to_string(),
                name: name.to_owned(),
                description: Some(description.to_owned()),
                icon: None,
                condition_type: sqlx::types::Text(condition_type),
                condition_value,
                active: true,
                created_at: OffsetDateTime::now_utc().unix_timestamp(),
            };
            repository::insert_badge(&self.0, &row).await?;
            created += 1;
        }

        tracing::info!(created, "seeded default badge catalog");

        Ok(created)
    }
}

fn default_catalog() -> Vec<(&'static str, &'static str, ConditionType, f64)> {
    vec![
        (
            "First Step",
            "Track your first habit",
            ConditionType::TotalHabits,
            1.0,
        ),
        (
            "Habit Collector",
            "Track five habits at once",
            ConditionType::TotalHabits,
            5.0,
        ),
        (
            "Getting Started",
            "Log your first completion",
            ConditionType::TotalRecords,
            1.0,
        ),
        (
            "Centurion",
            "Log one hundred completions",
            ConditionType::TotalRecords,
            100.0,
        ),
        (
            "3-Day Streak",
            "Complete a habit three days in a row",
            ConditionType::ConsecutiveDays,
            3.0,
        ),
        (
            "7-Day Streak",
            "Complete a habit seven days in a row",
            ConditionType::ConsecutiveDays,
            7.0,
        ),
        (
            "30-Day Streak",
            "Complete a habit thirty days in a row",
            ConditionType::ConsecutiveDays,
            30.0,
        ),
        (
            "Halfway There",
            "Reach a 50% completion rate",
            ConditionType::CompletionRate,
            50.0,
        ),
        (
            "Perfectionist",
            "Reach a 100% completion rate",
            ConditionType::CompletionRate,
            100.0,
        ),
    ]
}
