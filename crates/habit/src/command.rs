use sqlx::SqlitePool;
use time::Date;
use ulid::Ulid;
use validator::Validate;

use habitloop_shared::format_date;

use crate::repository;

#[derive(Clone)]
pub struct Command(pub SqlitePool);

#[derive(Validate)]
pub struct CreateHabitInput {
    pub user_id: String,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

pub struct MarkDayInput {
    pub user_id: String,
    pub habit_id: String,
    pub date: Date,
    pub completed: bool,
    pub note: Option<String>,
}

impl Command {
    #[tracing::instrument(skip_all, fields(user_id = %input.user_id))]
    pub async fn create(&self, input: CreateHabitInput) -> habitloop_shared::Result<String> {
        input.validate()?;

        let id = Ulid::new().to_string();
        repository::create_habit(
            &self.0,
            id.to_owned(),
            input.user_id,
            input.title,
            input.description,
        )
        .await?;

        Ok(id)
    }

    /// Records one day for one habit. A duplicate (user, habit, date) is a
    /// user-facing error, the same toggle semantics as the record screen.
    #[tracing::instrument(skip_all, fields(user_id = %input.user_id, habit_id = %input.habit_id))]
    pub async fn mark_day(&self, input: MarkDayInput) -> habitloop_shared::Result<String> {
        self.owned_habit(&input.user_id, &input.habit_id).await?;

        let id = Ulid::new().to_string();
        let result = repository::insert_record(
            &self.0,
            repository::RecordInsert {
                id: id.to_owned(),
                user_id: input.user_id,
                habit_id: input.habit_id,
                recorded_at: format_date(input.date),
                completed: input.completed,
                note: input.note,
            },
        )
        .await;

        match result {
            Ok(()) => Ok(id),
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                habitloop_shared::bail!("Day already recorded for this habit")
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Removes the record for one day (the un-mark half of the toggle).
    pub async fn unmark_day(
        &self,
        user_id: &str,
        habit_id: &str,
        date: Date,
    ) -> habitloop_shared::Result<()> {
        self.owned_habit(user_id, habit_id).await?;

        let deleted =
            repository::delete_record(&self.0, user_id, habit_id, &format_date(date)).await?;
        if deleted == 0 {
            habitloop_shared::bail!("No record for this day")
        }

        Ok(())
    }

    pub async fn set_completed(
        &self,
        user_id: &str,
        habit_id: &str,
        date: Date,
        completed: bool,
    ) -> habitloop_shared::Result<()> {
        self.owned_habit(user_id, habit_id).await?;

        let updated = repository::set_record_completed(
            &self.0,
            user_id,
            habit_id,
            &format_date(date),
            completed,
        )
        .await?;
        if updated == 0 {
            habitloop_shared::bail!("No record for this day")
        }

        Ok(())
    }

    async fn owned_habit(&self, user_id: &str, habit_id: &str) -> habitloop_shared::Result<()> {
        match repository::find_habit(&self.0, habit_id).await? {
            Some(habit) if habit.user_id == user_id => Ok(()),
            _ => habitloop_shared::bail!("Habit not found"),
        }
    }
}
