use habitloop_db::table::{Habit, HabitRecord};
use sea_query::{Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};
use time::Date;

use habitloop_shared::{format_date, parse_date};

pub use crate::repository::HabitRow;

#[derive(Debug, FromRow)]
pub struct RecordRow {
    pub id: String,
    pub user_id: String,
    pub habit_id: String,
    pub recorded_at: String,
    pub completed: bool,
    pub note: Option<String>,
    pub created_at: i64,
}

impl RecordRow {
    pub fn recorded_on(&self) -> habitloop_shared::Result<Date> {
        parse_date(&self.recorded_at)
    }
}

/// Filter for the completion record store's read surface: all of a user's
/// records, optionally narrowed to one habit and/or a date range.
#[derive(Default)]
pub struct RecordFilter {
    pub habit_id: Option<String>,
    pub from: Option<Date>,
    pub to: Option<Date>,
}

#[derive(Clone)]
pub struct Query(pub SqlitePool);

impl Query {
    pub async fn list_habits(&self, user_id: &str) -> habitloop_shared::Result<Vec<HabitRow>> {
        let statement = sea_query::Query::select()
            .columns([
                Habit::Id,
                Habit::UserId,
                Habit::Title,
                Habit::Description,
                Habit::CreatedAt,
            ])
            .from(Habit::Table)
            .and_where(Expr::col(Habit::UserId).eq(user_id))
            .order_by(Habit::CreatedAt, Order::Desc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, HabitRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    pub async fn list_records(
        &self,
        user_id: &str,
        filter: RecordFilter,
    ) -> habitloop_shared::Result<Vec<RecordRow>> {
        let mut statement = sea_query::Query::select()
            .columns([
                HabitRecord::Id,
                HabitRecord::UserId,
                HabitRecord::HabitId,
                HabitRecord::RecordedAt,
                HabitRecord::Completed,
                HabitRecord::Note,
                HabitRecord::CreatedAt,
            ])
            .from(HabitRecord::Table)
            .and_where(Expr::col(HabitRecord::UserId).eq(user_id))
            .order_by(HabitRecord::RecordedAt, Order::Desc)
            .to_owned();

        if let Some(habit_id) = filter.habit_id {
            statement.and_where(Expr::col(HabitRecord::HabitId).eq(habit_id));
        }

        if let Some(from) = filter.from {
            statement.and_where(Expr::col(HabitRecord::RecordedAt).gte(format_date(from)));
        }

        if let Some(to) = filter.to {
            statement.and_where(Expr::col(HabitRecord::RecordedAt).lte(format_date(to)));
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, RecordRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }
}
