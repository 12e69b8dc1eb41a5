use habitloop_db::table::{Habit, HabitRecord};
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};
use time::OffsetDateTime;

#[derive(FromRow)]
pub struct HabitRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: i64,
}

pub(crate) async fn find_habit(
    pool: &SqlitePool,
    id: &str,
) -> habitloop_shared::Result<Option<HabitRow>> {
    let statement = Query::select()
        .columns([
            Habit::Id,
            Habit::UserId,
            Habit::Title,
            Habit::Description,
            Habit::CreatedAt,
        ])
        .from(Habit::Table)
        .and_where(Expr::col(Habit::Id).eq(id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, HabitRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub(super) async fn create_habit(
    pool: &SqlitePool,
    id: String,
    user_id: String,
    title: String,
    description: Option<String>,
) -> habitloop_shared::Result<()> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let statement = Query::insert()
        .into_table(Habit::Table)
        .columns([
            Habit::Id,
            Habit::UserId,
            Habit::Title,
            Habit::Description,
            Habit::CreatedAt,
        ])
        .values_panic([
            id.into(),
            user_id.into(),
            title.into(),
            description.into(),
            now.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

pub(crate) async fn count_habits(
    pool: &SqlitePool,
    user_id: &str,
) -> habitloop_shared::Result<i64> {
    let statement = Query::select()
        .expr(Expr::col(Habit::Id).count())
        .from(Habit::Table)
        .and_where(Expr::col(Habit::UserId).eq(user_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_scalar_with::<_, i64, _>(&sql, values)
        .fetch_one(pool)
        .await?)
}

pub(crate) struct RecordInsert {
    pub id: String,
    pub user_id: String,
    pub habit_id: String,
    pub recorded_at: String,
    pub completed: bool,
    pub note: Option<String>,
}

// Returns the raw sqlx error so callers can tell a unique violation on
// (user, habit, date) apart from everything else.
pub(super) async fn insert_record(pool: &SqlitePool, input: RecordInsert) -> sqlx::Result<()> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let statement = Query::insert()
        .into_table(HabitRecord::Table)
        .columns([
            HabitRecord::Id,
            HabitRecord::UserId,
            HabitRecord::HabitId,
            HabitRecord::RecordedAt,
            HabitRecord::Completed,
            HabitRecord::Note,
            HabitRecord::CreatedAt,
        ])
        .values_panic([
            input.id.into(),
            input.user_id.into(),
            input.habit_id.into(),
            input.recorded_at.into(),
            input.completed.into(),
            input.note.into(),
            now.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

pub(super) async fn delete_record(
    pool: &SqlitePool,
    user_id: &str,
    habit_id: &str,
    recorded_at: &str,
) -> habitloop_shared::Result<u64> {
    let statement = Query::delete()
        .from_table(HabitRecord::Table)
        .and_where(Expr::col(HabitRecord::UserId).eq(user_id))
        .and_where(Expr::col(HabitRecord::HabitId).eq(habit_id))
        .and_where(Expr::col(HabitRecord::RecordedAt).eq(recorded_at))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    let result = sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(result.rows_affected())
}

pub(super) async fn set_record_completed(
    pool: &SqlitePool,
    user_id: &str,
    habit_id: &str,
    recorded_at: &str,
    completed: bool,
) -> habitloop_shared::Result<u64> {
    let statement = Query::update()
        .table(HabitRecord::Table)
        .value(HabitRecord::Completed, completed)
        .and_where(Expr::col(HabitRecord::UserId).eq(user_id))
        .and_where(Expr::col(HabitRecord::HabitId).eq(habit_id))
        .and_where(Expr::col(HabitRecord::RecordedAt).eq(recorded_at))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    let result = sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(result.rows_affected())
}

pub(crate) async fn count_records(
    pool: &SqlitePool,
    user_id: &str,
) -> habitloop_shared::Result<i64> {
    let statement = Query::select()
        .expr(Expr::col(HabitRecord::Id).count())
        .from(HabitRecord::Table)
        .and_where(Expr::col(HabitRecord::UserId).eq(user_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_scalar_with::<_, i64, _>(&sql, values)
        .fetch_one(pool)
        .await?)
}

pub(crate) async fn count_completed_between(
    pool: &SqlitePool,
    user_id: &str,
    from: &str,
    to: &str,
) -> habitloop_shared::Result<i64> {
    let statement = Query::select()
        .expr(Expr::col(HabitRecord::Id).count())
        .from(HabitRecord::Table)
        .and_where(Expr::col(HabitRecord::UserId).eq(user_id))
        .and_where(Expr::col(HabitRecord::Completed).eq(true))
        .and_where(Expr::col(HabitRecord::RecordedAt).gte(from))
        .and_where(Expr::col(HabitRecord::RecordedAt).lte(to))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_scalar_with::<_, i64, _>(&sql, values)
        .fetch_one(pool)
        .await?)
}

// Distinct (habit, date) pairs with a completed record, ordered so the
// streak fold sees each habit's dates as one ascending run.
pub(crate) async fn completed_dates(
    pool: &SqlitePool,
    user_id: &str,
) -> habitloop_shared::Result<Vec<(String, String)>> {
    let statement = Query::select()
        .column(HabitRecord::HabitId)
        .column(HabitRecord::RecordedAt)
        .distinct()
        .from(HabitRecord::Table)
        .and_where(Expr::col(HabitRecord::UserId).eq(user_id))
        .and_where(Expr::col(HabitRecord::Completed).eq(true))
        .order_by(HabitRecord::HabitId, Order::Asc)
        .order_by(HabitRecord::RecordedAt, Order::Asc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, (String, String), _>(&sql, values)
        .fetch_all(pool)
        .await?)
}
