use habitloop_db::table::{Badge, UserBadge};
use habitloop_shared::badge::ConditionType;
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};

#[derive(Debug, FromRow)]
pub struct BadgeRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub condition_type: sqlx::types::Text<ConditionType>,
    pub condition_value: f64,
    pub active: bool,
    pub created_at: i64,
}

pub(crate) const BADGE_COLUMNS: [Badge; 8] = [
    Badge::Id,
    Badge::Name,
    Badge::Description,
    Badge::Icon,
    Badge::ConditionType,
    Badge::ConditionValue,
    Badge::Active,
    Badge::CreatedAt,
];

pub(crate) async fn find_badge(
    pool: &SqlitePool,
    id: &str,
) -> habitloop_shared::Result<Option<BadgeRow>> {
    let statement = Query::select()
        .columns(BADGE_COLUMNS)
        .from(Badge::Table)
        .and_where(Expr::col(Badge::Id).eq(id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, BadgeRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub(crate) async fn find_badge_by_name(
    pool: &SqlitePool,
    name: &str,
) -> habitloop_shared::Result<Option<BadgeRow>> {
    let statement = Query::select()
        .columns(BADGE_COLUMNS)
        .from(Badge::Table)
        .and_where(Expr::col(Badge::Name).eq(name))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, BadgeRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub(super) async fn insert_badge(
    pool: &SqlitePool,
    row: &BadgeRow,
) -> habitloop_shared::Result<()> {
    let statement = Query::insert()
        .into_table(Badge::Table)
        .columns(BADGE_COLUMNS)
        .values_panic([
            row.id.as_str().into(),
            row.name.as_str().into(),
            row.description.as_deref().into(),
            row.icon.as_deref().into(),
            row.condition_type.0.to_string().into(),
            row.condition_value.into(),
            row.active.into(),
            row.created_at.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

pub(super) async fn set_badge_active(
    pool: &SqlitePool,
    id: &str,
    active: bool,
) -> habitloop_shared::Result<u64> {
    let statement = Query::update()
        .table(Badge::Table)
        .value(Badge::Active, active)
        .and_where(Expr::col(Badge::Id).eq(id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    let result = sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(result.rows_affected())
}

/// Active badges the user has not yet earned, capped so an ever-growing
/// catalog cannot stretch a single check unboundedly.
pub(crate) async fn list_candidates(
    pool: &SqlitePool,
    earned_badge_ids: &[String],
    limit: u64,
) -> habitloop_shared::Result<Vec<BadgeRow>> {
    let mut statement = Query::select()
        .columns(BADGE_COLUMNS)
        .from(Badge::Table)
        .and_where(Expr::col(Badge::Active).eq(true))
        .order_by(Badge::Id, Order::Asc)
        .limit(limit)
        .to_owned();

    if !earned_badge_ids.is_empty() {
        statement.and_where(Expr::col(Badge::Id).is_not_in(earned_badge_ids.iter().cloned()));
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, BadgeRow, _>(&sql, values)
        .fetch_all(pool)
        .await?)
}

pub(crate) async fn earned_badge_ids(
    pool: &SqlitePool,
    user_id: &str,
) -> habitloop_shared::Result<Vec<String>> {
    let statement = Query::select()
        .column(UserBadge::BadgeId)
        .from(UserBadge::Table)
        .and_where(Expr::col(UserBadge::UserId).eq(user_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_scalar_with::<_, String, _>(&sql, values)
        .fetch_all(pool)
        .await?)
}
