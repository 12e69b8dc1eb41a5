use habitloop_db::table::{Badge, UserBadge};
use sea_query::{Alias, Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};

use crate::repository::{self, BADGE_COLUMNS, BadgeRow};

/// A badge joined with the owning user's award row.
#[derive(Debug, FromRow)]
pub struct EarnedBadgeRow {
    pub badge_id: String,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub earned_at: i64,
}

#[derive(Clone)]
pub struct Query(pub SqlitePool);

impl Query {
    pub async fn find(&self, id: &str) -> habitloop_shared::Result<Option<BadgeRow>> {
        repository::find_badge(&self.0, id).await
    }

    /// The active catalog, for the badges screen.
    pub async fn catalog(&self) -> habitloop_shared::Result<Vec<BadgeRow>> {
        let statement = sea_query::Query::select()
            .columns(BADGE_COLUMNS)
            .from(Badge::Table)
            .and_where(Expr::col(Badge::Active).eq(true))
            .order_by(Badge::CreatedAt, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, BadgeRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    /// Badges a user has earned, most recent first.
    pub async fn earned_by_user(
        &self,
        user_id: &str,
    ) -> habitloop_shared::Result<Vec<EarnedBadgeRow>> {
        let statement = sea_query::Query::select()
            .expr_as(Expr::col((Badge::Table, Badge::Id)), Alias::new("badge_id"))
            .column((Badge::Table, Badge::Name))
            .column((Badge::Table, Badge::Description))
            .column((Badge::Table, Badge::Icon))
            .column((UserBadge::Table, UserBadge::EarnedAt))
            .from(UserBadge::Table)
            .inner_join(
                Badge::Table,
                Expr::col((UserBadge::Table, UserBadge::BadgeId))
                    .equals((Badge::Table, Badge::Id)),
            )
            .and_where(Expr::col((UserBadge::Table, UserBadge::UserId)).eq(user_id))
            .order_by((UserBadge::Table, UserBadge::EarnedAt), Order::Desc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, EarnedBadgeRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }
}
