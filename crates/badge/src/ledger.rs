use habitloop_db::table::UserBadge;
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};
use time::OffsetDateTime;
use ulid::Ulid;

#[derive(Debug, Clone, FromRow)]
pub struct UserBadgeRow {
    pub id: String,
    pub user_id: String,
    pub badge_id: String,
    pub earned_at: i64,
}

/// Result of an award attempt. `AlreadyAwarded` is a normal outcome, not an
/// error: it is what the losing side of a concurrent check observes.
#[derive(Debug)]
pub enum AwardOutcome {
    Fresh(UserBadgeRow),
    AlreadyAwarded,
}

impl AwardOutcome {
    pub fn is_fresh(&self) -> bool {
        matches!(self, Self::Fresh(_))
    }
}

/// Durable (user, badge, earned-at) ledger. Idempotency is enforced by the
/// unique index on (user_id, badge_id); the existence precheck is only a
/// fast path and carries no correctness weight.
#[derive(Clone)]
pub struct Ledger(pub SqlitePool);

impl Ledger {
    pub async fn try_award(
        &self,
        user_id: &str,
        badge_id: &str,
    ) -> habitloop_shared::Result<AwardOutcome> {
        if self.exists(user_id, badge_id).await? {
            return Ok(AwardOutcome::AlreadyAwarded);
        }

        let row = UserBadgeRow {
            id: Ulid::new().to_string(),
            user_id: user_id.to_owned(),
            badge_id: badge_id.to_owned(),
            earned_at: OffsetDateTime::now_utc().unix_timestamp(),
        };

        let statement = Query::insert()
            .into_table(UserBadge::Table)
            .columns([
                UserBadge::Id,
                UserBadge::UserId,
                UserBadge::BadgeId,
                UserBadge::EarnedAt,
            ])
            .values_panic([
                row.id.as_str().into(),
                row.user_id.as_str().into(),
                row.badge_id.as_str().into(),
                row.earned_at.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        match sqlx::query_with(&sql, values).execute(&self.0).await {
            Ok(_) => Ok(AwardOutcome::Fresh(row)),
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                // Lost the race to a concurrent check for the same user.
                Ok(AwardOutcome::AlreadyAwarded)
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn exists(&self, user_id: &str, badge_id: &str) -> habitloop_shared::Result<bool> {
        let statement = Query::select()
            .expr(Expr::col(UserBadge::Id).count())
            .from(UserBadge::Table)
            .and_where(Expr::col(UserBadge::UserId).eq(user_id))
            .and_where(Expr::col(UserBadge::BadgeId).eq(badge_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        let count = sqlx::query_scalar_with::<_, i64, _>(&sql, values)
            .fetch_one(&self.0)
            .await?;

        Ok(count > 0)
    }

    /// A user's awards, most recent first.
    pub async fn list(&self, user_id: &str) -> habitloop_shared::Result<Vec<UserBadgeRow>> {
        let statement = Query::select()
            .columns([
                UserBadge::Id,
                UserBadge::UserId,
                UserBadge::BadgeId,
                UserBadge::EarnedAt,
            ])
            .from(UserBadge::Table)
            .and_where(Expr::col(UserBadge::UserId).eq(user_id))
            .order_by(UserBadge::EarnedAt, Order::Desc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, UserBadgeRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }
}
