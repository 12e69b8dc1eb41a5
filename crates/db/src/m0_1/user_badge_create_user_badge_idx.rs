use sea_query::{Index, IndexCreateStatement, IndexDropStatement};

use crate::table::UserBadge;

pub struct Operation;

// A user earns a badge at most once. Concurrent award attempts race to this
// index; the loser sees a unique violation and reports "already awarded".
fn up_statement() -> IndexCreateStatement {
    Index::create()
        .name("idx_user_badge_user_badge")
        .table(UserBadge::Table)
        .unique()
        .col(UserBadge::UserId)
        .col(UserBadge::BadgeId)
        .to_owned()
}

fn down_statement() -> IndexDropStatement {
    Index::drop()
        .name("idx_user_badge_user_badge")
        .table(UserBadge::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for Operation {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = up_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = down_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }
}
