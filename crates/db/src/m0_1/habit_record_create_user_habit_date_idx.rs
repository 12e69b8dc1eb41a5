use sea_query::{Index, IndexCreateStatement, IndexDropStatement};

use crate::table::HabitRecord;

pub struct Operation;

// One record per (user, habit, calendar day). Toggle races and double
// submits resolve here, not in application code.
fn up_statement() -> IndexCreateStatement {
    Index::create()
        .name("idx_habit_record_user_habit_date")
        .table(HabitRecord::Table)
        .unique()
        .col(HabitRecord::UserId)
        .col(HabitRecord::HabitId)
        .col(HabitRecord::RecordedAt)
        .to_owned()
}

fn down_statement() -> IndexDropStatement {
    Index::drop()
        .name("idx_habit_record_user_habit_date")
        .table(HabitRecord::Table)
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
