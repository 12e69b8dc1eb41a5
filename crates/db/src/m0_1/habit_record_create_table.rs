use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::HabitRecord;

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(HabitRecord::Table)
        .col(
            ColumnDef::new(HabitRecord::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(HabitRecord::UserId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(HabitRecord::HabitId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(HabitRecord::RecordedAt)
                .string()
                .not_null()
                .string_len(10),
        )
        .col(
            ColumnDef::new(HabitRecord::Completed)
                .boolean()
                .not_null()
                .default(true),
        )
        .col(ColumnDef::new(HabitRecord::Note).text())
        .col(
            ColumnDef::new(HabitRecord::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(HabitRecord::Table).to_owned()
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
