use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::Habit;

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(Habit::Table)
        .col(
            ColumnDef::new(Habit::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Habit::UserId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(Habit::Title)
                .string()
                .not_null()
                .string_len(255),
        )
        .col(ColumnDef::new(Habit::Description).text())
        .col(ColumnDef::new(Habit::CreatedAt).big_integer().not_null())
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(Habit::Table).to_owned()
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
