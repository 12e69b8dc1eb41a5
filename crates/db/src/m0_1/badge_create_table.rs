use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::Badge;

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(Badge::Table)
        .col(
            ColumnDef::new(Badge::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Badge::Name)
                .string()
                .not_null()
                .string_len(255),
        )
        .col(ColumnDef::new(Badge::Description).text())
        .col(ColumnDef::new(Badge::Icon).string().string_len(255))
        .col(
            ColumnDef::new(Badge::ConditionType)
                .string()
                .not_null()
                .string_len(30),
        )
        .col(ColumnDef::new(Badge::ConditionValue).double().not_null())
        .col(
            ColumnDef::new(Badge::Active)
                .boolean()
                .not_null()
                .default(true),
        )
        .col(ColumnDef::new(Badge::CreatedAt).big_integer().not_null())
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(Badge::Table).to_owned()
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
