//! Create `customer_type_static` lookup table and seed the known customer types.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CustomerTypeStatic::Table)
                    .if_not_exists()
                    .col(integer(CustomerTypeStatic::CustomerTypeId).primary_key())
                    .col(string_len(CustomerTypeStatic::CustomerTypeShortDescription, 64).not_null())
                    .col(string_len_null(CustomerTypeStatic::CustomerTypeDescription, 255))
                    .to_owned(),
            )
            .await?;

        let seed = Query::insert()
            .into_table(CustomerTypeStatic::Table)
            .columns([
                CustomerTypeStatic::CustomerTypeId,
                CustomerTypeStatic::CustomerTypeShortDescription,
                CustomerTypeStatic::CustomerTypeDescription,
            ])
            .values_panic([1.into(), "Retail".into(), "Walk-in and individual buyers".into()])
            .values_panic([2.into(), "Wholesale".into(), "Bulk buyers and resellers".into()])
            .values_panic([3.into(), "Corporate".into(), "Registered companies with GST billing".into()])
            .on_conflict(OnConflict::column(CustomerTypeStatic::CustomerTypeId).do_nothing().to_owned())
            .to_owned();
        manager.exec_stmt(seed).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CustomerTypeStatic::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum CustomerTypeStatic {
    Table,
    CustomerTypeId,
    CustomerTypeShortDescription,
    CustomerTypeDescription,
}
