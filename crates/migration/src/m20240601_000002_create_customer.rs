//! Create `customer` table with optional FK to `customer_type_static`.
//!
//! `customer_status` is the soft-delete flag; uniqueness of mobile/email among
//! active rows is added with the indexes migration.
use sea_orm_migration::{prelude::*, schema::*};

use crate::m20240601_000001_create_customer_type_static::CustomerTypeStatic;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customer::Table)
                    .if_not_exists()
                    .col(pk_auto(Customer::CustomerId))
                    .col(string_len(Customer::CustomerName, 255).not_null())
                    .col(string_len_null(Customer::CustomerOwnerName, 255))
                    .col(string_len(Customer::CustomerMobileNumber, 16).not_null())
                    .col(string_len(Customer::CustomerEmailId, 255).not_null())
                    .col(string_len(Customer::CustomerAddress, 500).not_null())
                    .col(string_len(Customer::CustomerGstNo, 15).not_null())
                    .col(string_len_null(Customer::Logo, 1024))
                    .col(boolean(Customer::CustomerStatus).default(true).not_null())
                    .col(integer_null(Customer::CustomerTypeId))
                    .col(timestamp_with_time_zone(Customer::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Customer::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customer_customer_type")
                            .from(Customer::Table, Customer::CustomerTypeId)
                            .to(CustomerTypeStatic::Table, CustomerTypeStatic::CustomerTypeId)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Customer::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Customer {
    Table,
    CustomerId,
    CustomerName,
    CustomerOwnerName,
    CustomerMobileNumber,
    CustomerEmailId,
    CustomerAddress,
    CustomerGstNo,
    Logo,
    CustomerStatus,
    CustomerTypeId,
    CreatedAt,
    UpdatedAt,
}
