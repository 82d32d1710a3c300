//! Create `invoice` table referencing `vendor` and `customer`.
use sea_orm_migration::{prelude::*, schema::*};

use crate::m20240601_000002_create_customer::Customer;
use crate::m20240601_000003_create_vendor::Vendor;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Invoice::Table)
                    .if_not_exists()
                    .col(uuid(Invoice::InvoiceId).primary_key())
                    .col(string_len(Invoice::InvoiceNumber, 64).not_null())
                    .col(uuid(Invoice::ShopId).not_null())
                    .col(integer(Invoice::CustomerId).not_null())
                    .col(decimal_len(Invoice::Amount, 14, 2).not_null())
                    .col(decimal_len(Invoice::Discount, 14, 2).default(0).not_null())
                    .col(decimal_len(Invoice::TaxAmount, 14, 2).default(0).not_null())
                    .col(string_len(Invoice::PaymentMode, 32).not_null())
                    .col(timestamp_with_time_zone_null(Invoice::DueDate))
                    .col(boolean(Invoice::InvoiceStatus).default(true).not_null())
                    .col(timestamp_with_time_zone(Invoice::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Invoice::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoice_vendor")
                            .from(Invoice::Table, Invoice::ShopId)
                            .to(Vendor::Table, Vendor::ShopId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoice_customer")
                            .from(Invoice::Table, Invoice::CustomerId)
                            .to(Customer::Table, Customer::CustomerId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Invoice::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Invoice {
    Table,
    InvoiceId,
    InvoiceNumber,
    ShopId,
    CustomerId,
    Amount,
    Discount,
    TaxAmount,
    PaymentMode,
    DueDate,
    InvoiceStatus,
    CreatedAt,
    UpdatedAt,
}
