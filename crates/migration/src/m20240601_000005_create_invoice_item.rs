//! Create `invoice_item` table; rows go away with their invoice.
use sea_orm_migration::{prelude::*, schema::*};

use crate::m20240601_000004_create_invoice::Invoice;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InvoiceItem::Table)
                    .if_not_exists()
                    .col(uuid(InvoiceItem::InvoiceItemId).primary_key())
                    .col(uuid(InvoiceItem::InvoiceId).not_null())
                    .col(integer(InvoiceItem::ProductId).not_null())
                    .col(string_len(InvoiceItem::ProductName, 255).not_null())
                    .col(decimal_len(InvoiceItem::Quantity, 14, 3).not_null())
                    .col(decimal_len(InvoiceItem::Price, 14, 2).not_null())
                    .col(decimal_len(InvoiceItem::Total, 14, 2).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoice_item_invoice")
                            .from(InvoiceItem::Table, InvoiceItem::InvoiceId)
                            .to(Invoice::Table, Invoice::InvoiceId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(InvoiceItem::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum InvoiceItem {
    Table,
    InvoiceItemId,
    InvoiceId,
    ProductId,
    ProductName,
    Quantity,
    Price,
    Total,
}
