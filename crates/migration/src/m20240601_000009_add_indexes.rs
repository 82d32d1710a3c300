//! Lookup indexes and the partial unique indexes that keep mobile numbers and
//! emails unique among active rows only. A soft-deleted row frees its values.
use sea_orm_migration::prelude::*;

use crate::m20240601_000004_create_invoice::Invoice;
use crate::m20240601_000005_create_invoice_item::InvoiceItem;
use crate::m20240601_000008_create_login::Login;

/// `(index name, table, column, predicate)` for each partial unique index.
const PARTIAL_UNIQUE: &[(&str, &str, &str, &str)] = &[
    ("uniq_customer_mobile_active", "customer", "customer_mobile_number", "customer_status"),
    ("uniq_customer_email_active", "customer", "customer_email_id", "customer_status"),
    ("uniq_vendor_mobile_active", "vendor", "shop_mobile_number", "shop_status"),
    ("uniq_vendor_email_active", "vendor", "shop_email_id", "shop_status"),
    ("uniq_user_email_active", "user", "email", "deleted_at IS NULL"),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for (name, table, column, predicate) in PARTIAL_UNIQUE {
            db.execute_unprepared(&format!(
                r#"CREATE UNIQUE INDEX IF NOT EXISTS "{name}" ON "{table}" ("{column}") WHERE {predicate}"#
            ))
            .await?;
        }

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uniq_invoice_number")
                    .table(Invoice::Table)
                    .col(Invoice::InvoiceNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_invoice_customer")
                    .table(Invoice::Table)
                    .col(Invoice::CustomerId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_invoice_item_invoice")
                    .table(InvoiceItem::Table)
                    .col(InvoiceItem::InvoiceId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_login_logged_in_at")
                    .table(Login::Table)
                    .col(Login::LoggedInAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for (name, ..) in PARTIAL_UNIQUE {
            db.execute_unprepared(&format!(r#"DROP INDEX IF EXISTS "{name}""#)).await?;
        }
        manager
            .drop_index(Index::drop().name("uniq_invoice_number").table(Invoice::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_invoice_customer").table(Invoice::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_invoice_item_invoice").table(InvoiceItem::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_login_logged_in_at").table(Login::Table).to_owned())
            .await
    }
}
