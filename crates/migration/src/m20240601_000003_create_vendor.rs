//! Create `vendor` (shop) table. `shop_status` is the soft-delete flag.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vendor::Table)
                    .if_not_exists()
                    .col(uuid(Vendor::ShopId).primary_key())
                    .col(string_len(Vendor::ShopName, 255).not_null())
                    .col(string_len_null(Vendor::ShopOwnerName, 255))
                    .col(string_len(Vendor::ShopMobileNumber, 16).not_null())
                    .col(string_len(Vendor::ShopEmailId, 255).not_null())
                    .col(string_len(Vendor::ShopAddress, 500).not_null())
                    .col(string_len_null(Vendor::ShopGstNo, 15))
                    .col(integer_null(Vendor::ShopTypeId))
                    .col(integer_null(Vendor::ShopCountryId))
                    .col(integer_null(Vendor::ShopStateId))
                    .col(string_len_null(Vendor::Logo, 1024))
                    .col(boolean(Vendor::ShopStatus).default(true).not_null())
                    .col(timestamp_with_time_zone(Vendor::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Vendor::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Vendor::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Vendor {
    Table,
    ShopId,
    ShopName,
    ShopOwnerName,
    ShopMobileNumber,
    ShopEmailId,
    ShopAddress,
    ShopGstNo,
    ShopTypeId,
    ShopCountryId,
    ShopStateId,
    Logo,
    ShopStatus,
    CreatedAt,
    UpdatedAt,
}
