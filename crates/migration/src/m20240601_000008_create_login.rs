//! Create `login` table: one row per authentication attempt.
use sea_orm_migration::{prelude::*, schema::*};

use crate::m20240601_000006_create_user::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Login::Table)
                    .if_not_exists()
                    .col(uuid(Login::LoginId).primary_key())
                    .col(uuid_null(Login::UserId))
                    .col(string_len(Login::Email, 255).not_null())
                    .col(boolean(Login::Success).not_null())
                    .col(timestamp_with_time_zone(Login::LoggedInAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_login_user")
                            .from(Login::Table, Login::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Login::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Login { Table, LoginId, UserId, Email, Success, LoggedInAt }
