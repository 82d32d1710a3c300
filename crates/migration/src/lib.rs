//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_customer_type_static;
mod m20240601_000002_create_customer;
mod m20240601_000003_create_vendor;
mod m20240601_000004_create_invoice;
mod m20240601_000005_create_invoice_item;
mod m20240601_000006_create_user;
mod m20240601_000007_create_user_credentials;
mod m20240601_000008_create_login;
mod m20240601_000009_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_customer_type_static::Migration),
            Box::new(m20240601_000002_create_customer::Migration),
            Box::new(m20240601_000003_create_vendor::Migration),
            Box::new(m20240601_000004_create_invoice::Migration),
            Box::new(m20240601_000005_create_invoice_item::Migration),
            Box::new(m20240601_000006_create_user::Migration),
            Box::new(m20240601_000007_create_user_credentials::Migration),
            Box::new(m20240601_000008_create_login::Migration),
            // Indexes should always be applied last
            Box::new(m20240601_000009_add_indexes::Migration),
        ]
    }
}
