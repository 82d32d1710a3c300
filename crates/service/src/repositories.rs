//! One place that picks the storage backend for every repository.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::auth::repo::SeaOrmAuthRepository;
use crate::auth::repository::AuthRepository;
use crate::customer::repository::{mock::MockCustomerRepository, CustomerRepository};
use crate::customer::seaorm::SeaOrmCustomerRepository;
use crate::invoice::repository::{mock::MockInvoiceRepository, InvoiceRepository};
use crate::invoice::seaorm::SeaOrmInvoiceRepository;
use crate::login::repository::{mock::MockLoginRepository, LoginRepository};
use crate::login::seaorm::SeaOrmLoginRepository;
use crate::user::repository::{mock::MockUserRepository, UserRepository};
use crate::user::seaorm::SeaOrmUserRepository;
use crate::vendor::repository::{mock::MockVendorRepository, VendorRepository};
use crate::vendor::seaorm::SeaOrmVendorRepository;

#[derive(Clone)]
pub struct Repositories {
    pub customers: Arc<dyn CustomerRepository>,
    pub vendors: Arc<dyn VendorRepository>,
    pub invoices: Arc<dyn InvoiceRepository>,
    pub users: Arc<dyn UserRepository>,
    pub auth: Arc<dyn AuthRepository>,
    pub logins: Arc<dyn LoginRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn seaorm(db: DatabaseConnection) -> Self {
        Self {
            customers: Arc::new(SeaOrmCustomerRepository::new(db.clone())),
            vendors: Arc::new(SeaOrmVendorRepository::new(db.clone())),
            invoices: Arc::new(SeaOrmInvoiceRepository::new(db.clone())),
            users: Arc::new(SeaOrmUserRepository::new(db.clone())),
            auth: Arc::new(SeaOrmAuthRepository::new(db.clone())),
            logins: Arc::new(SeaOrmLoginRepository::new(db)),
        }
    }

    /// In-memory repositories; users and credentials share one store and
    /// customers see the invoices that reference them.
    pub fn in_memory() -> Self {
        let users = Arc::new(MockUserRepository::default());
        let invoices = Arc::new(MockInvoiceRepository::default());
        Self {
            customers: Arc::new(MockCustomerRepository::default().with_invoices(invoices.clone())),
            vendors: Arc::new(MockVendorRepository::default()),
            invoices,
            users: users.clone(),
            auth: users,
            logins: Arc::new(MockLoginRepository::default()),
        }
    }
}
