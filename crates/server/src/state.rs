use service::auth::{AuthService, TokenSettings};
use service::customer::CustomerService;
use service::invoice::InvoiceService;
use service::login::LoginService;
use service::repositories::Repositories;
use service::user::UserService;
use service::vendor::VendorService;

/// Shared application state, built once at startup and cloned into handlers.
#[derive(Clone)]
pub struct ServerState {
    pub customers: CustomerService,
    pub vendors: VendorService,
    pub invoices: InvoiceService,
    pub users: UserService,
    pub logins: LoginService,
    pub auth: AuthService,
    /// Guard business routes with a bearer token.
    pub require_token: bool,
}

impl ServerState {
    pub fn new(repos: Repositories, auth: &configs::AuthConfig) -> Self {
        let logins = LoginService::new(repos.logins.clone());
        let tokens = TokenSettings { jwt_secret: auth.jwt_secret.clone(), token_ttl_hours: auth.token_ttl_hours };
        Self {
            customers: CustomerService::new(repos.customers.clone()),
            vendors: VendorService::new(repos.vendors.clone()),
            invoices: InvoiceService::new(repos.invoices.clone(), repos.vendors.clone(), repos.customers.clone()),
            users: UserService::new(repos.users.clone()),
            auth: AuthService::new(repos.auth.clone(), logins.clone(), tokens),
            logins,
            require_token: auth.require_token,
        }
    }

    /// State over in-memory repositories.
    pub fn in_memory(auth: &configs::AuthConfig) -> Self {
        Self::new(Repositories::in_memory(), auth)
    }
}
