use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use tracing::{debug, info, instrument, warn};

use super::domain::{AuthSession, Claims, LoginInput};
use super::password::verify_password;
use super::repository::AuthRepository;
use crate::errors::{db, ServiceError};
use crate::login::LoginService;

/// Token signing settings
#[derive(Clone)]
pub struct TokenSettings {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

/// Auth business service independent of web framework
#[derive(Clone)]
pub struct AuthService {
    repo: Arc<dyn AuthRepository>,
    logins: LoginService,
    cfg: TokenSettings,
}

impl AuthService {
    pub fn new(repo: Arc<dyn AuthRepository>, logins: LoginService, cfg: TokenSettings) -> Self {
        Self { repo, logins, cfg }
    }

    /// Authenticate a user and issue an HS256 token. Every attempt is recorded.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, TokenSettings, domain::LoginInput};
    /// use service::login::{LoginService, repository::mock::MockLoginRepository};
    /// use service::user::{UserService, domain::NewUser, repository::mock::MockUserRepository};
    /// use std::sync::Arc;
    /// let users = Arc::new(MockUserRepository::default());
    /// let logins = LoginService::new(Arc::new(MockLoginRepository::default()));
    /// let svc = AuthService::new(users.clone(), logins, TokenSettings { jwt_secret: "secret".into(), token_ttl_hours: 1 });
    /// let register = UserService::new(users);
    /// let new_user = NewUser { email: "u@e.com".into(), name: "N".into(), mobile_number: None, password: "Passw0rd".into() };
    /// tokio_test::block_on(register.register(new_user)).unwrap();
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// assert!(svc.verify_token(&session.token).is_ok());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, ServiceError> {
        let Some(user) = self.repo.find_user_by_email(&input.email).await.map_err(db("find user"))? else {
            debug!("unknown email");
            self.logins.record_attempt(None, &input.email, false).await?;
            return Err(ServiceError::Unauthorized);
        };

        let verified = match self.repo.get_credentials(user.id).await.map_err(db("load credentials"))? {
            Some(cred) => verify_password(&input.password, &cred.password_hash)?,
            None => false,
        };
        if !verified {
            warn!(user_id = %user.id, "login_rejected");
            self.logins.record_attempt(Some(user.id), &user.email, false).await?;
            return Err(ServiceError::Unauthorized);
        }

        let now = Utc::now();
        let exp = (now + Duration::hours(self.cfg.token_ttl_hours)).timestamp();
        let claims = Claims { sub: user.id.to_string(), email: user.email.clone(), iat: now.timestamp(), exp };
        let token = encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| ServiceError::Token(e.to_string()))?;

        self.logins.record_attempt(Some(user.id), &user.email, true).await?;
        info!(user_id = %user.id, "user_logged_in");
        Ok(AuthSession { user, token, expires_at: exp })
    }

    /// Decode and check a token issued by [`AuthService::login`].
    pub fn verify_token(&self, token: &str) -> Result<Claims, ServiceError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|e| {
            debug!(error = %e, "token_rejected");
            ServiceError::Unauthorized
        })
    }
}
