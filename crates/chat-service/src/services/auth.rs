//! Authentication service
//!
//! Handles user registration and login. A successful login hands out a
//! single-use token embedded in the WebSocket URL.

use chat_common::auth::{hash_password, verify_password};
use chat_core::entities::User;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::{connect_url, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(username = %request.user_name))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<RegisterResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        if self
            .ctx
            .user_repo()
            .find_by_username(&request.user_name)
            .await?
            .is_some()
        {
            return Err(chat_core::DomainError::UsernameTaken.into());
        }

        let password_hash =
            hash_password(&request.password).map_err(|e| ServiceError::internal(e.to_string()))?;

        let user = User::new(Uuid::new_v4().to_string(), request.user_name);

        // A concurrent registration can still win the race; the repository
        // reports that as UsernameTaken.
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered successfully");

        Ok(RegisterResponse::from(&user))
    }

    /// Login with username and password, issuing a connect token.
    ///
    /// `host` is the authority the client used to reach us; it becomes the
    /// host of the returned WebSocket URL.
    #[instrument(skip(self, request), fields(username = %request.user_name))]
    pub async fn login(&self, request: LoginRequest, host: &str) -> ServiceResult<LoginResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let user = self
            .ctx
            .user_repo()
            .find_by_username(&request.user_name)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                ServiceError::invalid_credentials()
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(&user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::invalid_credentials()
            })?;

        let is_valid = verify_password(&request.password, &password_hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if !is_valid {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::invalid_credentials());
        }

        let user_id = user.id.clone();
        let token = self.ctx.token_store().issue_new(user);

        info!(user_id = %user_id, "User logged in successfully");

        Ok(LoginResponse {
            url: connect_url(host, &token),
        })
    }
}
