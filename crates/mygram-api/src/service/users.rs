use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use mygram_db::{StoreError, UserRepository};
use mygram_types::api::{Claims, LoginRequest, RegisterRequest, UpdateUserRequest};
use mygram_types::models::User;

use crate::error::{ServiceError, ServiceResult};
use crate::password::{hash_password, verify_password};
use crate::token::TokenKeys;

const TOKEN_TTL_HOURS: i64 = 24;

pub struct UserService {
    repo: Arc<dyn UserRepository>,
    keys: TokenKeys,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, keys: TokenKeys) -> Self {
        Self { repo, keys }
    }

    /// Generates the id and hashes the password here, then persists.
    pub fn register(&self, req: RegisterRequest) -> ServiceResult<User> {
        validate_account(&req.username, &req.email, &req.password)?;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: req.username.trim().to_string(),
            email: req.email.trim().to_lowercase(),
            password: hash_password(&req.password)?,
            dob: req.dob,
            created_at: now,
            updated_at: now,
        };

        let created = self.repo.create(&user)?;
        if created.id.is_nil() {
            return Err(anyhow::anyhow!("user was stored without an identifier").into());
        }

        info!("Registered user {} ({})", created.username, created.id);
        Ok(created)
    }

    pub fn login(&self, req: &LoginRequest) -> ServiceResult<User> {
        let email = req.email.trim().to_lowercase();
        let user = match self.repo.get_by_email(&email) {
            Ok(user) => user,
            Err(StoreError::NotFound(_)) => {
                debug!("Login failed: no account for {}", email);
                return Err(ServiceError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        };

        if !verify_password(&req.password, &user.password) {
            debug!("Login failed: wrong password for {}", user.id);
            return Err(ServiceError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Signs a 24-hour session token whose subject is the user's id.
    pub fn generate_token(&self, user: &User) -> ServiceResult<String> {
        let now = Utc::now();
        let claims = Claims {
            jti: Uuid::new_v4(),
            sub: user.id,
            username: user.username.clone(),
            iss: self.keys.issuer.clone(),
            aud: self.keys.audience.clone(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };

        Ok(self.keys.sign(&claims)?)
    }

    pub fn list(&self) -> ServiceResult<Vec<User>> {
        Ok(self.repo.list()?)
    }

    pub fn get(&self, id: Uuid) -> ServiceResult<User> {
        let user = self.repo.get_by_id(id)?;
        if user.id.is_nil() {
            return Err(ServiceError::NotFound("user"));
        }
        Ok(user)
    }

    /// Overwrites username, email, password and dob. Only the account itself
    /// may do this; id and `created_at` are kept.
    pub fn update(&self, id: Uuid, actor: Uuid, req: UpdateUserRequest) -> ServiceResult<User> {
        let mut user = self.get(id)?;
        super::ensure_owner(user.id, actor, "cannot modify another user's account")?;
        validate_account(&req.username, &req.email, &req.password)?;

        user.username = req.username.trim().to_string();
        user.email = req.email.trim().to_lowercase();
        user.password = hash_password(&req.password)?;
        user.dob = req.dob;
        user.updated_at = Utc::now();

        Ok(self.repo.update(&user)?)
    }

    pub fn delete(&self, id: Uuid, actor: Uuid) -> ServiceResult<()> {
        let user = self.get(id)?;
        super::ensure_owner(user.id, actor, "cannot delete another user's account")?;

        self.repo.delete(id)?;
        info!("Deleted user {}", id);
        Ok(())
    }
}

fn validate_account(username: &str, email: &str, password: &str) -> ServiceResult<()> {
    let length = username.trim().chars().count();
    if !(3..=32).contains(&length) {
        return Err(ServiceError::Validation(
            "username must be between 3 and 32 characters".into(),
        ));
    }
    let email = email.trim();
    if email.len() < 3 || !email.contains('@') {
        return Err(ServiceError::Validation("email is not valid".into()));
    }
    if password.len() < 8 {
        return Err(ServiceError::Validation(
            "password must be at least 8 characters".into(),
        ));
    }
    Ok(())
}
