//! User accounts: authentication and the admin user-management screen.

use super::jwt::{AuthError, JwtService, TokenPair};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Utc};
use lingua_app::Role;
use lingua_core::{filter_by_term, FieldError, LinguaError, LinguaResult, Searchable};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// User registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

/// User login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// User registration/login response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserInfo,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

/// Public user information
#[derive(Debug, Serialize, Clone)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Searchable for UserInfo {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.username.as_str(), self.email.as_str()];
        if let Some(display_name) = &self.display_name {
            fields.push(display_name);
        }
        fields
    }
}

/// Internal user data with password hash
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub id: String,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserAccount {
    /// Create new user with hashed password
    pub fn new(
        username: String,
        email: String,
        password: &str,
        display_name: Option<String>,
        role: Role,
    ) -> Result<Self, AuthError> {
        let password_hash = hash_password(password)?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            username,
            email,
            display_name,
            password_hash,
            role,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Verify password
    pub fn verify_password(&self, password: &str) -> bool {
        verify_password(password, &self.password_hash).unwrap_or(false)
    }

    /// Convert to public user info
    pub fn to_user_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            role: self.role,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

/// Database user record
#[derive(Debug, sqlx::FromRow)]
struct UserRecord {
    id: String,
    username: String,
    email: String,
    display_name: Option<String>,
    password_hash: String,
    role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRecord {
    fn to_account(&self) -> UserAccount {
        UserAccount {
            id: self.id.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            password_hash: self.password_hash.clone(),
            role: Role::parse_or_default(Some(&self.role)),
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// The single owning store for user accounts, backed by the database with a
/// cache for frequently accessed users.
#[derive(Debug, Clone)]
pub struct UserStore {
    pool: SqlitePool,
    cache: Arc<RwLock<HashMap<String, UserAccount>>>,
}

impl UserStore {
    /// Create the store and seed the default admin account.
    pub async fn new(pool: SqlitePool) -> Result<Self, AuthError> {
        let store = Self {
            pool,
            cache: Arc::new(RwLock::new(HashMap::new())),
        };

        store.ensure_default_admin().await?;
        Ok(store)
    }

    /// Ensure default admin user exists
    async fn ensure_default_admin(&self) -> Result<(), AuthError> {
        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind("admin")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                warn!("Failed to check for admin user: {}", e);
                AuthError::TokenCreation
            })?;
        if existing > 0 {
            debug!("Admin user already exists");
            return Ok(());
        }

        let admin = UserAccount::new(
            "admin".to_string(),
            "admin@lingua.local".to_string(),
            "admin123", // Default password - should be changed in production
            Some("Administrator".to_string()),
            Role::Admin,
        )?;

        self.insert_account(&admin).await?;
        info!("Created default admin user");
        Ok(())
    }

    async fn insert_account(&self, account: &UserAccount) -> Result<(), AuthError> {
        sqlx::query(
            "INSERT INTO users (id, username, email, display_name, password_hash, role, is_active, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&account.id)
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.display_name)
        .bind(&account.password_hash)
        .bind(account.role.to_string())
        .bind(account.is_active)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!("Failed to insert user: {}", e);
            AuthError::InvalidCredentials
        })?;

        let mut cache = self.cache.write().await;
        cache.insert(account.username.clone(), account.clone());

        debug!("User inserted successfully: {}", account.username);
        Ok(())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, AuthError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(|_| AuthError::TokenCreation)?;
        Ok(count > 0)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AuthError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|_| AuthError::TokenCreation)?;
        Ok(count > 0)
    }

    /// Register new user. Self-registered accounts are always students.
    pub async fn register_user(&self, request: RegisterRequest) -> Result<UserAccount, AuthError> {
        debug!("Starting user registration for: {}", request.username);

        if request.username.is_empty() || request.email.is_empty() || request.password.is_empty() {
            debug!("Registration failed: missing credentials");
            return Err(AuthError::MissingCredentials);
        }

        if request.password.len() < 6 {
            debug!("Registration failed: password too short");
            return Err(AuthError::InvalidCredentials);
        }

        if self.username_exists(&request.username).await? {
            debug!(
                "Registration failed: username '{}' already exists",
                request.username
            );
            return Err(AuthError::InvalidCredentials);
        }
        if self.email_exists(&request.email).await? {
            debug!("Registration failed: email '{}' already exists", request.email);
            return Err(AuthError::InvalidCredentials);
        }

        let account = UserAccount::new(
            request.username,
            request.email,
            &request.password,
            request.display_name,
            Role::Student,
        )?;

        self.insert_account(&account).await?;
        info!("Registered new user: {}", account.username);
        Ok(account)
    }

    /// Authenticate user
    pub async fn authenticate_user(&self, request: LoginRequest) -> Result<UserAccount, AuthError> {
        let account = self
            .get_user_by_username(&request.username)
            .await
            .ok_or(AuthError::InvalidCredentials)?;

        if !account.verify_password(&request.password) {
            warn!("Invalid password for user: {}", request.username);
            return Err(AuthError::InvalidCredentials);
        }

        if !account.is_active {
            warn!("Login attempt for disabled account: {}", request.username);
            return Err(AuthError::AccountDisabled);
        }

        debug!("User authenticated: {}", request.username);
        Ok(account)
    }

    /// Get user by username
    pub async fn get_user_by_username(&self, username: &str) -> Option<UserAccount> {
        {
            let cache = self.cache.read().await;
            if let Some(account) = cache.get(username) {
                return Some(account.clone());
            }
        }

        let record =
            sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE username = ?")
                .bind(username)
                .fetch_optional(&self.pool)
                .await
                .ok()
                .flatten()?;
        let account = record.to_account();

        let mut cache = self.cache.write().await;
        cache.insert(username.to_string(), account.clone());
        Some(account)
    }

    /// Get user by ID
    pub async fn get_user_by_id(&self, user_id: &str) -> Option<UserAccount> {
        let record = sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .ok()
            .flatten()?;
        Some(record.to_account())
    }

    // -- admin user management --------------------------------------------

    /// List users for the admin management screen.
    pub async fn list_users(&self, search: Option<&str>) -> LinguaResult<Vec<UserInfo>> {
        let records =
            sqlx::query_as::<_, UserRecord>("SELECT * FROM users ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| LinguaError::storage_with("failed to list users", e))?;
        let users: Vec<UserInfo> = records
            .iter()
            .map(|r| r.to_account().to_user_info())
            .collect();
        Ok(filter_by_term(users, search))
    }

    /// Create a user with an explicit role (admin screen only).
    pub async fn create_user(&self, request: &AdminCreateUserRequest) -> LinguaResult<UserInfo> {
        request.validate()?;

        if self
            .username_exists(&request.username)
            .await
            .map_err(|_| LinguaError::storage("failed to check username"))?
        {
            return Err(LinguaError::conflict(format!(
                "Username '{}' is already taken",
                request.username
            )));
        }
        if self
            .email_exists(&request.email)
            .await
            .map_err(|_| LinguaError::storage("failed to check email"))?
        {
            return Err(LinguaError::conflict(format!(
                "Email '{}' is already registered",
                request.email
            )));
        }

        let role = Role::parse_or_default(Some(&request.role));
        let account = UserAccount::new(
            request.username.clone(),
            request.email.clone(),
            &request.password,
            request.display_name.clone(),
            role,
        )
        .map_err(|_| LinguaError::storage("failed to hash password"))?;

        self.insert_account(&account)
            .await
            .map_err(|_| LinguaError::storage("failed to create user"))?;
        Ok(account.to_user_info())
    }

    /// Update a user's profile fields and role (admin screen only).
    pub async fn update_user(
        &self,
        user_id: &str,
        request: &AdminUpdateUserRequest,
    ) -> LinguaResult<UserInfo> {
        request.validate()?;

        let existing = self
            .get_user_by_id(user_id)
            .await
            .ok_or_else(|| LinguaError::not_found("user"))?;
        let role = Role::parse_or_default(Some(&request.role));

        sqlx::query(
            "UPDATE users SET display_name = ?, role = ?, is_active = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&request.display_name)
        .bind(role.to_string())
        .bind(request.is_active)
        .bind(Utc::now())
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| LinguaError::storage_with("failed to update user", e))?;

        // Drop the stale cache entry; the next lookup re-reads the store.
        let mut cache = self.cache.write().await;
        cache.remove(&existing.username);
        drop(cache);

        let updated = self
            .get_user_by_id(user_id)
            .await
            .ok_or_else(|| LinguaError::not_found("user"))?;
        Ok(updated.to_user_info())
    }

    /// Delete a user (admin screen only). Idempotent.
    pub async fn delete_user(&self, user_id: &str) -> LinguaResult<()> {
        if let Some(account) = self.get_user_by_id(user_id).await {
            let mut cache = self.cache.write().await;
            cache.remove(&account.username);
        }

        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| LinguaError::storage_with("failed to delete user", e))?;
        Ok(())
    }
}

/// Admin request to create a user with a role.
#[derive(Debug, Deserialize)]
pub struct AdminCreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
    pub role: String,
}

impl AdminCreateUserRequest {
    pub fn validate(&self) -> LinguaResult<()> {
        let mut errors = Vec::new();
        if self.username.trim().is_empty() {
            errors.push(FieldError::new("username", "is required"));
        }
        if self.email.trim().is_empty() {
            errors.push(FieldError::new("email", "is required"));
        }
        if self.password.len() < 6 {
            errors.push(FieldError::new("password", "must be at least 6 characters"));
        }
        validate_role_field(&self.role, &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(LinguaError::validation(errors))
        }
    }
}

/// Admin request to update a user.
#[derive(Debug, Deserialize)]
pub struct AdminUpdateUserRequest {
    pub display_name: Option<String>,
    pub role: String,
    pub is_active: bool,
}

impl AdminUpdateUserRequest {
    pub fn validate(&self) -> LinguaResult<()> {
        let mut errors = Vec::new();
        validate_role_field(&self.role, &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(LinguaError::validation(errors))
        }
    }
}

fn validate_role_field(role: &str, errors: &mut Vec<FieldError>) {
    if role.trim().is_empty() {
        errors.push(FieldError::new("role", "is required"));
    } else if role.parse::<Role>().is_err() {
        errors.push(FieldError::new(
            "role",
            "must be one of student, teacher, admin",
        ));
    }
}

/// User service for authentication operations
#[derive(Debug, Clone)]
pub struct UserService {
    store: UserStore,
}

impl UserService {
    /// Create new user service
    pub fn new(store: UserStore) -> Self {
        Self { store }
    }

    /// Get user by ID
    pub async fn get_user_by_id(&self, user_id: &str) -> Option<UserAccount> {
        self.store.get_user_by_id(user_id).await
    }

    /// Get user by username
    pub async fn get_user_by_username(&self, username: &str) -> Option<UserAccount> {
        self.store.get_user_by_username(username).await
    }

    /// Register new user
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AuthError> {
        let account = self.store.register_user(request).await?;

        let tokens = JwtService::generate_token_pair(
            account.id.clone(),
            account.display_name.clone(),
            Some(account.email.clone()),
            account.role,
        )?;

        Ok(AuthResponse {
            user: account.to_user_info(),
            tokens,
        })
    }

    /// Login user
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AuthError> {
        let account = self.store.authenticate_user(request).await?;

        let tokens = JwtService::generate_token_pair(
            account.id.clone(),
            account.display_name.clone(),
            Some(account.email.clone()),
            account.role,
        )?;

        Ok(AuthResponse {
            user: account.to_user_info(),
            tokens,
        })
    }

    /// Refresh access token
    pub async fn refresh_token(&self, request: RefreshRequest) -> Result<TokenPair, AuthError> {
        let claims = JwtService::verify_token(&request.refresh_token)?;

        // Ensure it's a refresh token
        if claims.token_type != super::jwt::TokenType::Refresh {
            return Err(AuthError::InvalidTokenType);
        }

        // Get current user data
        let account = self
            .store
            .get_user_by_id(&claims.sub)
            .await
            .ok_or(AuthError::InvalidCredentials)?;

        if !account.is_active {
            return Err(AuthError::AccountDisabled);
        }

        JwtService::generate_token_pair(
            account.id,
            account.display_name,
            Some(account.email),
            account.role,
        )
    }

    /// Get user store (for the admin management screen)
    pub fn store(&self) -> &UserStore {
        &self.store
    }
}

/// Hash password using Argon2
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::TokenCreation)
}

/// Verify password against hash
fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidToken)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
