//! Authentication service: signup, signin, and token verification

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::User;
use crate::error::DomainError;
use crate::repositories::UserRepository;
use timetrack_security::jwt::JwtService;
use timetrack_security::password::PasswordService;

/// Public identity carried in tokens and responses. Never includes the
/// password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl From<&User> for AuthUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

/// A signup/signin result: the identity plus a signed token.
#[derive(Debug, Serialize)]
pub struct AuthenticatedUser {
    pub user: AuthUser,
    pub token: String,
}

pub struct AuthService<U: UserRepository> {
    users: Arc<U>,
    jwt: Arc<JwtService>,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(users: Arc<U>, jwt: Arc<JwtService>) -> Self {
        Self { users, jwt }
    }

    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<AuthenticatedUser, DomainError> {
        if email.is_empty() || password.is_empty() || name.is_empty() {
            return Err(DomainError::Validation(
                "Email, password, and name are required".to_string(),
            ));
        }

        let email = email.trim().to_lowercase();
        if self.users.find_by_email(&email).await?.is_some() {
            warn!("Signup failed: email already exists: {}", email);
            return Err(DomainError::EmailAlreadyExists(email));
        }

        let hash = PasswordService::hash(password)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;
        let user = User::new(&email, hash, name)?;
        let created = self.users.create(&user).await?;
        info!("User registered: {}", created.id);

        self.with_token(&created)
    }

    pub async fn signin(&self, email: &str, password: &str) -> Result<AuthenticatedUser, DomainError> {
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        // Unknown email and wrong password surface identically.
        let email = email.trim().to_lowercase();
        let user = self.users.find_by_email(&email).await?.ok_or_else(|| {
            warn!("Signin failed: email not found: {}", email);
            DomainError::InvalidCredentials
        })?;

        let valid = PasswordService::verify(password, &user.password_hash)
            .map_err(|_| DomainError::InvalidCredentials)?;
        if !valid {
            warn!("Signin failed: invalid password for: {}", email);
            return Err(DomainError::InvalidCredentials);
        }

        info!("Signin successful for: {}", user.id);
        self.with_token(&user)
    }

    fn with_token(&self, user: &User) -> Result<AuthenticatedUser, DomainError> {
        let token = self
            .jwt
            .generate_token(&user.id, &user.email, &user.name)
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))?;
        Ok(AuthenticatedUser {
            user: AuthUser::from(user),
            token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::user_repository::MockUserRepository;

    fn jwt() -> Arc<JwtService> {
        Arc::new(JwtService::new("test-secret".to_string(), 3600))
    }

    fn stored_user(email: &str, password: &str) -> User {
        let hash = PasswordService::hash(password).unwrap();
        User::new(email, hash, "Alice").unwrap()
    }

    #[tokio::test]
    async fn test_signup_creates_user_and_issues_token() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create().returning(|u| Ok(u.clone()));

        let svc = AuthService::new(Arc::new(repo), jwt());
        let result = svc
            .signup("Alice@Example.com", "hunter22", "Alice")
            .await
            .unwrap();
        assert_eq!(result.user.email, "alice@example.com");
        assert!(!result.token.is_empty());
    }

    #[tokio::test]
    async fn test_signup_duplicate_email_conflicts() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(stored_user("a@b.com", "pw123456"))));

        let svc = AuthService::new(Arc::new(repo), jwt());
        let err = svc.signup("a@b.com", "pw123456", "Alice").await.unwrap_err();
        assert!(matches!(err, DomainError::EmailAlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_signin_wrong_password_and_unknown_email_look_identical() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|email| {
                if email == "a@b.com" {
                    Ok(Some(stored_user("a@b.com", "correct-pw")))
                } else {
                    Ok(None)
                }
            });

        let svc = AuthService::new(Arc::new(repo), jwt());
        let wrong_pw = svc.signin("a@b.com", "wrong-pw").await.unwrap_err();
        let unknown = svc.signin("x@y.com", "whatever").await.unwrap_err();
        assert!(matches!(wrong_pw, DomainError::InvalidCredentials));
        assert!(matches!(unknown, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_signin_success_issues_verifiable_token() {
        let user = stored_user("a@b.com", "hunter22");
        let user_id = user.id;
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let jwt = jwt();
        let svc = AuthService::new(Arc::new(repo), jwt.clone());
        let result = svc.signin("a@b.com", "hunter22").await.unwrap();
        let claims = jwt.validate_token(&result.token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
    }

    #[tokio::test]
    async fn test_signup_missing_fields_is_validation_error() {
        let repo = MockUserRepository::new();
        let svc = AuthService::new(Arc::new(repo), jwt());
        let err = svc.signup("", "pw", "Alice").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
