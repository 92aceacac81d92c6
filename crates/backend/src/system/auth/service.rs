use contracts::system::auth::{ChangePasswordDto, LoginRequest};
use contracts::system::users::{TeamMember, User};
use std::sync::Arc;
use thiserror::Error;

use super::password;
use crate::shared::config::AuthConfig;
use crate::shared::data::{keys, RecordStore};
use crate::shared::validation::ValidationError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Roster lookup with per-user password overrides
pub struct AuthService {
    config: AuthConfig,
    team: Vec<TeamMember>,
    store: Arc<dyn RecordStore>,
}

impl AuthService {
    pub fn new(config: AuthConfig, team: Vec<TeamMember>, store: Arc<dyn RecordStore>) -> Self {
        Self { config, team, store }
    }

    fn admin_user(&self) -> User {
        User {
            id: self.config.admin_id.clone(),
            email: self.config.admin_email.clone(),
            name: self.config.admin_name.clone(),
            is_admin: true,
        }
    }

    /// Resolve an email to a known identity.
    ///
    /// The admin email must match exactly; roster emails ignore case.
    pub fn find_user(&self, email: &str) -> Option<User> {
        if email == self.config.admin_email {
            return Some(self.admin_user());
        }
        self.team
            .iter()
            .find(|m| m.email.eq_ignore_ascii_case(email))
            .map(TeamMember::to_user)
    }

    fn find_by_id(&self, user_id: &str) -> Option<User> {
        if user_id == self.config.admin_id {
            return Some(self.admin_user());
        }
        self.team
            .iter()
            .find(|m| m.id == user_id)
            .map(TeamMember::to_user)
    }

    async fn password_matches(&self, user_id: &str, candidate: &str) -> Result<bool, AuthError> {
        let key = keys::password(user_id);
        match self.store.get(&key).await? {
            Some(stored) => match password::verify_password(candidate, &stored) {
                Ok(ok) => Ok(ok),
                Err(e) => {
                    // A damaged override must not reopen the default password
                    tracing::warn!("Rejecting login for {}: unreadable password override: {}", user_id, e);
                    Ok(false)
                }
            },
            None => Ok(candidate == self.config.default_password),
        }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<User, AuthError> {
        if request.email.trim().is_empty() {
            return Err(ValidationError::EmptyField("email").into());
        }
        if request.password.is_empty() {
            return Err(ValidationError::EmptyField("password").into());
        }

        let user = self.find_user(&request.email).ok_or_else(|| {
            tracing::warn!("Login attempt for unknown email {}", request.email);
            AuthError::UserNotFound(request.email.clone())
        })?;

        if !self.password_matches(&user.id, &request.password).await? {
            tracing::warn!("Wrong password for {}", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!("User {} logged in (admin: {})", user.id, user.is_admin);
        Ok(user)
    }

    /// Store a personal password. Form checks run before the store is touched.
    pub async fn change_password(&self, dto: &ChangePasswordDto) -> Result<(), AuthError> {
        password::validate_new_password(
            &dto.new_password,
            &dto.confirm_password,
            self.config.min_password_length,
        )?;

        let user = self
            .find_by_id(&dto.user_id)
            .ok_or_else(|| AuthError::UserNotFound(dto.user_id.clone()))?;

        let hash = password::hash_password(&dto.new_password)?;
        self.store.set(&keys::password(&user.id), &hash).await?;

        tracing::info!("Password changed for {}", user.id);
        Ok(())
    }

    /// Sessions live with the caller; nothing to release here.
    pub fn logout(&self, user: &User) {
        tracing::info!("User {} logged out", user.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::MemoryRecordStore;

    fn config() -> AuthConfig {
        AuthConfig {
            admin_email: "gestao@sharks.com".into(),
            admin_id: "admin_master".into(),
            admin_name: "DIRETORIA SHARKS".into(),
            default_password: "12345678".into(),
            min_password_length: 4,
        }
    }

    fn team() -> Vec<TeamMember> {
        vec![
            TeamMember {
                id: "user_bruna".into(),
                name: "BRUNA MONTEIRO".into(),
                email: "bruna@sharks.com.br".into(),
            },
            TeamMember {
                id: "user_davi".into(),
                name: "DAVI".into(),
                email: "davi@sharks.com".into(),
            },
        ]
    }

    fn service() -> (AuthService, Arc<MemoryRecordStore>) {
        let store = Arc::new(MemoryRecordStore::new());
        (AuthService::new(config(), team(), store.clone()), store)
    }

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.into(),
            password: password.into(),
        }
    }

    fn change(user_id: &str, new: &str, confirm: &str) -> ChangePasswordDto {
        ChangePasswordDto {
            user_id: user_id.into(),
            new_password: new.into(),
            confirm_password: confirm.into(),
        }
    }

    #[tokio::test]
    async fn test_admin_login_with_default_password() {
        let (auth, _) = service();
        let user = auth.login(&login("gestao@sharks.com", "12345678")).await.unwrap();
        assert!(user.is_admin);
        assert_eq!(user.id, "admin_master");
        assert_eq!(user.name, "DIRETORIA SHARKS");
    }

    #[tokio::test]
    async fn test_admin_email_is_case_sensitive() {
        let (auth, _) = service();
        let result = auth.login(&login("GESTAO@sharks.com", "12345678")).await;
        assert!(matches!(result, Err(AuthError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_roster_email_ignores_case() {
        let (auth, _) = service();
        let user = auth.login(&login("Bruna@Sharks.com.br", "12345678")).await.unwrap();
        assert_eq!(user.id, "user_bruna");
        assert_eq!(user.name, "BRUNA MONTEIRO");
        assert!(!user.is_admin);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email() {
        let (auth, _) = service();
        assert!(matches!(
            auth.login(&login("davi@sharks.com", "nope")).await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login(&login("ghost@sharks.com", "12345678")).await,
            Err(AuthError::UserNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_blank_form_fields() {
        let (auth, _) = service();
        assert!(matches!(
            auth.login(&login("  ", "12345678")).await,
            Err(AuthError::Validation(ValidationError::EmptyField("email")))
        ));
        assert!(matches!(
            auth.login(&login("davi@sharks.com", "")).await,
            Err(AuthError::Validation(ValidationError::EmptyField("password")))
        ));
    }

    #[tokio::test]
    async fn test_override_replaces_default_for_that_user_only() {
        let (auth, store) = service();
        auth.change_password(&change("user_bruna", "novaSenha", "novaSenha"))
            .await
            .unwrap();

        let stored = store.get("password:user_bruna").await.unwrap().unwrap();
        assert_ne!(stored, "novaSenha");

        assert!(auth.login(&login("bruna@sharks.com.br", "novaSenha")).await.is_ok());
        assert!(matches!(
            auth.login(&login("bruna@sharks.com.br", "12345678")).await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(auth.login(&login("davi@sharks.com", "12345678")).await.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_change_never_touches_store() {
        let (auth, store) = service();
        assert!(matches!(
            auth.change_password(&change("user_bruna", "abcd", "abce")).await,
            Err(AuthError::Validation(ValidationError::PasswordMismatch))
        ));
        assert!(matches!(
            auth.change_password(&change("user_bruna", "abc", "abc")).await,
            Err(AuthError::Validation(ValidationError::PasswordTooShort { min: 4 }))
        ));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_change_for_unknown_user() {
        let (auth, store) = service();
        assert!(matches!(
            auth.change_password(&change("user_ghost", "abcd", "abcd")).await,
            Err(AuthError::UserNotFound(_))
        ));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_override_rejects_login() {
        let (auth, store) = service();
        store.set("password:admin_master", "plain-text").await.unwrap();
        assert!(matches!(
            auth.login(&login("gestao@sharks.com", "12345678")).await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login(&login("gestao@sharks.com", "plain-text")).await,
            Err(AuthError::InvalidCredentials)
        ));
        // Other users keep their own credentials
        assert!(auth.login(&login("davi@sharks.com", "12345678")).await.is_ok());
    }
}
