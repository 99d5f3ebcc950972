//! Staff authentication contract and an in-memory provider.

use std::collections::HashMap;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::CollaboratorError;
use crate::models::TenantId;
use crate::validation::validate_email;

/// Shortest accepted password, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A signed-in staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    /// Opaque user id.
    pub user_id: String,
    /// Login email, lowercased.
    pub email: String,
    /// The shop the account belongs to.
    pub tenant: TenantId,
}

/// Authentication provider used by staff-facing surfaces.
pub trait AuthProvider: Send + Sync {
    /// Creates an account and signs it in.
    fn register(
        &self,
        tenant: &TenantId,
        email: &str,
        password: &str,
    ) -> Result<Identity, CollaboratorError>;

    /// Signs in with email and password.
    fn login(
        &self,
        tenant: &TenantId,
        email: &str,
        password: &str,
    ) -> Result<Identity, CollaboratorError>;

    /// Signs the current user out.
    fn logout(&self);

    /// Returns the signed-in user, if any.
    fn current_user(&self) -> Option<Identity>;

    /// Subscribes to sign-in and sign-out events.
    fn subscribe(&self) -> watch::Receiver<Option<Identity>>;
}

#[derive(Debug)]
struct Account {
    identity: Identity,
    password_hash: String,
}

/// Accounts kept in memory with argon2 password hashes.
#[derive(Debug)]
pub struct MemoryAuth {
    accounts: RwLock<HashMap<(TenantId, String), Account>>,
    session: watch::Sender<Option<Identity>>,
}

impl Default for MemoryAuth {
    fn default() -> Self {
        let (session, _) = watch::channel(None);
        Self {
            accounts: RwLock::new(HashMap::new()),
            session,
        }
    }
}

impl MemoryAuth {
    /// Creates a provider with no accounts and nobody signed in.
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuthProvider for MemoryAuth {
    fn register(
        &self,
        tenant: &TenantId,
        email: &str,
        password: &str,
    ) -> Result<Identity, CollaboratorError> {
        let email = email.trim().to_lowercase();
        if !validate_email(&email) {
            return Err(CollaboratorError::InvalidEmail { email });
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CollaboratorError::WeakPassword {
                min_length: MIN_PASSWORD_LEN,
            });
        }

        let password_hash = hash_password(password)?;
        let key = (tenant.clone(), email.clone());
        let mut accounts = self.accounts.write();
        if accounts.contains_key(&key) {
            return Err(CollaboratorError::EmailAlreadyInUse { email });
        }

        let identity = Identity {
            user_id: Uuid::new_v4().to_string(),
            email,
            tenant: tenant.clone(),
        };
        accounts.insert(
            key,
            Account {
                identity: identity.clone(),
                password_hash,
            },
        );
        drop(accounts);

        info!(tenant = %tenant, user_id = %identity.user_id, "Registered staff account");
        self.session.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    fn login(
        &self,
        tenant: &TenantId,
        email: &str,
        password: &str,
    ) -> Result<Identity, CollaboratorError> {
        let key = (tenant.clone(), email.trim().to_lowercase());
        let identity = {
            let accounts = self.accounts.read();
            accounts
                .get(&key)
                .filter(|account| verify_password(password, &account.password_hash))
                .map(|account| account.identity.clone())
        };

        match identity {
            Some(identity) => {
                info!(tenant = %tenant, user_id = %identity.user_id, "Staff signed in");
                self.session.send_replace(Some(identity.clone()));
                Ok(identity)
            }
            None => {
                warn!(tenant = %tenant, "Rejected sign-in");
                Err(CollaboratorError::InvalidCredentials)
            }
        }
    }

    fn logout(&self) {
        self.session.send_replace(None);
    }

    fn current_user(&self) -> Option<Identity> {
        self.session.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.session.subscribe()
    }
}

fn hash_password(password: &str) -> Result<String, CollaboratorError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CollaboratorError::Unavailable {
            message: format!("Failed to hash password: {}", e),
        })?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(hash) => Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant() -> TenantId {
        TenantId::new("demo")
    }

    #[test]
    fn test_register_then_login() {
        let auth = MemoryAuth::new();
        let registered = auth.register(&tenant(), "Staff@Example.com", "secret1").unwrap();
        assert_eq!(registered.email, "staff@example.com");

        auth.logout();
        assert!(auth.current_user().is_none());

        let signed_in = auth.login(&tenant(), "staff@example.com", "secret1").unwrap();
        assert_eq!(signed_in, registered);
        assert_eq!(auth.current_user(), Some(registered));
    }

    #[test]
    fn test_password_is_not_stored_in_clear() {
        let auth = MemoryAuth::new();
        auth.register(&tenant(), "staff@example.com", "secret1").unwrap();
        let accounts = auth.accounts.read();
        let account = accounts.values().next().unwrap();
        assert!(account.password_hash.starts_with("$argon2"));
        assert!(!account.password_hash.contains("secret1"));
    }

    #[test]
    fn test_short_password_is_weak() {
        let auth = MemoryAuth::new();
        assert_eq!(
            auth.register(&tenant(), "staff@example.com", "12345"),
            Err(CollaboratorError::WeakPassword { min_length: 6 })
        );
    }

    #[test]
    fn test_duplicate_email_is_rejected() {
        let auth = MemoryAuth::new();
        auth.register(&tenant(), "staff@example.com", "secret1").unwrap();
        assert_eq!(
            auth.register(&tenant(), "STAFF@example.com", "secret2"),
            Err(CollaboratorError::EmailAlreadyInUse {
                email: "staff@example.com".to_string()
            })
        );
    }

    #[test]
    fn test_same_email_in_other_tenant_is_allowed() {
        let auth = MemoryAuth::new();
        auth.register(&tenant(), "staff@example.com", "secret1").unwrap();
        assert!(auth
            .register(&TenantId::new("other_shop"), "staff@example.com", "secret1")
            .is_ok());
    }

    #[test]
    fn test_malformed_email_is_rejected() {
        let auth = MemoryAuth::new();
        assert!(matches!(
            auth.register(&tenant(), "user@", "secret1"),
            Err(CollaboratorError::InvalidEmail { .. })
        ));
    }

    #[test]
    fn test_wrong_password_and_unknown_email_look_the_same() {
        let auth = MemoryAuth::new();
        auth.register(&tenant(), "staff@example.com", "secret1").unwrap();

        assert_eq!(
            auth.login(&tenant(), "staff@example.com", "wrong-pass"),
            Err(CollaboratorError::InvalidCredentials)
        );
        assert_eq!(
            auth.login(&tenant(), "nobody@example.com", "secret1"),
            Err(CollaboratorError::InvalidCredentials)
        );
    }

    #[test]
    fn test_subscribers_see_identity_changes() {
        let auth = MemoryAuth::new();
        let mut rx = auth.subscribe();
        assert!(rx.borrow_and_update().is_none());

        auth.register(&tenant(), "staff@example.com", "secret1").unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_some());

        auth.logout();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_none());
    }
}
