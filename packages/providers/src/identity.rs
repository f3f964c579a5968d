//! # Identity Provider
//!
//! Interface to the hosted identity service: credential sign-in/out and an
//! auth-state subscription that fires on every change. Matching the
//! provider's behavior, a new subscriber is called immediately with the
//! current state.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::{ProviderError, ProviderResult};

/// Authenticated user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// Auth-state change callback
pub type AuthCallback = Box<dyn Fn(Option<AuthUser>) + Send + Sync>;

/// Active auth-state subscription; unsubscribes when dropped
pub struct AuthSubscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl AuthSubscription {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// Hosted identity service
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> ProviderResult<AuthUser>;

    async fn sign_out(&self) -> ProviderResult<()>;

    fn current_user(&self) -> Option<AuthUser>;

    /// Observe auth-state changes until the subscription is dropped
    fn subscribe(&self, on_change: AuthCallback) -> AuthSubscription;
}

type SubscriberMap = Arc<Mutex<HashMap<u64, AuthCallback>>>;

/// Fixed-credential identity provider for tests
pub struct StaticIdentity {
    users: HashMap<String, (String, AuthUser)>,
    current: Arc<Mutex<Option<AuthUser>>>,
    subscribers: SubscriberMap,
    next_token: AtomicU64,
}

impl StaticIdentity {
    pub fn new() -> Self {
        Self {
            users: HashMap::new(),
            current: Arc::new(Mutex::new(None)),
            subscribers: Arc::new(Mutex::new(HashMap::new())),
            next_token: AtomicU64::new(0),
        }
    }

    pub fn with_user(
        mut self,
        uid: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let email = email.into();
        self.users.insert(
            email.clone(),
            (
                password.into(),
                AuthUser {
                    uid: uid.into(),
                    email,
                    display_name: None,
                },
            ),
        );
        self
    }

    fn notify(&self, user: Option<AuthUser>) {
        let subscribers = self.subscribers.lock().expect("subscriber lock poisoned");
        for callback in subscribers.values() {
            callback(user.clone());
        }
    }
}

impl Default for StaticIdentity {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn sign_in(&self, email: &str, password: &str) -> ProviderResult<AuthUser> {
        match self.users.get(email) {
            Some((expected, user)) if expected == password => {
                *self.current.lock().expect("auth state lock poisoned") = Some(user.clone());
                self.notify(Some(user.clone()));
                Ok(user.clone())
            }
            _ => Err(ProviderError::Unauthorized(format!(
                "bad credentials for {}",
                email
            ))),
        }
    }

    async fn sign_out(&self) -> ProviderResult<()> {
        *self.current.lock().expect("auth state lock poisoned") = None;
        self.notify(None);
        Ok(())
    }

    fn current_user(&self) -> Option<AuthUser> {
        self.current
            .lock()
            .expect("auth state lock poisoned")
            .clone()
    }

    fn subscribe(&self, on_change: AuthCallback) -> AuthSubscription {
        // Fire immediately with the current state, then on every change
        on_change(self.current_user());

        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        self.subscribers
            .lock()
            .expect("subscriber lock poisoned")
            .insert(token, on_change);

        let subscribers = Arc::clone(&self.subscribers);
        AuthSubscription::new(move || {
            subscribers
                .lock()
                .expect("subscriber lock poisoned")
                .remove(&token);
        })
    }
}
