//! In-memory user store.
//!
//! Holds the authoritative collection of users for the lifetime of the
//! process. Nothing is persisted; a restart starts from an empty store.

use std::sync::RwLock;

use indexmap::IndexMap;
use tracing::debug;

use crate::{
    error::CoreError,
    user::{User, UserId},
};

#[derive(Debug)]
struct Inner {
    users: IndexMap<UserId, User>,
    next_id: i64,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            users: IndexMap::new(),
            next_id: 1,
        }
    }
}

/// Thread-safe, insertion-ordered registry of users.
///
/// The user map and the ID counter sit behind a single lock, so concurrent
/// `create` calls always receive distinct, gap-free IDs.
#[derive(Debug, Default)]
pub struct UserStore {
    inner: RwLock<Inner>,
}

impl UserStore {
    /// Create an empty store whose first assigned ID is 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return every user in insertion order.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn list(&self) -> Vec<User> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let inner = self.inner.read().expect("user store read lock poisoned");
        inner.users.values().cloned().collect()
    }

    /// Look up a user by ID.
    ///
    /// # Errors
    /// Returns [`CoreError::UserNotFound`] if no user has that ID.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn get(&self, id: UserId) -> Result<User, CoreError> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let inner = self.inner.read().expect("user store read lock poisoned");
        inner.users.get(&id).cloned().ok_or(CoreError::UserNotFound(id))
    }

    /// Append a new user under the next sequential ID and return it.
    ///
    /// No uniqueness check is made on `name` or `email`.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn create(&self, name: impl Into<String>, email: impl Into<String>) -> User {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let mut inner = self.inner.write().expect("user store write lock poisoned");
        let id = UserId(inner.next_id);
        inner.next_id += 1;
        let user = User::new(id, name.into(), email.into());
        inner.users.insert(id, user.clone());
        debug!(user_id = %id, "user stored");
        user
    }

    /// Number of users currently held.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let inner = self.inner.read().expect("user store read lock poisoned");
        inner.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every user and restart ID assignment at 1.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn reset(&self) {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let mut inner = self.inner.write().expect("user store write lock poisoned");
        *inner = Inner::default();
    }
}
