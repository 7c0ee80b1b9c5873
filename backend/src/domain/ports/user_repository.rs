//! Port abstraction for user persistence adapters and their errors.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{User, UserId, UserName};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
}

impl UserPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence port for the user entity.
///
/// Every operation performs exactly one round trip to the backing store;
/// adapters must not retry or cache. Absence is signalled with `None`, never
/// with an error, so inbound layers can map it to a 404 response.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier. `None` when no row matches.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch all users in primary-key order, possibly empty.
    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Insert a user and return the entity with the store-assigned id.
    async fn create(&self, name: UserName) -> Result<User, UserPersistenceError>;
}

struct FixtureState {
    users: Vec<User>,
    next_id: i32,
}

/// Deterministic in-memory repository used by handler tests and local runs.
///
/// Mirrors the store contract: ids are assigned sequentially on insert and
/// listing follows id order.
pub struct FixtureUserRepository {
    state: Mutex<FixtureState>,
}

impl FixtureUserRepository {
    /// Create an empty repository; the first insert receives id 1.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FixtureState {
                users: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Create a repository pre-loaded with the canonical fixture rows
    /// (1, "satoshi") and (2, "kasumi").
    pub fn seeded() -> Self {
        let repository = Self::new();
        {
            let mut state = repository
                .state
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            for (id, name) in [(1, "satoshi"), (2, "kasumi")] {
                match User::try_from_parts(id, name) {
                    Ok(user) => state.users.push(user),
                    Err(err) => unreachable!("fixture rows are valid: {err}"),
                }
            }
            state.next_id = 3;
        }
        repository
    }

    fn with_state<T>(
        &self,
        f: impl FnOnce(&mut FixtureState) -> T,
    ) -> Result<T, UserPersistenceError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| UserPersistenceError::query("fixture state lock poisoned"))?;
        Ok(f(&mut state))
    }
}

impl Default for FixtureUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        self.with_state(|state| state.users.iter().find(|user| user.id() == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        self.with_state(|state| {
            let mut users = state.users.clone();
            users.sort_by_key(User::id);
            users
        })
    }

    async fn create(&self, name: UserName) -> Result<User, UserPersistenceError> {
        self.with_state(|state| {
            let id = UserId::new(state.next_id)
                .map_err(|err| UserPersistenceError::query(err.to_string()))?;
            state.next_id += 1;
            let user = User::new(id, name);
            state.users.push(user.clone());
            Ok(user)
        })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: i32) -> UserId {
        UserId::new(raw).expect("valid id")
    }

    #[tokio::test]
    async fn seeded_repository_returns_canonical_rows_in_id_order() {
        let repository = FixtureUserRepository::seeded();

        let users = repository.find_all().await.expect("fixture list");
        let names: Vec<&str> = users.iter().map(|user| user.name().as_ref()).collect();
        assert_eq!(names, ["satoshi", "kasumi"]);
    }

    #[tokio::test]
    async fn find_by_id_signals_absence_with_none() {
        let repository = FixtureUserRepository::seeded();

        let missing = repository.find_by_id(id(99)).await.expect("fixture fetch");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn create_assigns_fresh_sequential_ids() {
        let repository = FixtureUserRepository::seeded();

        let name = UserName::new("foo").expect("valid name");
        let created = repository.create(name).await.expect("fixture insert");
        assert_eq!(created.id().get(), 3);

        let name = UserName::new("bar").expect("valid name");
        let next = repository.create(name).await.expect("fixture insert");
        assert_eq!(next.id().get(), 4);
    }

    #[tokio::test]
    async fn empty_repository_lists_no_users() {
        let repository = FixtureUserRepository::new();

        let users = repository.find_all().await.expect("fixture list");
        assert!(users.is_empty());
    }
}
