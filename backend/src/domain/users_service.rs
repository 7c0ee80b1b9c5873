//! User domain service.
//!
//! Thin orchestration over the [`UserRepository`] port: validates request
//! input, forwards to persistence, and converts persistence failures into
//! transport-agnostic domain errors. Not-found stays an `Option`; only the
//! inbound adapter turns absence into a status code.

use std::sync::Arc;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Error, User, UserId, UserName};

/// Use-case service for the user resource.
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

impl UserService {
    /// Create a new service backed by the given repository.
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Fetch a single user by raw identifier.
    ///
    /// Non-positive ids cannot match any row, so they short-circuit to
    /// `Ok(None)` without a store round trip.
    pub async fn fetch_user(&self, id: i32) -> Result<Option<User>, Error> {
        let Ok(id) = UserId::new(id) else {
            return Ok(None);
        };
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)
    }

    /// List all users in store order.
    pub async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.repository
            .find_all()
            .await
            .map_err(map_persistence_error)
    }

    /// Create a user from a raw name, returning the stored entity.
    pub async fn create_user(&self, name: &str) -> Result<User, Error> {
        let name = UserName::new(name)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.repository
            .create(name)
            .await
            .map_err(map_persistence_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for service validation and error mapping.

    use std::sync::Mutex;

    use async_trait::async_trait;
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[derive(Clone, Copy)]
    enum StubFailure {
        Connection,
        Query,
    }

    impl StubFailure {
        fn to_error(self) -> UserPersistenceError {
            match self {
                Self::Connection => UserPersistenceError::connection("database unavailable"),
                Self::Query => UserPersistenceError::query("database query failed"),
            }
        }
    }

    #[derive(Default)]
    struct StubState {
        users: Vec<User>,
        failure: Option<StubFailure>,
        create_calls: usize,
    }

    #[derive(Default)]
    struct StubUserRepository {
        state: Mutex<StubState>,
    }

    impl StubUserRepository {
        fn with_users(users: Vec<User>) -> Self {
            Self {
                state: Mutex::new(StubState {
                    users,
                    ..StubState::default()
                }),
            }
        }

        fn set_failure(&self, failure: StubFailure) {
            self.state.lock().expect("state lock").failure = Some(failure);
        }

        fn create_calls(&self) -> usize {
            self.state.lock().expect("state lock").create_calls
        }
    }

    #[async_trait]
    impl UserRepository for StubUserRepository {
        async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
            let state = self.state.lock().expect("state lock");
            if let Some(failure) = state.failure {
                return Err(failure.to_error());
            }
            Ok(state.users.iter().find(|user| user.id() == id).cloned())
        }

        async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
            let state = self.state.lock().expect("state lock");
            if let Some(failure) = state.failure {
                return Err(failure.to_error());
            }
            Ok(state.users.clone())
        }

        async fn create(&self, name: UserName) -> Result<User, UserPersistenceError> {
            let mut state = self.state.lock().expect("state lock");
            state.create_calls += 1;
            if let Some(failure) = state.failure {
                return Err(failure.to_error());
            }
            let id = i32::try_from(state.users.len())
                .map_err(|err| UserPersistenceError::query(err.to_string()))?
                + 1;
            let user = User::new(UserId::new(id).expect("positive id"), name);
            state.users.push(user.clone());
            Ok(user)
        }
    }

    fn user(id: i32, name: &str) -> User {
        User::try_from_parts(id, name).expect("valid user")
    }

    fn service_with(repository: StubUserRepository) -> (UserService, Arc<StubUserRepository>) {
        let repository = Arc::new(repository);
        (UserService::new(repository.clone()), repository)
    }

    #[tokio::test]
    async fn fetch_user_returns_matching_row() {
        let (service, _repo) = service_with(StubUserRepository::with_users(vec![
            user(1, "satoshi"),
            user(2, "kasumi"),
        ]));

        let found = service.fetch_user(2).await.expect("fetch succeeds");
        assert_eq!(found, Some(user(2, "kasumi")));
    }

    #[rstest]
    #[case(0)]
    #[case(-7)]
    #[tokio::test]
    async fn fetch_user_short_circuits_non_positive_ids(#[case] id: i32) {
        let (service, repo) = service_with(StubUserRepository::default());
        repo.set_failure(StubFailure::Query);

        // The failing repository is never reached for an impossible id.
        let found = service.fetch_user(id).await.expect("fetch succeeds");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn list_users_passes_rows_through_unchanged() {
        let rows = vec![user(1, "satoshi"), user(2, "kasumi")];
        let (service, _repo) = service_with(StubUserRepository::with_users(rows.clone()));

        let users = service.list_users().await.expect("list succeeds");
        assert_eq!(users, rows);
    }

    #[tokio::test]
    async fn create_user_rejects_empty_names_before_persistence() {
        let (service, repo) = service_with(StubUserRepository::default());

        let err = service
            .create_user("   ")
            .await
            .expect_err("blank names are invalid");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(repo.create_calls(), 0);
    }

    #[tokio::test]
    async fn create_user_returns_entity_with_assigned_id() {
        let (service, _repo) = service_with(StubUserRepository::default());

        let created = service.create_user("foo").await.expect("create succeeds");
        assert_eq!(created.id().get(), 1);
        assert_eq!(created.name().as_ref(), "foo");
    }

    #[rstest]
    #[case(StubFailure::Connection)]
    #[case(StubFailure::Query)]
    #[tokio::test]
    async fn persistence_failures_map_to_internal_errors(#[case] failure: StubFailure) {
        let (service, repo) = service_with(StubUserRepository::default());
        repo.set_failure(failure);

        let err = service
            .list_users()
            .await
            .expect_err("repository failures surface as domain errors");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
