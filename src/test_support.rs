//! In-memory doubles for the store and API ports.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::client::{ClientError, UsersApi};
use crate::error::StoreError;
use crate::store::UserStore;
use crate::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoreMode {
    MissingTable,
    Ready,
    Unreachable,
}

#[derive(Debug)]
struct StoreState {
    mode: StoreMode,
    users: Vec<User>,
    next_id: i32,
}

/// Mimics the users table: SERIAL ids, NOT NULL name, and a table that only
/// exists after bootstrap.
#[derive(Debug)]
pub struct FixtureUserStore {
    state: Mutex<StoreState>,
}

impl FixtureUserStore {
    fn with_mode(mode: StoreMode) -> Self {
        Self {
            state: Mutex::new(StoreState {
                mode,
                users: Vec::new(),
                next_id: 1,
            }),
        }
    }

    pub fn bootstrapped() -> Self {
        Self::with_mode(StoreMode::Ready)
    }

    pub fn without_table() -> Self {
        Self::with_mode(StoreMode::MissingTable)
    }

    pub fn unreachable() -> Self {
        Self::with_mode(StoreMode::Unreachable)
    }

    fn check(state: &StoreState) -> Result<(), StoreError> {
        match state.mode {
            StoreMode::Ready => Ok(()),
            StoreMode::MissingTable => Err(StoreError::query(
                "error returned from database: relation \"users\" does not exist",
            )),
            StoreMode::Unreachable => Err(StoreError::unavailable(
                "pool timed out while waiting for an open connection",
            )),
        }
    }
}

#[async_trait]
impl UserStore for FixtureUserStore {
    async fn bootstrap(&self) -> Result<(), StoreError> {
        let mut state = self.state.lock().expect("store lock");
        match state.mode {
            StoreMode::Unreachable => Self::check(&state),
            StoreMode::MissingTable | StoreMode::Ready => {
                state.mode = StoreMode::Ready;
                Ok(())
            }
        }
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let state = self.state.lock().expect("store lock");
        Self::check(&state)?;
        Ok(state.users.clone())
    }

    async fn create(&self, name: Option<String>) -> Result<User, StoreError> {
        let mut state = self.state.lock().expect("store lock");
        Self::check(&state)?;
        let name = name.ok_or_else(|| {
            StoreError::query("null value in column \"name\" violates not-null constraint")
        })?;
        let user = User {
            id: state.next_id,
            name,
        };
        state.next_id += 1;
        state.users.push(user.clone());
        Ok(user)
    }
}

#[derive(Debug, Default)]
struct ApiState {
    users: Vec<User>,
    fail: bool,
    list_calls: usize,
    create_calls: Vec<String>,
}

/// Records every call; answers from an in-memory list or fails with a 500
/// when told to.
#[derive(Clone, Debug, Default)]
pub struct ScriptedUsersApi {
    state: Arc<Mutex<ApiState>>,
}

impl ScriptedUsersApi {
    pub fn with_users(users: Vec<User>) -> Self {
        let api = Self::default();
        api.state.lock().expect("api lock").users = users;
        api
    }

    pub fn fail_requests(&self, fail: bool) {
        self.state.lock().expect("api lock").fail = fail;
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().expect("api lock").list_calls
    }

    pub fn create_calls(&self) -> Vec<String> {
        self.state.lock().expect("api lock").create_calls.clone()
    }

    fn server_error(operation: &'static str) -> ClientError {
        ClientError::Status {
            operation,
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[async_trait]
impl UsersApi for ScriptedUsersApi {
    async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        let mut state = self.state.lock().expect("api lock");
        state.list_calls += 1;
        if state.fail {
            return Err(Self::server_error("fetch users"));
        }
        Ok(state.users.clone())
    }

    async fn create_user(&self, name: &str) -> Result<User, ClientError> {
        let mut state = self.state.lock().expect("api lock");
        state.create_calls.push(name.to_owned());
        if state.fail {
            return Err(Self::server_error("add user"));
        }
        let id = state.users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let user = User {
            id,
            name: name.to_owned(),
        };
        state.users.push(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn bootstrap_twice_keeps_rows() {
        let store = FixtureUserStore::without_table();
        store.bootstrap().await.expect("first bootstrap");
        store.create(Some("Alice".into())).await.expect("insert");
        store.bootstrap().await.expect("second bootstrap");

        let users = store.list().await.expect("list");
        assert_eq!(users.len(), 1);
    }
}
