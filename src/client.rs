//! HTTP client for the users API, as consumed by the view.

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::user::{NewUser, User};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to {operation}: server responded {status}")]
    Status {
        operation: &'static str,
        status: StatusCode,
    },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Requests the view issues. Never retried.
#[async_trait]
pub trait UsersApi: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, ClientError>;

    async fn create_user(&self, name: &str) -> Result<User, ClientError>;
}

#[derive(Clone, Debug)]
pub struct HttpUsersApi {
    client: reqwest::Client,
    users_url: String,
}

impl HttpUsersApi {
    /// `base_url` is whatever the users routes hang off, e.g.
    /// `http://localhost:8080/api` behind the proxy.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            users_url: format!("{}/users", base_url.trim_end_matches('/')),
        }
    }

    pub fn users_url(&self) -> &str {
        &self.users_url
    }
}

#[async_trait]
impl UsersApi for HttpUsersApi {
    async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        let res = self.client.get(&self.users_url).send().await?;
        if !res.status().is_success() {
            return Err(ClientError::Status {
                operation: "fetch users",
                status: res.status(),
            });
        }
        Ok(res.json().await?)
    }

    async fn create_user(&self, name: &str) -> Result<User, ClientError> {
        let res = self
            .client
            .post(&self.users_url)
            .json(&NewUser::named(name))
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(ClientError::Status {
                operation: "add user",
                status: res.status(),
            });
        }
        Ok(res.json().await?)
    }
}
