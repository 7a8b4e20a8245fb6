//! The users page: a local, possibly stale copy of the user list plus a
//! controlled name input.
//!
//! Failures are logged and absorbed. The list only ever changes by a full
//! re-fetch or by appending a record the server returned, so every entry
//! carries a server-assigned id.

use log::error;

use crate::client::UsersApi;
use crate::user::User;

/// Outcome of a form submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    /// Input was blank; no request was sent.
    Skipped,
    Added(User),
    Failed,
}

pub struct UserListView<A> {
    api: A,
    users: Vec<User>,
    name: String,
    loading: bool,
}

impl<A: UsersApi> UserListView<A> {
    pub const fn new(api: A) -> Self {
        Self {
            api,
            users: Vec::new(),
            name: String::new(),
            loading: false,
        }
    }

    /// Fetch the full list, replacing local state on success.
    pub async fn mount(&mut self) {
        self.start_loading();
        self.load().await;
    }

    /// Enter the loading state; a render now shows the indicator in place
    /// of the list.
    pub fn start_loading(&mut self) {
        self.loading = true;
    }

    /// Issue the fetch and leave the loading state whatever the outcome.
    pub async fn load(&mut self) {
        match self.api.list_users().await {
            Ok(users) => self.users = users,
            Err(e) => error!("error fetching users: {e}"),
        }
        self.loading = false;
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    /// Send the current input as a new user. The name goes out as typed;
    /// trimming only decides whether it is blank.
    pub async fn submit(&mut self) -> Submission {
        if self.name.trim().is_empty() {
            return Submission::Skipped;
        }
        match self.api.create_user(&self.name).await {
            Ok(user) => {
                self.users.push(user.clone());
                self.name.clear();
                Submission::Added(user)
            }
            Err(e) => {
                error!("error adding user: {e}");
                Submission::Failed
            }
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Users\n");
        if self.loading {
            out.push_str("Loading...\n");
        } else {
            for user in &self.users {
                out.push_str(&format!("- {}\n", user.name));
            }
        }
        out.push_str(&format!("[{}] Add User\n", self.name));
        out
    }
}
