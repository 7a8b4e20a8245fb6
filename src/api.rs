//! Users REST handlers.

use std::sync::Arc;

use actix_web::{get, post, web, Scope};

use crate::error::ApiError;
use crate::store::UserStore;
use crate::user::{NewUser, User};

/// Shared handler state. Cloned into every worker by `web::Data`.
#[derive(Clone)]
pub struct AppState {
    users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub fn users(&self) -> &dyn UserStore {
        self.users.as_ref()
    }
}

#[get("/users")]
pub async fn list_users(state: web::Data<AppState>) -> Result<web::Json<Vec<User>>, ApiError> {
    let users = state.users().list().await?;
    Ok(web::Json(users))
}

#[post("/users")]
pub async fn create_user(
    state: web::Data<AppState>,
    body: web::Json<NewUser>,
) -> Result<web::Json<User>, ApiError> {
    let user = state.users().create(body.into_inner().name).await?;
    Ok(web::Json(user))
}

/// Users routes mounted under `prefix` (`""` for the root).
pub fn scope(prefix: &str) -> Scope {
    web::scope(prefix)
        .app_data(web::JsonConfig::default().error_handler(ApiError::from_json_rejection))
        .service(list_users)
        .service(create_user)
}
