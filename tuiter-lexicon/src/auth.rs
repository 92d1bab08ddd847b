use crate::users::UserView;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegisterInput {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Returned by register and login. The same token is also set as the session cookie.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateSessionOutput {
    pub token: String,
    pub user: UserView,
}
