use serde::{Deserialize, Serialize};

/// Public view of an account. The password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UserView {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename(deserialize = "createdAt", serialize = "createdAt"))]
    pub created_at: String,
}
