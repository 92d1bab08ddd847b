use crate::auth_verifier::AuthError;
use crate::dislikes::DislikeError;
use rocket::http::{ContentType, Status};
use rocket::serde::json::Json;
use rocket::{response, Request};

pub mod auth;
pub mod dislikes;
pub mod tuits;

#[derive(Clone, Debug, PartialEq)]
pub enum ApiError {
    RuntimeError,
    InvalidLogin,
    InvalidRequest(String),
    UsernameNotAvailable,
    NotFound(String),
    Conflict(String),
    AuthRequired(String),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::RuntimeError => Status::InternalServerError,
            ApiError::InvalidLogin => Status::Unauthorized,
            ApiError::InvalidRequest(_) => Status::BadRequest,
            ApiError::UsernameNotAvailable => Status::Conflict,
            ApiError::NotFound(_) => Status::NotFound,
            ApiError::Conflict(_) => Status::Conflict,
            ApiError::AuthRequired(_) => Status::Unauthorized,
        }
    }

    fn error_and_message(&self) -> (&'static str, String) {
        match self {
            ApiError::RuntimeError => ("InternalServerError", "Something went wrong".to_string()),
            ApiError::InvalidLogin => ("InvalidLogin", "Invalid username or password".to_string()),
            ApiError::InvalidRequest(msg) => ("InvalidRequest", msg.clone()),
            ApiError::UsernameNotAvailable => {
                ("UsernameNotAvailable", "Username not available".to_string())
            }
            ApiError::NotFound(msg) => ("NotFound", msg.clone()),
            ApiError::Conflict(msg) => ("Conflict", msg.clone()),
            ApiError::AuthRequired(msg) => ("AuthRequired", msg.clone()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (error, message) = self.error_and_message();
        write!(f, "{}: {}", error, message)
    }
}

impl From<DislikeError> for ApiError {
    fn from(error: DislikeError) -> Self {
        match error {
            DislikeError::TuitNotFound(id) => ApiError::NotFound(format!("Tuit `{id}` not found")),
            DislikeError::UserNotFound(id) => ApiError::NotFound(format!("User `{id}` not found")),
            DislikeError::DislikeNotFound(id) => {
                ApiError::NotFound(format!("Dislike `{id}` not found"))
            }
            DislikeError::Conflict { .. } => ApiError::Conflict(error.to_string()),
            DislikeError::Database(error) => {
                tracing::error!("@LOG: dislike store failed: {error}");
                ApiError::RuntimeError
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::AuthMissing => {
                ApiError::AuthRequired("`me` requires a logged-in session".to_string())
            }
            AuthError::InvalidSession => {
                ApiError::AuthRequired("Session is unknown or expired".to_string())
            }
            AuthError::Internal(error) => {
                tracing::error!("@LOG: failed to authenticate request: {error}");
                ApiError::RuntimeError
            }
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl<'r, 'o: 'r> response::Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'o> {
        let (error, message) = self.error_and_message();
        let body = Json(ErrorBody {
            error: error.to_string(),
            message,
        });
        let mut res = <Json<ErrorBody> as response::Responder>::respond_to(body, req)?;
        res.set_header(ContentType::JSON);
        res.set_status(self.status());
        Ok(res)
    }
}
